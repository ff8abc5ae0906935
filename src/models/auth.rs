// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Identity and profile models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Username/password pair submitted once per login or register attempt.
#[derive(Clone, Serialize, Validate)]
pub struct Credential {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token pair issued by `/authen/jwt/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwt {
    pub refresh: String,
    pub access: String,
}

/// The authenticated identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: u64,
    pub username: String,
}

/// Entry in the user directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}

/// Profile record as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    /// Id of the owning user
    #[serde(rename = "userProfile")]
    pub owner_user_id: u64,
    /// URL of the avatar image, if one was uploaded
    #[serde(rename = "img")]
    pub image: Option<String>,
}

/// Image file attached to a profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Write-shape of a profile: only the image is updatable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProfile {
    pub id: u64,
    pub image: Option<ImageUpload>,
}
