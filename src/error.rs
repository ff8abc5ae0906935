// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types for REST calls and token storage.

use crate::storage::StorageError;

/// Error returned by any remote operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Session rejected by server (HTTP {0})")]
    Unauthorized(u16),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No access token stored")]
    NoToken,

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Whether the failure looks like an expired or invalid session rather
    /// than a transport or server fault.
    pub fn is_session_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::NoToken)
    }

    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(status) => Some(*status),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Result type alias for remote operations
pub type Result<T> = std::result::Result<T, ApiError>;
