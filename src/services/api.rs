// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task-board REST API client.
//!
//! Every call is a single request with no retries. Authorized calls take the
//! access token explicitly and send it as `Authorization: JWT <token>`.

use crate::error::{ApiError, Result};
use crate::models::{
    Category, Credential, Jwt, LoginUser, PostProfile, PostTask, Profile, ReadTask, User,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Authorization scheme expected by the server.
pub const AUTH_SCHEME: &str = "JWT";

/// Task-board API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─── Auth ────────────────────────────────────────────────────────────────

    /// Exchange a credential for a token pair.
    pub async fn create_token(&self, credential: &Credential) -> Result<Jwt> {
        let url = self.url("/authen/jwt/create");
        tracing::debug!(username = %credential.username, "Requesting access token");

        let response = self.http.post(&url).json(credential).send().await?;
        check_response_json(response).await
    }

    /// Register a new user account.
    pub async fn create_user(&self, credential: &Credential) -> Result<User> {
        let url = self.url("/api/create/");
        tracing::debug!(username = %credential.username, "Registering user");

        let response = self.http.post(&url).json(credential).send().await?;
        check_response_json(response).await
    }

    /// Identity of the token's owner.
    pub async fn get_login_user(&self, token: &str) -> Result<LoginUser> {
        self.get_json("/api/loginuser/", token).await
    }

    /// Create an empty (image-less) profile for the token's owner.
    pub async fn create_profile(&self, token: &str) -> Result<Profile> {
        let body = serde_json::json!({ "img": null });
        self.send_json(reqwest::Method::POST, "/api/profile/", token, &body)
            .await
    }

    pub async fn list_profiles(&self, token: &str) -> Result<Vec<Profile>> {
        self.get_json("/api/profile/", token).await
    }

    /// Replace a profile's image via multipart upload.
    ///
    /// With no image, an empty form is sent.
    pub async fn update_profile(&self, token: &str, profile: PostProfile) -> Result<Profile> {
        let url = self.url(&format!("/api/profile/{}/", profile.id));

        let mut form = reqwest::multipart::Form::new();
        if let Some(image) = profile.image {
            let part = reqwest::multipart::Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)
                .map_err(|e| ApiError::Invalid(format!("Bad image MIME type: {}", e)))?;
            form = form.part("img", part);
        }

        tracing::debug!(profile_id = profile.id, "Updating profile");
        let response = self
            .http
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, auth_header(token))
            .multipart(form)
            .send()
            .await?;
        check_response_json(response).await
    }

    // ─── Tasks ───────────────────────────────────────────────────────────────

    pub async fn list_tasks(&self, token: &str) -> Result<Vec<ReadTask>> {
        self.get_json("/api/tasks/", token).await
    }

    pub async fn list_users(&self, token: &str) -> Result<Vec<User>> {
        self.get_json("/api/users/", token).await
    }

    pub async fn list_categories(&self, token: &str) -> Result<Vec<Category>> {
        self.get_json("/api/category/", token).await
    }

    pub async fn create_category(&self, token: &str, item: &str) -> Result<Category> {
        let body = serde_json::json!({ "item": item });
        self.send_json(reqwest::Method::POST, "/api/category/", token, &body)
            .await
    }

    pub async fn create_task(&self, token: &str, draft: &PostTask) -> Result<ReadTask> {
        self.send_json(reqwest::Method::POST, "/api/tasks/", token, draft)
            .await
    }

    pub async fn update_task(&self, token: &str, draft: &PostTask) -> Result<ReadTask> {
        let path = format!("/api/tasks/{}/", draft.id);
        self.send_json(reqwest::Method::PUT, &path, token, draft)
            .await
    }

    /// Delete a task. Returns the deleted id.
    pub async fn delete_task(&self, token: &str, id: u64) -> Result<u64> {
        let url = self.url(&format!("/api/tasks/{}/", id));
        tracing::debug!(task_id = id, "Deleting task");

        let response = self
            .http
            .delete(&url)
            .header(reqwest::header::AUTHORIZATION, auth_header(token))
            .send()
            .await?;
        check_response(response).await?;
        Ok(id)
    }

    // ─── Helpers ─────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Authorized GET with JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, auth_header(token))
            .send()
            .await?;
        check_response_json(response).await
    }

    /// Authorized request with a JSON body and JSON response.
    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "Sending");

        let response = self
            .http
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, auth_header(token))
            .json(body)
            .send()
            .await?;
        check_response_json(response).await
    }
}

/// Value of the `Authorization` header for `token`.
pub fn auth_header(token: &str) -> String {
    format!("{} {}", AUTH_SCHEME, token)
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    if status.as_u16() == 401 || status.as_u16() == 403 {
        tracing::warn!(status = status.as_u16(), "Session rejected by server");
        return Err(ApiError::Unauthorized(status.as_u16()));
    }

    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Check response and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let response = check_response(response).await?;
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(format!("JSON parse error: {}", e)))
}
