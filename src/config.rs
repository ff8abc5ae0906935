// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Default location of the durable token file.
pub const DEFAULT_TOKEN_FILE: &str = ".taskboard/token.json";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the task-board REST API (no trailing slash)
    pub api_url: String,
    /// Where the access token is persisted between runs
    pub token_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url =
            env::var("TASKBOARD_API_URL").map_err(|_| ConfigError::Missing("TASKBOARD_API_URL"))?;
        let api_url = normalize_base_url(&api_url)?;

        Ok(Self {
            api_url,
            token_file: env::var("TASKBOARD_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_FILE)),
        })
    }

    /// Config for tests pointing at a local fake API.
    pub fn test_default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("API URL must start with http:// or https://: {0}")]
    InvalidUrl(String),
}
