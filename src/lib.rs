// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Taskboard client: state layer for the task-board web API
//!
//! This crate provides the client-side auth and task containers, the REST
//! client that feeds them, and a session shell that persists the access
//! token and publishes navigation intents.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod store;

pub use error::ApiError;
pub use session::Session;
pub use store::{Effect, Route};
