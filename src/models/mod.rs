// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Wire and state models for the task-board API.

pub mod auth;
pub mod task;

pub use auth::{Credential, ImageUpload, Jwt, LoginUser, PostProfile, Profile, User};
pub use task::{Category, PostTask, ReadTask};
