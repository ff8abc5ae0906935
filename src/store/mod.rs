// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! State containers.
//!
//! Each container pairs a plain state struct with a pure `reduce` transition
//! keyed by operation results. Side effects never happen inside `reduce`; they
//! are returned as [`Effect`]s for the surrounding shell to carry out.

pub mod auth;
pub mod task;

pub use auth::{AuthAction, AuthState, AuthStore};
pub use task::{TaskAction, TaskOp, TaskState, TaskStore};

/// Client-side routes the state layer may navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login page
    Root,
    /// Authenticated landing page
    Tasks,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Tasks => "/tasks",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Work requested by a state transition, carried out after the commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Persist the access token in durable storage.
    PersistToken(String),
    /// Remove the access token from durable storage.
    ClearToken,
    /// Full navigation to a route.
    Navigate(Route),
}
