// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Task and category models.
//!
//! The read-shape carries denormalized owner/responsible/category names; the
//! write-shape submitted to the server carries only the foreign-key ids.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Task as returned by the server.
///
/// `ReadTask::default()` is the "nothing selected" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadTask {
    pub id: u64,
    #[serde(rename = "task")]
    pub title: String,
    pub description: String,
    #[serde(rename = "criteria")]
    pub acceptance_criteria: String,
    #[serde(rename = "owner")]
    pub owner_id: u64,
    #[serde(rename = "owner_username")]
    pub owner_name: String,
    #[serde(rename = "responsible")]
    pub responsible_id: u64,
    #[serde(rename = "responsible_username")]
    pub responsible_name: String,
    pub estimate: i64,
    #[serde(rename = "category")]
    pub category_id: u64,
    #[serde(rename = "category_item")]
    pub category_name: String,
    /// Status code as stored by the server ("1", "2", ...)
    pub status: String,
    /// Human readable status label
    pub status_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ReadTask {
    /// Write-shape of this task, e.g. to start editing it.
    pub fn to_draft(&self) -> PostTask {
        PostTask {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            acceptance_criteria: self.acceptance_criteria.clone(),
            responsible_id: self.responsible_id,
            estimate: self.estimate,
            category_id: self.category_id,
            status: self.status.clone(),
        }
    }
}

/// Task as submitted for create/update.
///
/// `PostTask::default()` is the "no draft" sentinel. A draft with id 0 has
/// not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostTask {
    pub id: u64,
    #[serde(rename = "task")]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(rename = "criteria")]
    #[validate(length(min = 1, message = "acceptance criteria are required"))]
    pub acceptance_criteria: String,
    #[serde(rename = "responsible")]
    pub responsible_id: u64,
    #[validate(range(min = 0, message = "estimate must not be negative"))]
    pub estimate: i64,
    #[serde(rename = "category")]
    pub category_id: u64,
    pub status: String,
}

impl PostTask {
    /// True for drafts that were never saved.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

/// Task category lookup entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub item: String,
}
