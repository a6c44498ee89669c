// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds surfaced by the store, the admission controller and the coordinator.

use std::time::Duration;
use thiserror::Error;

use crate::ExecutionId;

/// Failures of the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transaction aborted: write lock not acquired within {0:?}")]
    Timeout(Duration),

    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("corrupt record at {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Outcome of a rejected coordinator operation.
///
/// `Invalid`, `Locked` and `Paused` are distinct values so callers can map
/// them to distinct responses.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("{0}")]
    Invalid(String),

    /// Admission or deletion blocked by a running execution.
    #[error("{}", locked_message(.blocker))]
    Locked { blocker: Option<ExecutionId> },

    #[error("job `{0}` is paused")]
    Paused(String),

    /// The caller's deadline passed before the operation committed.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

fn locked_message(blocker: &Option<ExecutionId>) -> String {
    match blocker {
        Some(id) => format!("job is locked by execution {}", id),
        None => "job is locked".to_string(),
    }
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::Invalid(msg.into())
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Error::Locked { .. })
    }
}
