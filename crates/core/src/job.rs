// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job definition and its status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Separator used by storage keys; forbidden inside job names.
pub const KEY_SEPARATOR: char = ':';

/// Admission predicate applied when a new execution of a job starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// Unbounded concurrent executions
    Free,
    /// At most one running execution per host
    Host,
    /// At most one running execution across all hosts
    Cluster,
}

crate::string_enum! {
    LockMode("lock mode") {
        Free => "free",
        Host => "host",
        Cluster => "cluster",
    }
}

/// Whether a job currently admits new executions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Paused,
}

crate::string_enum! {
    JobStatus("job status") {
        Active => "active",
        Paused => "paused",
    }
}

/// A named policy object describing how executions are admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub lock_mode: LockMode,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create an active job.
    pub fn new(name: impl Into<String>, lock_mode: LockMode, created_at: DateTime<Utc>) -> Self {
        Self { name: name.into(), lock_mode, status: JobStatus::Active, created_at }
    }

    /// Check that `name` can be used as a job name (and as a storage key segment).
    pub fn validate_name(name: &str) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::invalid("job name is required"));
        }
        if name.contains(KEY_SEPARATOR) {
            return Err(Error::invalid(format!(
                "job name `{}` must not contain `{}`",
                name, KEY_SEPARATOR
            )));
        }
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.status == JobStatus::Paused
    }

    /// Transition paused → active.
    pub fn start(&mut self) -> Result<(), Error> {
        if self.status == JobStatus::Active {
            return Err(Error::invalid("job is already active"));
        }
        self.status = JobStatus::Active;
        Ok(())
    }

    /// Transition active → paused.
    pub fn pause(&mut self) -> Result<(), Error> {
        if self.status == JobStatus::Paused {
            return Err(Error::invalid("job is already paused"));
        }
        self.status = JobStatus::Paused;
        Ok(())
    }
}

/// Status action accepted by `POST /job/:name/:action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Start,
    Pause,
}

crate::string_enum! {
    JobAction("action") {
        Start => "start",
        Pause => "pause",
    }
}

impl JobAction {
    /// Apply this action to `job`, rejecting no-op transitions.
    pub fn apply(self, job: &mut Job) -> Result<(), Error> {
        match self {
            JobAction::Start => job.start(),
            JobAction::Pause => job.pause(),
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
