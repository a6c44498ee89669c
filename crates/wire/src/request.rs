// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jg_core::{Error, Job, JobStatus, LockMode, StartArguments};

/// Body of `POST /job`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CreateJobRequest {
    pub fn new(name: impl Into<String>, lock_mode: LockMode) -> Self {
        Self { name: name.into(), lock_mode: Some(lock_mode.to_string()), status: None }
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = Some(status.to_string());
        self
    }

    /// Validate the request and build the job it describes.
    ///
    /// An absent or empty `lockMode` means `host`; an absent or empty
    /// `status` means `active`.
    pub fn into_job(self, created_at: DateTime<Utc>) -> Result<Job, Error> {
        Job::validate_name(&self.name)?;
        let lock_mode = match non_empty(self.lock_mode) {
            Some(s) => s.parse()?,
            None => LockMode::Host,
        };
        let status = match non_empty(self.status) {
            Some(s) => s.parse()?,
            None => JobStatus::Active,
        };
        Ok(Job { status, ..Job::new(self.name, lock_mode, created_at) })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Body of `POST /executions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartExecutionRequest {
    #[serde(default)]
    pub job: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

impl StartExecutionRequest {
    pub fn new(job: impl Into<String>, args: StartArguments) -> Self {
        Self {
            job: job.into(),
            pid: args.pid,
            host: args.host,
            command: args.command,
            started_at: args.started_at,
        }
    }

    /// Split into the job name and the admission arguments.
    pub fn into_parts(self) -> (String, StartArguments) {
        let args = StartArguments {
            command: self.command,
            pid: self.pid,
            host: self.host,
            started_at: self.started_at,
        };
        (self.job, args)
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
