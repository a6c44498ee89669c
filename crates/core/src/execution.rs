// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution records: one admitted run of a job on a (host, pid).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ExecutionId;

/// Lifecycle status of an execution.
///
/// Only `Running` is ever written by the controller; the terminal variants
/// are kept so stored records from richer producers still decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Running,
    Succeeded,
    Failed,
}

crate::string_enum! {
    ExecutionStatus("execution status") {
        Running => "running",
        Succeeded => "succeeded",
        Failed => "failed",
    }
}

/// A record of one admitted run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    pub id: ExecutionId,
    pub job: String,
    pub command: Option<String>,
    pub pid: Option<u32>,
    pub host: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub status: ExecutionStatus,
    pub msg: Option<String>,
}

impl Execution {
    /// Materialize a freshly admitted execution.
    pub fn running(
        id: ExecutionId,
        job: impl Into<String>,
        args: StartArguments,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            job: job.into(),
            command: args.command,
            pid: args.pid,
            host: args.host,
            started_at: args.started_at.unwrap_or(now),
            finished_at: None,
            status: ExecutionStatus::Running,
            msg: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == ExecutionStatus::Running
    }

    /// True when this execution runs on `host`. An execution without a host
    /// never matches.
    pub fn runs_on(&self, host: &str) -> bool {
        self.host.as_deref() == Some(host)
    }
}

/// Fields supplied by an agent when it asks to start an execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartArguments {
    pub command: Option<String>,
    pub pid: Option<u32>,
    pub host: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

impl StartArguments {
    pub fn on_host(host: impl Into<String>, pid: u32) -> Self {
        Self { host: Some(host.into()), pid: Some(pid), ..Self::default() }
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }
}
