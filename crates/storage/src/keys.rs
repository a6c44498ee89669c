// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key layout of the `jobs` bucket.
//!
//! ```text
//! job:<name>
//! execution:<job>:<host>:<pid>
//! ```
//!
//! An absent host encodes as the empty string and an absent pid as `0`.

use jg_core::Execution;

pub const JOB_PREFIX: &str = "job:";
pub const EXECUTION_PREFIX: &str = "execution:";

pub fn job_key(name: &str) -> String {
    format!("{}{}", JOB_PREFIX, name)
}

pub fn execution_key(execution: &Execution) -> String {
    format!(
        "{}{}:{}:{}",
        EXECUTION_PREFIX,
        execution.job,
        execution.host.as_deref().unwrap_or_default(),
        execution.pid.unwrap_or(0)
    )
}

/// Prefix shared by every execution key of `job`. The trailing separator
/// keeps `job-a` from matching `job-ab`.
pub fn execution_prefix(job: &str) -> String {
    format!("{}{}:", EXECUTION_PREFIX, job)
}
