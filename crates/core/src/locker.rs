// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock-mode admission predicate.
//!
//! Pure decision over a job, the proposed start arguments and the currently
//! recorded executions of that job. Persisting the outcome is the
//! controller's concern.

use crate::{Error, Execution, ExecutionId, Job, LockMode, StartArguments};

/// Decides whether a new execution may start.
#[derive(Debug, Clone, Copy, Default)]
pub struct Locker;

impl Locker {
    pub fn new() -> Self {
        Self
    }

    /// Admit or reject a start request.
    ///
    /// On admission returns a fresh execution id. Rejections:
    /// - [`Error::Paused`] when the job is paused,
    /// - [`Error::Invalid`] when `host` mode is used without a non-empty host,
    /// - [`Error::Locked`] carrying the first blocking running execution.
    ///
    /// `pid` never takes part in the predicate.
    pub fn lock(
        &self,
        job: &Job,
        args: &StartArguments,
        executions: &[Execution],
    ) -> Result<ExecutionId, Error> {
        if job.is_paused() {
            return Err(Error::Paused(job.name.clone()));
        }

        let blocker = match job.lock_mode {
            LockMode::Free => None,
            LockMode::Cluster => executions.iter().find(|e| e.is_running()),
            LockMode::Host => {
                let host = required_host(args)?;
                executions.iter().find(|e| e.is_running() && e.runs_on(host))
            }
        };

        match blocker {
            Some(execution) => Err(Error::Locked { blocker: Some(execution.id) }),
            None => Ok(ExecutionId::new()),
        }
    }
}

fn required_host(args: &StartArguments) -> Result<&str, Error> {
    match args.host.as_deref() {
        None => Err(Error::invalid("host is required for `host` lock mode")),
        Some("") => Err(Error::invalid("host must not be empty for `host` lock mode")),
        Some(host) => Ok(host),
    }
}

#[cfg(test)]
#[path = "locker_tests.rs"]
mod tests;
