// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Admission controller: read running executions, decide, record.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::{Error, Execution, ExecutionId, ExecutionStore, Job, Locker, StartArguments};

/// Start/finish contract consumed by the coordinator.
pub trait Admission: Send + Sync {
    /// Admit a new execution of `job` or reject it.
    ///
    /// The execution is recorded only if admission completes before
    /// `deadline`; otherwise nothing is left behind and
    /// [`Error::DeadlineExceeded`] is returned.
    fn start(&self, job: &Job, args: StartArguments, deadline: Instant) -> Result<Execution, Error>;

    /// Remove a running execution by id, returning the removed record.
    fn finish(&self, id: &ExecutionId) -> Result<Execution, Error>;
}

/// [`Admission`] backed by an [`ExecutionStore`].
///
/// Each start runs its read-decide-write window under a mutex keyed by job
/// name, so two concurrent starts of one job observe each other.
pub struct Controller<C: Clock = SystemClock> {
    executions: Arc<dyn ExecutionStore>,
    locker: Locker,
    clock: C,
    job_locks: JobLocks,
}

impl Controller<SystemClock> {
    pub fn new(executions: Arc<dyn ExecutionStore>) -> Self {
        Self::with_clock(executions, SystemClock)
    }
}

impl<C: Clock> Controller<C> {
    pub fn with_clock(executions: Arc<dyn ExecutionStore>, clock: C) -> Self {
        Self { executions, locker: Locker::new(), clock, job_locks: JobLocks::default() }
    }
}

impl<C: Clock> Admission for Controller<C> {
    fn start(&self, job: &Job, args: StartArguments, deadline: Instant) -> Result<Execution, Error> {
        let section = self.job_locks.get(&job.name);
        let Some(_guard) = section.try_lock_until(deadline) else {
            return Err(Error::DeadlineExceeded);
        };

        let executions = self.executions.list_executions(&job.name)?;
        let id = match self.locker.lock(job, &args, &executions) {
            Ok(id) => id,
            Err(e) => {
                debug!(job = %job.name, error = %e, blocker = ?blocker_of(&e), "start rejected");
                return Err(e);
            }
        };
        if Instant::now() >= deadline {
            return Err(Error::DeadlineExceeded);
        }

        let execution = Execution::running(id, job.name.clone(), args, self.clock.now());
        self.executions.put_execution(&execution)?;
        if Instant::now() > deadline {
            // A start the caller gave up on leaves no record.
            warn!(job = %job.name, id = %execution.id, "deadline passed while recording, discarding execution");
            self.executions.delete_execution(&execution.id)?;
            return Err(Error::DeadlineExceeded);
        }
        info!(
            job = %job.name,
            id = %execution.id,
            host = execution.host.as_deref().unwrap_or("-"),
            pid = ?execution.pid,
            "execution started"
        );
        Ok(execution)
    }

    fn finish(&self, id: &ExecutionId) -> Result<Execution, Error> {
        let Some(execution) = self.executions.delete_execution(id)? else {
            return Err(Error::NotFound(format!("execution {}", id)));
        };
        info!(job = %execution.job, id = %id, "execution finished");
        Ok(execution)
    }
}

/// Lazily created per-job critical sections.
///
/// The table holds weak references; a section lives only while some caller
/// holds it, so names that are no longer in use do not accumulate.
#[derive(Default)]
pub struct JobLocks {
    inner: Mutex<HashMap<String, Weak<Mutex<()>>>>,
}

impl JobLocks {
    /// The mutex guarding `job`; callers lock it for the critical section.
    pub fn get(&self, job: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock();
        map.retain(|_, section| section.strong_count() > 0);
        if let Some(section) = map.get(job).and_then(Weak::upgrade) {
            return section;
        }
        let section = Arc::new(Mutex::new(()));
        map.insert(job.to_string(), Arc::downgrade(&section));
        section
    }

    /// Number of names with a live section.
    #[cfg(any(test, feature = "test-support"))]
    pub fn len(&self) -> usize {
        self.inner.lock().values().filter(|s| s.strong_count() > 0).count()
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn blocker_of(e: &Error) -> Option<ExecutionId> {
    match e {
        Error::Locked { blocker } => *blocker,
        _ => None,
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
