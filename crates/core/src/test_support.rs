// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::{
    Clock, Execution, ExecutionId, ExecutionStore, FakeClock, Job, JobStatus, JobStore, LockMode,
    StartArguments, StoreError,
};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core model types.
pub mod strategies {
    use crate::LockMode;
    use proptest::prelude::*;

    pub fn arb_lock_mode() -> impl Strategy<Value = LockMode> {
        prop_oneof![Just(LockMode::Free), Just(LockMode::Host), Just(LockMode::Cluster)]
    }

    /// A start request from one of a handful of hosts.
    pub fn arb_host() -> impl Strategy<Value = String> {
        prop_oneof![Just("a"), Just("b"), Just("c")].prop_map(str::to_string)
    }
}

// ── Factory functions ───────────────────────────────────────────────────

pub fn job(name: &str, mode: LockMode) -> Job {
    Job::new(name, mode, FakeClock::new().now())
}

pub fn paused_job(name: &str, mode: LockMode) -> Job {
    Job { status: JobStatus::Paused, ..job(name, mode) }
}

/// A running execution of `job` on `host` with `pid`.
pub fn running(job: &str, host: &str, pid: u32) -> Execution {
    Execution::running(
        ExecutionId::new(),
        job,
        StartArguments::on_host(host, pid).command("sh run.sh"),
        FakeClock::new().now(),
    )
}

// ── In-memory store ─────────────────────────────────────────────────────

/// In-memory [`JobStore`] + [`ExecutionStore`].
///
/// Jobs are kept in name order and executions in composite-key order to
/// mirror the ordering of the on-disk store.
#[derive(Default)]
pub struct MemoryStore {
    jobs: Mutex<Vec<Job>>,
    executions: Mutex<Vec<Execution>>,
    fail_writes: AtomicBool,
    write_delay: Mutex<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with an IO error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write sleep for `delay` first.
    pub fn delay_writes(&self, delay: Duration) {
        *self.write_delay.lock() = delay;
    }

    pub fn executions(&self) -> Vec<Execution> {
        self.executions.lock().clone()
    }

    fn check_write(&self) -> Result<(), StoreError> {
        let delay = *self.write_delay.lock();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("injected write failure")));
        }
        Ok(())
    }
}

fn composite_key(e: &Execution) -> (String, String, u32) {
    (e.job.clone(), e.host.clone().unwrap_or_default(), e.pid.unwrap_or(0))
}

impl JobStore for MemoryStore {
    fn put_job(&self, job: &Job) -> Result<(), StoreError> {
        self.check_write()?;
        let mut jobs = self.jobs.lock();
        match jobs.binary_search_by(|j| j.name.cmp(&job.name)) {
            Ok(i) => jobs[i] = job.clone(),
            Err(i) => jobs.insert(i, job.clone()),
        }
        Ok(())
    }

    fn get_job(&self, name: &str) -> Result<Option<Job>, StoreError> {
        Ok(self.jobs.lock().iter().find(|j| j.name == name).cloned())
    }

    fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.jobs.lock().clone())
    }

    fn delete_job(&self, name: &str) -> Result<(), StoreError> {
        self.check_write()?;
        self.jobs.lock().retain(|j| j.name != name);
        Ok(())
    }
}

impl ExecutionStore for MemoryStore {
    fn put_execution(&self, execution: &Execution) -> Result<(), StoreError> {
        self.check_write()?;
        let key = composite_key(execution);
        let mut executions = self.executions.lock();
        match executions.binary_search_by(|e| composite_key(e).cmp(&key)) {
            Ok(i) => executions[i] = execution.clone(),
            Err(i) => executions.insert(i, execution.clone()),
        }
        Ok(())
    }

    fn get_execution(&self, id: &ExecutionId) -> Result<Option<Execution>, StoreError> {
        Ok(self.executions.lock().iter().find(|e| e.id == *id).cloned())
    }

    fn list_executions(&self, job: &str) -> Result<Vec<Execution>, StoreError> {
        Ok(self.executions.lock().iter().filter(|e| e.job == job).cloned().collect())
    }

    fn delete_execution(&self, id: &ExecutionId) -> Result<Option<Execution>, StoreError> {
        self.check_write()?;
        let mut executions = self.executions.lock();
        let removed = executions.iter().position(|e| e.id == *id).map(|i| executions.remove(i));
        Ok(removed)
    }

    fn delete_executions_by_job(&self, job: &str) -> Result<usize, StoreError> {
        self.check_write()?;
        let mut executions = self.executions.lock();
        let before = executions.len();
        executions.retain(|e| e.job != job);
        Ok(before - executions.len())
    }
}
