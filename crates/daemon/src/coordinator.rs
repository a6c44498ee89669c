// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job catalog and execution bookkeeping behind the REST surface.
//!
//! All operations are synchronous and may block on storage I/O; the API
//! layer runs them on the blocking pool. Every operation touching one job
//! holds that job's critical section, so a delete cannot interleave with an
//! admission or a status change of the same job. Names are resolved before a
//! section is taken, so unknown names never enter the lock table.

use std::sync::Arc;
use std::time::Instant;

use jg_core::{
    Admission, Clock, Controller, Error, Execution, ExecutionId, ExecutionStore, Job, JobAction,
    JobLocks, JobStore, SystemClock,
};
use jg_wire::{CreateJobRequest, JobResponse, StartExecutionRequest};
use tracing::info;

pub struct Coordinator<C: Clock = SystemClock> {
    jobs: Arc<dyn JobStore>,
    executions: Arc<dyn ExecutionStore>,
    admission: Arc<dyn Admission>,
    clock: C,
    locks: JobLocks,
}

impl Coordinator<SystemClock> {
    /// Coordinator admitting through a [`Controller`] over `executions`.
    pub fn new(jobs: Arc<dyn JobStore>, executions: Arc<dyn ExecutionStore>) -> Self {
        let admission = Arc::new(Controller::new(Arc::clone(&executions)));
        Self::with_admission(jobs, executions, admission, SystemClock)
    }
}

impl<C: Clock> Coordinator<C> {
    pub fn with_admission(
        jobs: Arc<dyn JobStore>,
        executions: Arc<dyn ExecutionStore>,
        admission: Arc<dyn Admission>,
        clock: C,
    ) -> Self {
        Self { jobs, executions, admission, clock, locks: JobLocks::default() }
    }

    /// Register a new job. Names are unique.
    pub fn create_job(&self, request: CreateJobRequest) -> Result<Job, Error> {
        let job = request.into_job(self.clock.now())?;
        let section = self.locks.get(&job.name);
        let _guard = section.lock();

        if self.jobs.get_job(&job.name)?.is_some() {
            return Err(Error::AlreadyExists(job.name));
        }
        self.jobs.put_job(&job)?;
        info!(job = %job.name, lock_mode = %job.lock_mode, status = %job.status, "job created");
        Ok(job)
    }

    pub fn list_jobs(&self) -> Result<Vec<Job>, Error> {
        Ok(self.jobs.list_jobs()?)
    }

    /// A job together with its recorded executions.
    pub fn get_job(&self, name: &str) -> Result<JobResponse, Error> {
        let job = self.find_job(name)?;
        let executions = self.executions.list_executions(name)?;
        Ok(JobResponse { job, executions })
    }

    /// Delete a job that has no running executions. Leftover non-running
    /// execution records are removed with it.
    pub fn delete_job(&self, name: &str) -> Result<(), Error> {
        self.find_job(name)?;
        let section = self.locks.get(name);
        let _guard = section.lock();

        self.find_job(name)?;
        let executions = self.executions.list_executions(name)?;
        if let Some(running) = executions.iter().find(|e| e.is_running()) {
            return Err(Error::Locked { blocker: Some(running.id) });
        }

        let purged = self.executions.delete_executions_by_job(name)?;
        self.jobs.delete_job(name)?;
        info!(job = name, purged, "job deleted");
        Ok(())
    }

    /// Apply `start` or `pause` to a job.
    pub fn apply_action(&self, name: &str, action: &str) -> Result<Job, Error> {
        let action: JobAction = action.parse()?;
        self.find_job(name)?;
        let section = self.locks.get(name);
        let _guard = section.lock();

        let mut job = self.find_job(name)?;
        action.apply(&mut job)?;
        self.jobs.put_job(&job)?;
        info!(job = name, %action, status = %job.status, "job status changed");
        Ok(job)
    }

    /// Admit a new execution of the requested job. Nothing is recorded
    /// unless admission commits before `deadline`.
    pub fn start_execution(
        &self,
        request: StartExecutionRequest,
        deadline: Instant,
    ) -> Result<Execution, Error> {
        let (name, args) = request.into_parts();
        if name.is_empty() {
            return Err(Error::invalid("job is required"));
        }
        self.find_job(&name)?;
        let section = self.locks.get(&name);
        let Some(_guard) = section.try_lock_until(deadline) else {
            return Err(Error::DeadlineExceeded);
        };

        let job = self.find_job(&name)?;
        self.admission.start(&job, args, deadline)
    }

    /// Record that the execution with the given id has exited.
    pub fn finish_execution(&self, id: &str) -> Result<Execution, Error> {
        let id: ExecutionId = id.parse()?;
        self.admission.finish(&id)
    }

    fn find_job(&self, name: &str) -> Result<Job, Error> {
        self.jobs.get_job(name)?.ok_or_else(|| Error::NotFound(format!("job `{}`", name)))
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
