// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence contracts consumed by the controller and the coordinator.
//!
//! Implementations perform no business-rule validation; uniqueness on job
//! creation and the delete safety check are enforced by callers.

use crate::{Execution, ExecutionId, Job, StoreError};

/// Durable collection of jobs keyed by name.
pub trait JobStore: Send + Sync {
    /// Upsert.
    fn put_job(&self, job: &Job) -> Result<(), StoreError>;

    fn get_job(&self, name: &str) -> Result<Option<Job>, StoreError>;

    /// All jobs in storage order.
    fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;

    /// Idempotent; does not cascade to executions.
    fn delete_job(&self, name: &str) -> Result<(), StoreError>;
}

/// Durable collection of executions keyed by `(job, host, pid)`.
pub trait ExecutionStore: Send + Sync {
    /// Upsert by composite key.
    fn put_execution(&self, execution: &Execution) -> Result<(), StoreError>;

    fn get_execution(&self, id: &ExecutionId) -> Result<Option<Execution>, StoreError>;

    /// Executions of one job in storage order.
    fn list_executions(&self, job: &str) -> Result<Vec<Execution>, StoreError>;

    /// Remove by id, returning the removed record if one existed.
    fn delete_execution(&self, id: &ExecutionId) -> Result<Option<Execution>, StoreError>;

    /// Remove every execution of a job, returning how many were removed.
    fn delete_executions_by_job(&self, job: &str) -> Result<usize, StoreError>;
}
