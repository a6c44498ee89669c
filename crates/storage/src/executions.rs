// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`ExecutionStore`] over the embedded database.
//!
//! Records live under `execution:<job>:<host>:<pid>`; lookups by id scan
//! the execution keyspace.

use std::sync::Arc;

use jg_core::{Execution, ExecutionId, ExecutionStore, StoreError};
use tracing::debug;

use crate::db::{Db, JOBS_BUCKET};
use crate::jobs::decode;
use crate::keys::{execution_key, execution_prefix, EXECUTION_PREFIX};

#[derive(Clone)]
pub struct ExecutionStorage {
    db: Arc<Db>,
}

impl ExecutionStorage {
    /// Wrap `db`, creating the `jobs` bucket if it does not exist yet.
    pub fn new(db: Arc<Db>) -> Result<Self, StoreError> {
        db.update(|tx| {
            tx.create_bucket_if_not_exists(JOBS_BUCKET);
            Ok(())
        })?;
        Ok(Self { db })
    }
}

impl ExecutionStore for ExecutionStorage {
    fn put_execution(&self, execution: &Execution) -> Result<(), StoreError> {
        let value = serde_json::to_string(execution)?;
        self.db.update(|tx| tx.put(JOBS_BUCKET, &execution_key(execution), value))
    }

    fn get_execution(&self, id: &ExecutionId) -> Result<Option<Execution>, StoreError> {
        self.db.view(|tx| {
            for (key, raw) in tx.scan_prefix(JOBS_BUCKET, EXECUTION_PREFIX)? {
                let execution: Execution = decode(key, raw)?;
                if execution.id == *id {
                    return Ok(Some(execution));
                }
            }
            Ok(None)
        })
    }

    fn list_executions(&self, job: &str) -> Result<Vec<Execution>, StoreError> {
        let prefix = execution_prefix(job);
        self.db.view(|tx| tx.scan_prefix(JOBS_BUCKET, &prefix)?.map(|(k, v)| decode(k, v)).collect())
    }

    fn delete_execution(&self, id: &ExecutionId) -> Result<Option<Execution>, StoreError> {
        self.db.update(|tx| {
            for (key, raw) in tx.scan_prefix(JOBS_BUCKET, EXECUTION_PREFIX)? {
                let execution: Execution = decode(&key, &raw)?;
                if execution.id == *id {
                    tx.delete(JOBS_BUCKET, &key)?;
                    return Ok(Some(execution));
                }
            }
            Ok(None)
        })
    }

    fn delete_executions_by_job(&self, job: &str) -> Result<usize, StoreError> {
        let prefix = execution_prefix(job);
        let removed = self.db.update(|tx| {
            let keys = tx.scan_prefix(JOBS_BUCKET, &prefix)?;
            for (key, _) in &keys {
                tx.delete(JOBS_BUCKET, key)?;
            }
            Ok(keys.len())
        })?;
        if removed > 0 {
            debug!(job, removed, "purged executions");
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "executions_tests.rs"]
mod tests;
