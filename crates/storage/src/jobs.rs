// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`JobStore`] over the embedded database.

use std::sync::Arc;

use jg_core::{Job, JobStore, StoreError};

use crate::db::{Db, JOBS_BUCKET};
use crate::keys::{job_key, JOB_PREFIX};

/// Jobs stored as JSON under `job:<name>`.
#[derive(Clone)]
pub struct JobStorage {
    db: Arc<Db>,
}

impl JobStorage {
    /// Wrap `db`, creating the `jobs` bucket if it does not exist yet.
    pub fn new(db: Arc<Db>) -> Result<Self, StoreError> {
        db.update(|tx| {
            tx.create_bucket_if_not_exists(JOBS_BUCKET);
            Ok(())
        })?;
        Ok(Self { db })
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(key: &str, raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw)
        .map_err(|e| StoreError::Corrupt { key: key.to_string(), reason: e.to_string() })
}

impl JobStore for JobStorage {
    fn put_job(&self, job: &Job) -> Result<(), StoreError> {
        let value = serde_json::to_string(job)?;
        self.db.update(|tx| tx.put(JOBS_BUCKET, &job_key(&job.name), value))
    }

    fn get_job(&self, name: &str) -> Result<Option<Job>, StoreError> {
        let key = job_key(name);
        self.db.view(|tx| tx.get(JOBS_BUCKET, &key)?.map(|raw| decode(&key, raw)).transpose())
    }

    fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        self.db.view(|tx| tx.scan_prefix(JOBS_BUCKET, JOB_PREFIX)?.map(|(k, v)| decode(k, v)).collect())
    }

    fn delete_job(&self, name: &str) -> Result<(), StoreError> {
        self.db.update(|tx| tx.delete(JOBS_BUCKET, &job_key(name)).map(|_| ()))
    }
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
