// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator startup: open storage, wire the coordinator, bind.

use std::sync::Arc;
use std::time::Instant;

use jg_core::{ExecutionStore, JobStore, StoreError};
use jg_storage::{Db, DbOptions, ExecutionStorage, JobStorage};
use tokio::net::TcpListener;
use tracing::info;

use super::{Config, DaemonState, LifecycleError, StartupResult};
use crate::Coordinator;

/// Start the daemon
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    let db = match Db::open_with(&config.db_path, DbOptions { tx_timeout: config.tx_timeout }) {
        Ok(db) => Arc::new(db),
        Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::WouldBlock => {
            return Err(LifecycleError::LockFailed(e));
        }
        Err(e) => return Err(e.into()),
    };
    db.compact()?;

    let jobs: Arc<dyn JobStore> = Arc::new(JobStorage::new(Arc::clone(&db))?);
    let executions: Arc<dyn ExecutionStore> = Arc::new(ExecutionStorage::new(Arc::clone(&db))?);
    let coordinator = Arc::new(Coordinator::new(jobs, executions));

    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|e| LifecycleError::BindFailed(config.listen, e))?;
    let local = listener.local_addr()?;
    info!(addr = %local, db = %config.db_path.display(), "coordinator listening");

    Ok(StartupResult {
        daemon: DaemonState { config: config.clone(), db, coordinator, start_time: Instant::now() },
        listener,
    })
}
