// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator lifecycle: startup, serving, graceful shutdown.

mod startup;
pub use startup::startup;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use jg_core::StoreError;
use jg_storage::Db;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::{api, env, Coordinator};

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the REST surface binds to
    pub listen: SocketAddr,
    /// Path to the database file
    pub db_path: PathBuf,
    /// How long in-flight requests may drain after a shutdown signal
    pub drain_timeout: Duration,
    /// Per-request deadline
    pub request_timeout: Duration,
    /// Database lock deadline
    pub tx_timeout: Duration,
}

impl Config {
    /// Build a configuration from command-line values, with timeouts taken
    /// from the environment.
    pub fn new(listen: &str, db_path: impl Into<PathBuf>) -> Result<Self, LifecycleError> {
        Ok(Self {
            listen: parse_listen(listen)?,
            db_path: db_path.into(),
            drain_timeout: env::drain_timeout(),
            request_timeout: env::request_timeout(),
            tx_timeout: env::tx_timeout(),
        })
    }
}

/// Parse a listen address. A bare `:port` binds every interface.
pub fn parse_listen(listen: &str) -> Result<SocketAddr, LifecycleError> {
    let full = match listen.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{}", port),
        None => listen.to_string(),
    };
    full.parse().map_err(|_| LifecycleError::InvalidListen(listen.to_string()))
}

/// Daemon state during operation.
pub struct DaemonState {
    pub config: Config,
    pub db: Arc<Db>,
    pub coordinator: Arc<Coordinator>,
    pub start_time: Instant,
}

impl DaemonState {
    /// Flush the database to a compact log. The file lock is released when
    /// the last handle drops.
    pub fn shutdown(&self) -> Result<(), LifecycleError> {
        info!("shutting down coordinator");
        self.db.compact()?;
        info!(uptime_secs = self.start_time.elapsed().as_secs(), "coordinator shutdown complete");
        Ok(())
    }
}

/// Result of daemon startup: the state plus the bound listener.
pub struct StartupResult {
    pub daemon: DaemonState,
    pub listener: TcpListener,
}

/// Serve until `shutdown` fires, give in-flight requests the drain timeout
/// to finish, then shut the daemon down.
pub async fn run(startup: StartupResult, shutdown: CancellationToken) -> Result<(), LifecycleError> {
    let StartupResult { daemon, listener } = startup;
    let app = api::router(Arc::clone(&daemon.coordinator), daemon.config.request_timeout);
    let drain = daemon.config.drain_timeout;

    let signal = shutdown.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app).with_graceful_shutdown(async move { signal.cancelled().await }).await
    });

    let served = tokio::select! {
        res = &mut server => res,
        _ = shutdown.cancelled() => match tokio::time::timeout(drain, &mut server).await {
            Ok(res) => res,
            Err(_) => {
                warn!(drain_ms = drain.as_millis() as u64, "drain timeout elapsed, dropping open connections");
                server.abort();
                Ok(Ok(()))
            }
        },
    };

    let result = match served {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(LifecycleError::Io(e)),
        Err(e) => Err(LifecycleError::Runtime(e.to_string())),
    };
    if let Err(e) = &result {
        error!(error = %e, "server stopped with error");
    }
    daemon.shutdown()?;
    result
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("invalid listen address `{0}`")]
    InvalidListen(String),

    #[error("failed to lock database: coordinator already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("failed to bind {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("runtime error: {0}")]
    Runtime(String),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
