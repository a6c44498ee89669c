// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shutdown drain timeout (default 5s, configurable via `JG_DRAIN_TIMEOUT_MS`).
pub fn drain_timeout() -> Duration {
    duration_ms("JG_DRAIN_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT)
}

/// Per-request deadline (default 5s, configurable via `JG_REQUEST_TIMEOUT_MS`).
pub fn request_timeout() -> Duration {
    duration_ms("JG_REQUEST_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT)
}

/// Database lock deadline (default 5s, configurable via `JG_TX_TIMEOUT_MS`).
pub fn tx_timeout() -> Duration {
    duration_ms("JG_TX_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT)
}

/// Directory holding `jgd.log`, appended to across runs. Logs go to stderr
/// when unset.
pub fn log_dir() -> Option<PathBuf> {
    std::env::var("JG_LOG_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}
