// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jg-storage: durable job and execution storage for Job Guard

mod db;
mod executions;
mod jobs;
mod keys;
mod wal;

pub use db::{Db, DbOptions, ReadTx, WriteTx, DEFAULT_TX_TIMEOUT, JOBS_BUCKET};
pub use executions::ExecutionStorage;
pub use jobs::JobStorage;
pub use keys::{execution_key, execution_prefix, job_key, EXECUTION_PREFIX, JOB_PREFIX};
pub use wal::{Wal, WalEntry, WalError, WalOp};
