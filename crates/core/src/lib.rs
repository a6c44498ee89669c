// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jg-core: jobs, executions and the lock-mode admission core of Job Guard

pub mod macros;

pub mod clock;
pub mod controller;
pub mod error;
pub mod execution;
pub mod id;
pub mod job;
pub mod locker;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use controller::{Admission, Controller, JobLocks};
pub use error::{Error, StoreError};
pub use execution::{Execution, ExecutionStatus, StartArguments};
pub use id::ExecutionId;
pub use job::{Job, JobAction, JobStatus, LockMode};
pub use locker::Locker;
pub use store::{ExecutionStore, JobStore};
