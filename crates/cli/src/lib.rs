// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Job Guard clients: the `jg` control CLI and the `jg-exec` agent.

pub mod client;
pub mod color;
pub mod commands;
pub mod env;
pub mod executor;
pub mod exit_error;
pub mod output;
pub mod table;

pub use client::{ClientError, CoordinatorClient, HttpClient, DEFAULT_SERVER_URL};
pub use executor::{Executor, ExecutorError, Sink, EXIT_ERROR, EXIT_OK};
pub use exit_error::ExitError;
