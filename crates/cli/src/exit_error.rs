// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error carrying the process exit code of a binary.
//!
//! Entry points return `ExitError` instead of calling `std::process::exit()`
//! deep inside a command, so `main()` owns process termination.

use std::fmt;

use crate::client::ClientError;
use crate::executor::{ExecutorError, EXIT_ERROR};

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit code 1 with `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<ExecutorError> for ExitError {
    fn from(e: ExecutorError) -> Self {
        match e {
            ExecutorError::Start(ClientError::Locked(msg)) => {
                Self::failure(format!("process hasn't started: {}", msg))
            }
            ExecutorError::Start(ClientError::NotFound(msg)) => Self::failure(format!("job not found: {}", msg)),
            other => Self::failure(format!("process hasn't started: {}", other)),
        }
    }
}

impl From<ClientError> for ExitError {
    fn from(e: ClientError) -> Self {
        Self::failure(e.to_string())
    }
}
