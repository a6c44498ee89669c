// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP protocol shared by the coordinator and its clients.
//!
//! JSON bodies; request field names are camelCase, stored records keep
//! their snake_case form.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod request;
mod response;
pub mod route;

pub use request::{CreateJobRequest, StartExecutionRequest};
pub use response::{ErrorBody, JobResponse, JobsResponse, StartExecutionResponse, DELETE_BLOCKED_MSG};
