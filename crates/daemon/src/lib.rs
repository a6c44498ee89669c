// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job Guard coordinator: job catalog, execution admission and the REST
//! surface in front of them.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod api;
pub mod coordinator;
pub mod env;
pub mod lifecycle;
pub mod shutdown;

pub use coordinator::Coordinator;
pub use lifecycle::{run, startup, Config, DaemonState, LifecycleError, StartupResult};
