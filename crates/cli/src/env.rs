// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use crate::client::DEFAULT_SERVER_URL;

/// Coordinator URL: the flag if given, else `JG_SERVER_URL`, else
/// [`DEFAULT_SERVER_URL`].
pub fn server_url(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("JG_SERVER_URL").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}
