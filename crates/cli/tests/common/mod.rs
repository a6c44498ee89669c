// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process coordinator for client and agent tests.

use std::time::Duration;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use jg::HttpClient;
use jg_daemon::Config;

pub struct Coordinator {
    pub url: String,
    shutdown: CancellationToken,
    _dir: TempDir,
}

impl Coordinator {
    /// Start a coordinator on an ephemeral port with a fresh database.
    pub async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            listen: "127.0.0.1:0".parse().unwrap(),
            db_path: dir.path().join("data.db"),
            drain_timeout: Duration::from_secs(1),
            request_timeout: Duration::from_secs(5),
            tx_timeout: Duration::from_secs(1),
        };
        let started = jg_daemon::startup(&config).await.unwrap();
        let addr = started.listener.local_addr().unwrap();
        let shutdown = CancellationToken::new();
        tokio::spawn(jg_daemon::run(started, shutdown.clone()));
        Self { url: format!("http://{}", addr), shutdown, _dir: dir }
    }

    pub fn client(&self) -> HttpClient {
        HttpClient::new(&self.url)
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
