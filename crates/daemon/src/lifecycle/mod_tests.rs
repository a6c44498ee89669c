// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;
use yare::parameterized;

fn config(dir: &std::path::Path) -> Config {
    Config {
        listen: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.join("data.db"),
        drain_timeout: Duration::from_millis(500),
        request_timeout: Duration::from_secs(5),
        tx_timeout: Duration::from_millis(200),
    }
}

#[parameterized(
    bare_port = { ":8080", "0.0.0.0:8080" },
    loopback = { "127.0.0.1:9000", "127.0.0.1:9000" },
    ipv6 = { "[::1]:80", "[::1]:80" },
)]
fn listen_addresses(input: &str, expected: &str) {
    assert_eq!(parse_listen(input).unwrap(), expected.parse::<SocketAddr>().unwrap());
}

#[parameterized(
    empty = { "" },
    no_port = { "localhost" },
    bad_port = { ":http" },
)]
fn invalid_listen_addresses(input: &str) {
    assert!(matches!(parse_listen(input), Err(LifecycleError::InvalidListen(_))));
}

#[tokio::test]
async fn startup_creates_database_file() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let started = startup(&config).await.unwrap();

    assert!(config.db_path.exists());
    assert_ne!(started.listener.local_addr().unwrap().port(), 0);
}

#[tokio::test]
async fn second_startup_on_same_database_fails_to_lock() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let _first = startup(&config).await.unwrap();

    let second = startup(&config).await;

    assert!(matches!(second, Err(LifecycleError::LockFailed(_))));
}

#[tokio::test]
async fn run_stops_on_cancel_and_keeps_data() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let started = startup(&config).await.unwrap();
    started
        .daemon
        .coordinator
        .create_job(jg_wire::CreateJobRequest::new("backup", jg_core::LockMode::Free))
        .unwrap();

    let token = CancellationToken::new();
    let handle = tokio::spawn(run(started, token.clone()));
    token.cancel();
    handle.await.unwrap().unwrap();

    let reopened = startup(&config).await.unwrap();
    let jobs = reopened.daemon.coordinator.list_jobs().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].name, "backup");
}
