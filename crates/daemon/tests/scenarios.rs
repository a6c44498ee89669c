// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end REST scenarios against on-disk storage.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use jg_core::{ExecutionStore, JobStore};
use jg_daemon::api::router;
use jg_daemon::Coordinator;
use jg_storage::{Db, ExecutionStorage, JobStorage};

struct Harness {
    app: Router,
    _dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = Arc::new(Db::open(dir.path().join("data.db")).unwrap());
        let jobs: Arc<dyn JobStore> = Arc::new(JobStorage::new(Arc::clone(&db)).unwrap());
        let executions: Arc<dyn ExecutionStore> = Arc::new(ExecutionStorage::new(db).unwrap());
        let coordinator = Arc::new(Coordinator::new(jobs, executions));
        Self { app: router(coordinator, Duration::from_secs(5)), _dir: dir }
    }

    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value =
            if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    async fn create(&self, name: &str, lock_mode: &str) {
        let (status, _) =
            self.call(Method::POST, "/job", Some(json!({"name": name, "lockMode": lock_mode}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    async fn start(&self, job: &str, host: &str, pid: u32) -> (StatusCode, Value) {
        self.call(Method::POST, "/executions", Some(json!({"job": job, "pid": pid, "host": host})))
            .await
    }

    async fn finish(&self, id: &Value) -> StatusCode {
        self.call(Method::DELETE, &format!("/execution/{}", id.as_str().unwrap()), None).await.0
    }
}

#[tokio::test]
async fn cluster_mode_admits_one_execution_across_hosts() {
    let h = Harness::new();
    h.create("j1", "cluster").await;

    let (status, first) = h.start("j1", "a", 1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.start("j1", "b", 2).await.0, StatusCode::LOCKED);

    assert_eq!(h.finish(&first["id"]).await, StatusCode::OK);
    assert_eq!(h.start("j1", "b", 2).await.0, StatusCode::OK);
}

#[tokio::test]
async fn host_mode_admits_one_execution_per_host() {
    let h = Harness::new();
    h.create("j2", "host").await;

    assert_eq!(h.start("j2", "x", 1).await.0, StatusCode::OK);
    assert_eq!(h.start("j2", "x", 2).await.0, StatusCode::LOCKED);
    assert_eq!(h.start("j2", "y", 1).await.0, StatusCode::OK);
}

#[tokio::test]
async fn free_mode_admits_everything() {
    let h = Harness::new();
    h.create("j3", "free").await;

    let mut ids = Vec::new();
    for pid in 1..=5 {
        let (status, body) = h.start("j3", "a", pid).await;
        assert_eq!(status, StatusCode::OK);
        ids.push(body["id"].clone());
    }
    for id in &ids {
        assert_eq!(h.finish(id).await, StatusCode::OK);
    }

    let (status, body) = h.call(Method::GET, "/jobs/j3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["executions"], json!([]));
}

#[tokio::test]
async fn delete_is_blocked_by_running_execution() {
    let h = Harness::new();
    h.create("j1", "cluster").await;
    let (_, started) = h.start("j1", "a", 1).await;

    let (status, body) = h.call(Method::DELETE, "/job/j1", None).await;
    assert_eq!(status, StatusCode::LOCKED);
    assert_eq!(body, json!({"msg": "stop all job's execution and try again"}));
    assert_eq!(h.call(Method::GET, "/jobs/j1", None).await.0, StatusCode::OK);

    h.finish(&started["id"]).await;
    assert_eq!(h.call(Method::DELETE, "/job/j1", None).await.0, StatusCode::OK);
}

#[tokio::test]
async fn pause_blocks_admission_until_started_again() {
    let h = Harness::new();
    h.create("j1", "cluster").await;

    assert_eq!(h.call(Method::POST, "/job/j1/pause", None).await.0, StatusCode::OK);
    let (status, body) = h.start("j1", "a", 1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().contains("paused"), "{}", body);

    assert_eq!(h.call(Method::POST, "/job/j1/start", None).await.0, StatusCode::OK);
    assert_eq!(h.start("j1", "a", 1).await.0, StatusCode::OK);
}

#[tokio::test]
async fn concurrent_cluster_starts_admit_exactly_one() {
    let h = Arc::new(Harness::new());
    h.create("j1", "cluster").await;

    let mut tasks = Vec::new();
    for pid in 0..8u32 {
        let h = Arc::clone(&h);
        tasks.push(tokio::spawn(async move { h.start("j1", &format!("host-{}", pid), pid).await.0 }));
    }
    let mut admitted = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::OK => admitted += 1,
            StatusCode::LOCKED => {}
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(admitted, 1);
}
