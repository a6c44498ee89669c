// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use jg_core::test_support::MemoryStore;
use jg_core::{Controller, ExecutionStore, FakeClock, JobStore};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    app_with(Arc::new(MemoryStore::new()), Duration::from_secs(5))
}

fn app_with(store: Arc<MemoryStore>, request_timeout: Duration) -> Router {
    let clock = FakeClock::new();
    let executions = Arc::clone(&store) as Arc<dyn ExecutionStore>;
    let admission = Arc::new(Controller::with_clock(Arc::clone(&executions), clock.clone()));
    let coordinator = Coordinator::with_admission(
        Arc::clone(&store) as Arc<dyn JobStore>,
        executions,
        admission,
        clock,
    );
    router(Arc::new(coordinator), request_timeout)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

#[tokio::test]
async fn create_returns_201_with_job() {
    let app = app();

    let (status, body) =
        call(&app, Method::POST, "/job", Some(json!({"name": "j1", "lockMode": "cluster"}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "j1");
    assert_eq!(body["lock_mode"], "cluster");
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn create_rejects_invalid_bodies() {
    let app = app();
    let bodies = [
        json!({"name": "j1", "lockMode": "global"}),
        json!({"lockMode": "free"}),
        json!({"name": 7}),
    ];

    for body in bodies {
        let (status, _) = call(&app, Method::POST, "/job", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    }
}

#[tokio::test]
async fn create_rejects_malformed_json_with_err_body() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/job")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["err"].is_string());
}

#[tokio::test]
async fn duplicate_create_is_400() {
    let app = app();
    call(&app, Method::POST, "/job", Some(json!({"name": "j1"}))).await;

    let (status, body) = call(&app, Method::POST, "/job", Some(json!({"name": "j1"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "j1 already exists");
}

#[tokio::test]
async fn list_returns_only_jobs() {
    let app = app();
    call(&app, Method::POST, "/job", Some(json!({"name": "b", "lockMode": "free"}))).await;
    call(&app, Method::POST, "/job", Some(json!({"name": "a", "lockMode": "free"}))).await;
    call(&app, Method::POST, "/executions", Some(json!({"job": "a", "host": "h", "pid": 1}))).await;

    let (status, body) = call(&app, Method::GET, "/jobs", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["jobs"].as_array().unwrap().iter().map(|j| j["name"].clone()).collect();
    assert_eq!(names, vec![json!("a"), json!("b")]);
}

#[tokio::test]
async fn get_job_shows_executions() {
    let app = app();
    call(&app, Method::POST, "/job", Some(json!({"name": "j1", "lockMode": "free"}))).await;
    let (_, started) =
        call(&app, Method::POST, "/executions", Some(json!({"job": "j1", "host": "h", "pid": 9}))).await;

    let (status, body) = call(&app, Method::GET, "/jobs/j1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job"]["name"], "j1");
    assert_eq!(body["executions"][0]["id"], started["id"]);
    assert_eq!(body["executions"][0]["status"], "running");
    assert_eq!(body["executions"][0]["pid"], 9);
}

#[tokio::test]
async fn unknown_job_is_404() {
    let app = app();

    assert_eq!(call(&app, Method::GET, "/jobs/ghost", None).await.0, StatusCode::NOT_FOUND);
    assert_eq!(call(&app, Method::DELETE, "/job/ghost", None).await.0, StatusCode::NOT_FOUND);
    assert_eq!(call(&app, Method::POST, "/job/ghost/pause", None).await.0, StatusCode::NOT_FOUND);
    let (status, _) =
        call(&app, Method::POST, "/executions", Some(json!({"job": "ghost", "host": "h"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_idle_job() {
    let app = app();
    call(&app, Method::POST, "/job", Some(json!({"name": "j1"}))).await;

    let (status, _) = call(&app, Method::DELETE, "/job/j1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(call(&app, Method::GET, "/jobs/j1", None).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_actions_are_400() {
    let app = app();
    call(&app, Method::POST, "/job", Some(json!({"name": "j1"}))).await;

    for (action, fragment) in [("resume", "unknown action"), ("start", "job is already active")] {
        let (status, body) = call(&app, Method::POST, &format!("/job/j1/{}", action), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["msg"].as_str().unwrap().contains(fragment), "{}", body);
    }
}

#[tokio::test]
async fn host_mode_without_host_is_400() {
    let app = app();
    call(&app, Method::POST, "/job", Some(json!({"name": "j1", "lockMode": "host"}))).await;

    let (status, body) = call(&app, Method::POST, "/executions", Some(json!({"job": "j1", "pid": 1}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().contains("host is required"));
}

#[tokio::test]
async fn unparseable_started_at_is_400() {
    let app = app();
    call(&app, Method::POST, "/job", Some(json!({"name": "j1", "lockMode": "free"}))).await;

    let (status, _) =
        call(&app, Method::POST, "/executions", Some(json!({"job": "j1", "startedAt": "noon"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn finish_validates_id() {
    let app = app();

    let (status, _) = call(&app, Method::DELETE, "/execution/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = jg_core::ExecutionId::new();
    let (status, _) = call(&app, Method::DELETE, &format!("/execution/{}", unknown), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn finish_returns_removed_execution() {
    let app = app();
    call(&app, Method::POST, "/job", Some(json!({"name": "j1", "lockMode": "cluster"}))).await;
    let (_, started) =
        call(&app, Method::POST, "/executions", Some(json!({"job": "j1", "host": "a", "pid": 1}))).await;
    let id = started["id"].as_str().unwrap().to_string();

    let (status, body) = call(&app, Method::DELETE, &format!("/execution/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["job"], "j1");
}

#[tokio::test]
async fn start_past_deadline_leaves_no_execution_behind() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(Arc::clone(&store), Duration::from_millis(50));
    call(&app, Method::POST, "/job", Some(json!({"name": "j1", "lockMode": "cluster"}))).await;
    store.delay_writes(Duration::from_millis(200));

    let (status, _) =
        call(&app, Method::POST, "/executions", Some(json!({"job": "j1", "host": "a", "pid": 1}))).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert!(store.executions().is_empty());

    store.delay_writes(Duration::ZERO);
    let (status, body) =
        call(&app, Method::POST, "/executions", Some(json!({"job": "j1", "host": "b", "pid": 2}))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
}

#[tokio::test]
async fn locked_start_names_the_blocking_execution() {
    let app = app();
    call(&app, Method::POST, "/job", Some(json!({"name": "j1", "lockMode": "cluster"}))).await;
    let (_, first) =
        call(&app, Method::POST, "/executions", Some(json!({"job": "j1", "host": "a", "pid": 1}))).await;

    let (status, body) =
        call(&app, Method::POST, "/executions", Some(json!({"job": "j1", "host": "b", "pid": 2}))).await;

    assert_eq!(status, StatusCode::LOCKED);
    let id = first["id"].as_str().unwrap();
    assert_eq!(body["msg"], format!("job is locked by execution {}", id));
}
