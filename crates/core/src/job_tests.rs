// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{Clock, FakeClock};

fn job(mode: LockMode) -> Job {
    Job::new("build", mode, FakeClock::new().now())
}

#[test]
fn new_job_is_active() {
    let job = job(LockMode::Host);
    assert_eq!(job.status, JobStatus::Active);
    assert!(!job.is_paused());
}

#[yare::parameterized(
    free = { "free", LockMode::Free },
    host = { "host", LockMode::Host },
    cluster = { "cluster", LockMode::Cluster },
)]
fn lock_mode_parses(input: &str, expected: LockMode) {
    assert_eq!(input.parse::<LockMode>().unwrap(), expected);
    assert_eq!(expected.to_string(), input);
}

#[yare::parameterized(
    unknown = { "exclusive" },
    upper = { "HOST" },
    empty = { "" },
)]
fn lock_mode_rejects_unknown(input: &str) {
    let err = input.parse::<LockMode>().unwrap_err();
    match err {
        Error::Invalid(msg) => assert!(msg.contains("free, host, cluster"), "{}", msg),
        other => panic!("expected Invalid, got {:?}", other),
    }
}

#[test]
fn job_serializes_with_snake_case_fields() {
    let job = job(LockMode::Cluster);
    let value = serde_json::to_value(&job).unwrap();
    assert_eq!(value["name"], "build");
    assert_eq!(value["lock_mode"], "cluster");
    assert_eq!(value["status"], "active");
    assert_eq!(value["created_at"], "2026-01-15T10:30:00Z");
}

#[test]
fn job_without_status_deserializes_as_active() {
    let job: Job = serde_json::from_str(r#"{"name":"old","lock_mode":"host"}"#).unwrap();
    assert_eq!(job.status, JobStatus::Active);
}

#[test]
fn pause_then_start_round_trips() {
    let mut job = job(LockMode::Free);
    job.pause().unwrap();
    assert!(job.is_paused());
    job.start().unwrap();
    assert!(!job.is_paused());
}

#[test]
fn pause_twice_is_rejected() {
    let mut job = job(LockMode::Free);
    job.pause().unwrap();
    let err = job.pause().unwrap_err();
    assert_eq!(err.to_string(), "job is already paused");
    assert!(job.is_paused());
}

#[test]
fn start_active_is_rejected() {
    let mut job = job(LockMode::Free);
    let err = JobAction::Start.apply(&mut job).unwrap_err();
    assert_eq!(err.to_string(), "job is already active");
}

#[yare::parameterized(
    empty = { "" },
    separator = { "a:b" },
)]
fn invalid_names(name: &str) {
    assert!(matches!(Job::validate_name(name), Err(Error::Invalid(_))));
}

#[test]
fn names_are_case_sensitive_and_free_form() {
    assert!(Job::validate_name("Nightly-Backup_2").is_ok());
    assert!(Job::validate_name("nightly backup").is_ok());
}

#[test]
fn unknown_action_is_invalid() {
    let err = "restart".parse::<JobAction>().unwrap_err();
    assert!(err.to_string().contains("start, pause"));
}
