// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Paths of the REST surface.

pub const CREATE_JOB: &str = "/job";
pub const LIST_JOBS: &str = "/jobs";
pub const GET_JOB: &str = "/jobs/:name";
pub const DELETE_JOB: &str = "/job/:name";
pub const JOB_ACTION: &str = "/job/:name/:action";
pub const START_EXECUTION: &str = "/executions";
pub const FINISH_EXECUTION: &str = "/execution/:id";

pub fn job(name: &str) -> String {
    format!("/jobs/{}", name)
}

pub fn delete_job(name: &str) -> String {
    format!("/job/{}", name)
}

pub fn job_action(name: &str, action: &str) -> String {
    format!("/job/{}/{}", name, action)
}

pub fn execution(id: &str) -> String {
    format!("/execution/{}", id)
}
