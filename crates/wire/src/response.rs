// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

use jg_core::{Execution, ExecutionId, Job};

/// Message returned when a job cannot be deleted while it has running executions.
pub const DELETE_BLOCKED_MSG: &str = "stop all job's execution and try again";

/// Body of `GET /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

/// Body of `GET /jobs/:name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResponse {
    pub job: Job,
    #[serde(default)]
    pub executions: Vec<Execution>,
}

/// Body of a successful `POST /executions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartExecutionResponse {
    pub id: ExecutionId,
}

/// Error body: `{"err": "..."}` or `{"msg": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl ErrorBody {
    pub fn err(message: impl Into<String>) -> Self {
        Self { err: Some(message.into()), msg: None }
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self { err: None, msg: Some(message.into()) }
    }

    /// Whichever message the body carries.
    pub fn message(&self) -> Option<&str> {
        self.err.as_deref().or(self.msg.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_absent_field() {
        let json = serde_json::to_string(&ErrorBody::msg(DELETE_BLOCKED_MSG)).unwrap();
        assert_eq!(json, r#"{"msg":"stop all job's execution and try again"}"#);
    }

    #[test]
    fn error_body_reads_either_field() {
        let err: ErrorBody = serde_json::from_str(r#"{"err":"job is locked"}"#).unwrap();
        let msg: ErrorBody = serde_json::from_str(r#"{"msg":"nope"}"#).unwrap();
        assert_eq!(err.message(), Some("job is locked"));
        assert_eq!(msg.message(), Some("nope"));
        assert_eq!(ErrorBody::default().message(), None);
    }

    #[test]
    fn start_response_is_a_bare_id() {
        let id = ExecutionId::new();
        let json = serde_json::to_value(StartExecutionResponse { id }).unwrap();
        assert_eq!(json, serde_json::json!({ "id": id.to_string() }));
    }
}
