// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the coordinator's REST surface.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use jg_core::{Execution, ExecutionId, Job, JobAction, StartArguments};
use jg_wire::{
    route, CreateJobRequest, ErrorBody, JobResponse, JobsResponse, StartExecutionRequest,
    StartExecutionResponse,
};

/// Default coordinator URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Errors from coordinator calls, split by how the caller should react.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("locked: {0}")]
    Locked(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Operations an agent needs from the coordinator.
#[async_trait]
pub trait CoordinatorClient: Send + Sync {
    /// Ask to start an execution of `job`; returns its id.
    async fn start(&self, job: &str, args: StartArguments) -> Result<ExecutionId, ClientError>;

    /// Report that the execution has exited.
    async fn finish(&self, id: &ExecutionId) -> Result<(), ClientError>;
}

/// reqwest-backed client.
#[derive(Clone)]
pub struct HttpClient {
    base: String,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self { base: base.trim_end_matches('/').to_string(), http: reqwest::Client::new() }
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base
    }

    pub async fn create_job(&self, request: &CreateJobRequest) -> Result<Job, ClientError> {
        let response = self.send(self.request(Method::POST, route::CREATE_JOB).json(request)).await?;
        Ok(response.json().await?)
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>, ClientError> {
        let body: JobsResponse = self.get_json(route::LIST_JOBS).await?;
        Ok(body.jobs)
    }

    pub async fn get_job(&self, name: &str) -> Result<JobResponse, ClientError> {
        self.get_json(&route::job(name)).await
    }

    pub async fn delete_job(&self, name: &str) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, &route::delete_job(name))).await?;
        Ok(())
    }

    pub async fn job_action(&self, name: &str, action: JobAction) -> Result<Job, ClientError> {
        let path = route::job_action(name, action.as_str());
        let response = self.send(self.request(Method::POST, &path)).await?;
        Ok(response.json().await?)
    }

    /// Finish by id, returning the removed record.
    pub async fn finish_execution(&self, id: &ExecutionId) -> Result<Execution, ClientError> {
        let path = route::execution(&id.to_string());
        let response = self.send(self.request(Method::DELETE, &path)).await?;
        Ok(response.json().await?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base, path))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    /// Send and turn non-2xx statuses into [`ClientError`]s.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message().map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
        Err(match status {
            StatusCode::LOCKED => ClientError::Locked(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::BadRequest(message),
            _ => ClientError::Server { status: status.as_u16(), message },
        })
    }
}

#[async_trait]
impl CoordinatorClient for HttpClient {
    async fn start(&self, job: &str, args: StartArguments) -> Result<ExecutionId, ClientError> {
        let body = StartExecutionRequest::new(job, args);
        let response =
            self.send(self.request(Method::POST, route::START_EXECUTION).json(&body)).await?;
        let started: StartExecutionResponse = response.json().await?;
        Ok(started.id)
    }

    async fn finish(&self, id: &ExecutionId) -> Result<(), ClientError> {
        self.finish_execution(id).await.map(|_| ())
    }
}
