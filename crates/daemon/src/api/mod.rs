// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! REST surface of the coordinator.

mod error;
mod executions;
mod jobs;

pub use error::ApiError;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use jg_core::{Clock, Error};
use jg_wire::route;

use crate::Coordinator;

/// Shared handler state.
pub struct AppState<C: Clock> {
    pub coordinator: Arc<Coordinator<C>>,
    pub request_timeout: Duration,
}

impl<C: Clock> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self { coordinator: Arc::clone(&self.coordinator), request_timeout: self.request_timeout }
    }
}

/// Build the router. Each request is bounded by `request_timeout`.
///
/// Execution start sits outside the timeout layer. Its handler passes the
/// deadline to the coordinator, which answers [`Error::DeadlineExceeded`]
/// without recording anything.
pub fn router<C: Clock>(coordinator: Arc<Coordinator<C>>, request_timeout: Duration) -> Router {
    Router::new()
        .route(route::CREATE_JOB, post(jobs::create::<C>))
        .route(route::LIST_JOBS, get(jobs::list::<C>))
        .route(route::GET_JOB, get(jobs::get::<C>))
        .route(route::DELETE_JOB, delete(jobs::delete::<C>))
        .route(route::JOB_ACTION, post(jobs::action::<C>))
        .route(route::FINISH_EXECUTION, delete(executions::finish::<C>))
        .layer(TimeoutLayer::new(request_timeout))
        .route(route::START_EXECUTION, post(executions::start::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { coordinator, request_timeout })
}

/// Run a coordinator operation on the blocking pool.
async fn blocking<C, T, F>(state: &AppState<C>, op: F) -> Result<T, ApiError>
where
    C: Clock,
    T: Send + 'static,
    F: FnOnce(&Coordinator<C>) -> Result<T, Error> + Send + 'static,
{
    let coordinator = Arc::clone(&state.coordinator);
    match tokio::task::spawn_blocking(move || op(coordinator.as_ref())).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => Err(ApiError::internal(e)),
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
