// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job catalog handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use jg_core::{Clock, Job};
use jg_wire::{CreateJobRequest, JobResponse, JobsResponse, DELETE_BLOCKED_MSG};

use super::{blocking, ApiError, AppState};

pub(super) async fn create<C: Clock>(
    State(state): State<AppState<C>>,
    body: Result<Json<CreateJobRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let Json(request) = body?;
    let job = blocking(&state, move |c| c.create_job(request)).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub(super) async fn list<C: Clock>(
    State(state): State<AppState<C>>,
) -> Result<Json<JobsResponse>, ApiError> {
    let jobs = blocking(&state, |c| c.list_jobs()).await?;
    Ok(Json(JobsResponse { jobs }))
}

pub(super) async fn get<C: Clock>(
    State(state): State<AppState<C>>,
    Path(name): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    Ok(Json(blocking(&state, move |c| c.get_job(&name)).await?))
}

pub(super) async fn delete<C: Clock>(
    State(state): State<AppState<C>>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let coordinator = std::sync::Arc::clone(&state.coordinator);
    match tokio::task::spawn_blocking(move || coordinator.delete_job(&name)).await {
        Ok(Ok(())) => Ok(StatusCode::OK),
        Ok(Err(e)) if e.is_locked() => Err(ApiError::locked(DELETE_BLOCKED_MSG)),
        Ok(Err(e)) => Err(e.into()),
        Err(e) => Err(ApiError::internal(e)),
    }
}

pub(super) async fn action<C: Clock>(
    State(state): State<AppState<C>>,
    Path((name, action)): Path<(String, String)>,
) -> Result<Json<Job>, ApiError> {
    Ok(Json(blocking(&state, move |c| c.apply_action(&name, &action)).await?))
}
