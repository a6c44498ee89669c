// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution start/finish handlers used by agents.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use std::time::Instant;

use jg_core::{Clock, Execution};
use jg_wire::{StartExecutionRequest, StartExecutionResponse};

use super::{blocking, ApiError, AppState};

pub(super) async fn start<C: Clock>(
    State(state): State<AppState<C>>,
    body: Result<Json<StartExecutionRequest>, JsonRejection>,
) -> Result<Json<StartExecutionResponse>, ApiError> {
    let Json(request) = body?;
    let deadline = Instant::now() + state.request_timeout;
    let execution = blocking(&state, move |c| c.start_execution(request, deadline)).await?;
    Ok(Json(StartExecutionResponse { id: execution.id }))
}

pub(super) async fn finish<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<Execution>, ApiError> {
    Ok(Json(blocking(&state, move |c| c.finish_execution(&id)).await?))
}
