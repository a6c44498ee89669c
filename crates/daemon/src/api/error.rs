// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mapping of coordinator errors onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info};

use jg_core::Error;
use jg_wire::ErrorBody;

/// An error response: status plus `{err}` or `{msg}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// 400 for a body that failed to decode.
    pub fn bad_body(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, body: ErrorBody::err(message) }
    }

    /// 423 with a fixed message.
    pub fn locked(message: impl Into<String>) -> Self {
        Self { status: StatusCode::LOCKED, body: ErrorBody::msg(message) }
    }

    /// 500; the cause is logged, not returned.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "internal error");
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, body: ErrorBody::err("internal server error") }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = match &e {
            Error::Invalid(_) | Error::Paused(_) | Error::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Locked { .. } => StatusCode::LOCKED,
            Error::DeadlineExceeded => StatusCode::REQUEST_TIMEOUT,
            Error::Storage(_) => return Self::internal(&e),
        };
        Self { status, body: ErrorBody::msg(e.to_string()) }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_body(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            info!(status = self.status.as_u16(), message = self.body.message().unwrap_or(""), "request rejected");
        }
        (self.status, Json(self.body)).into_response()
    }
}
