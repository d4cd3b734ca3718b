// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::SessionError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid workout: {0}")]
    Validation(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoPendingLocation | SessionError::MapNotReady => {
                AppError::Precondition(err.to_string())
            }
            SessionError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", Some(msg.clone()))
            }
            AppError::Precondition(msg) => {
                tracing::error!(error = %msg, "Operation out of sequence");
                (StatusCode::CONFLICT, "precondition_failed", Some(msg.clone()))
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
