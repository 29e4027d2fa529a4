// ABOUTME: Unified error handling for the coach service with stable codes and HTTP responses
// ABOUTME: AppError constructors per failure class plus the axum IntoResponse conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! Unified error type for the coach service
//!
//! Every fallible path in the server produces an [`AppError`] carrying a
//! stable code and a human-readable message. At the HTTP boundary the error
//! renders as a JSON body with a matching status; inside a live stream it is
//! converted to an in-band error event instead (see the chat routes).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Convenience alias for results carrying [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

/// Stable machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Request body did not match the expected shape
    InvalidRequest,
    /// Server configuration is missing or invalid
    Config,
    /// The upstream model provider failed
    Upstream,
    /// Requested resource does not exist
    NotFound,
    /// Unexpected internal failure
    Internal,
}

impl ErrorCode {
    const fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Config | Self::Upstream | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Application error with a stable code and human-readable message
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// Failure classification
    pub code: ErrorCode,
    /// Human-readable description, safe to return to the caller
    pub message: String,
}

impl AppError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Request body not parseable as the expected shape
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Missing or invalid server configuration
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, message)
    }

    /// Upstream model provider failure
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Upstream, message)
    }

    /// Requested resource does not exist
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Unexpected internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

/// JSON body returned for request-level failures
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: ErrorCode,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        let body = ErrorResponse {
            error: self.message,
            code: self.code,
        };
        (status, Json(body)).into_response()
    }
}
