// ABOUTME: Liveness endpoint for operational visibility
// ABOUTME: Reports service name and version, no dependencies probed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

/// Health response body
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Health route handlers
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health routes
    #[must_use]
    pub fn routes() -> Router {
        Router::new().route("/health", get(Self::health))
    }

    async fn health() -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                service: "aromi-coach-server",
                version: env!("CARGO_PKG_VERSION"),
            }),
        )
    }
}
