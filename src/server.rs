// ABOUTME: Server assembly and lifecycle for the coach service
// ABOUTME: Shared resources, router with ambient layers, bind and graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! Server assembly
//!
//! Builds the router from the route modules, applies the ambient HTTP layers
//! (tracing, CORS, the hosting-boundary request budget) and runs the listener
//! with graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{CompletionBackend, OpenAiProvider};
use crate::routes::{ChatRoutes, HealthRoutes};

/// Hosting-boundary wall-clock budget for a single request
///
/// Requests exceeding this are terminated here, not by the chat handler;
/// partial output already flushed to the client stays flushed.
const REQUEST_BUDGET: Duration = Duration::from_secs(60);

/// Shared resources handed to every route
pub struct ServerResources {
    /// Loaded configuration
    pub config: ServerConfig,
    /// Model provider used for every completion
    pub backend: Arc<dyn CompletionBackend>,
}

impl ServerResources {
    /// Build resources with the configured OpenAI-compatible provider
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let backend: Arc<dyn CompletionBackend> = Arc::new(OpenAiProvider::new(config.llm.clone()));
        Self { config, backend }
    }

    /// Build resources with a custom backend (used by tests)
    #[must_use]
    pub fn with_backend(config: ServerConfig, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { config, backend }
    }
}

/// The coach HTTP server
pub struct CoachServer {
    resources: Arc<ServerResources>,
}

impl CoachServer {
    /// Create a server over the given resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Assemble the full router with ambient layers
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes())
            .merge(ChatRoutes::routes(Arc::clone(&self.resources)))
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TimeoutLayer::new(REQUEST_BUDGET))
    }

    /// Bind the configured port and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an internal error if the port cannot be bound or the server
    /// loop fails.
    pub async fn run(&self) -> AppResult<()> {
        let addr = format!("0.0.0.0:{}", self.resources.config.http_port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        info!("AROMI coach server listening on {addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
