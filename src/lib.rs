// ABOUTME: Main library entry point for the AROMI coach service
// ABOUTME: Streaming AI health coaching over a grounded system prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

#![deny(unsafe_code)]

//! # AROMI Coach Server
//!
//! Streaming chat service behind the ArogyaMitra coach surfaces. A request
//! carries the full conversation history plus an optional profile/assessment
//! snapshot; the server assembles a grounded system prompt, drives an
//! OpenAI-compatible model, and streams the assistant turn back as
//! self-describing increments.
//!
//! ## Architecture
//!
//! - **llm::prompt**: deterministic system prompt assembly from the context
//!   snapshot
//! - **llm::orchestrator**: cancellable increment pipeline over a
//!   [`llm::CompletionBackend`]
//! - **routes**: the HTTP boundary (health, streaming chat)
//! - **server**: router assembly, ambient layers, lifecycle
//!
//! The model is stateless between requests; continuity is reconstructed from
//! the supplied history on every call. Conversation persistence, user
//! accounts, and the surrounding dashboard are external collaborators.
//!
//! ## Example
//!
//! ```rust,no_run
//! use aromi_coach_server::config::ServerConfig;
//! use aromi_coach_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("AROMI coach configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration management (environment-only)
pub mod config;

/// Unified error handling with stable codes and HTTP responses
pub mod errors;

/// LLM provider abstraction for AI chat integration
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// HTTP routes for health checks and the coach conversation
pub mod routes;

/// Server assembly and lifecycle
pub mod server;

/// Test utilities for deterministic completion backends
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
