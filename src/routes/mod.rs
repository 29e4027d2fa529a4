// ABOUTME: Route module organization for the coach service HTTP endpoints
// ABOUTME: Health and chat route definitions with thin handlers over the LLM layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! Route modules for the coach service
//!
//! Each domain module contains route definitions and thin handler functions
//! that delegate to the LLM layer.

/// Health check and system status routes
pub mod health;

/// Streaming chat route for the coach conversation
pub mod chat;

pub use chat::ChatRoutes;
pub use health::HealthRoutes;
