// ABOUTME: Configuration module for the coach service
// ABOUTME: Environment-only configuration, no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

/// Environment-backed server configuration
pub mod environment;

pub use environment::{LlmConfig, ServerConfig};
