// ABOUTME: Environment variable configuration for HTTP binding and the LLM provider
// ABOUTME: ServerConfig::from_env is the single configuration entry point
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! Environment-only configuration
//!
//! Model selection and credentials are deployment concerns, so they live in
//! environment variables rather than request bodies or config files.

use std::env;

use crate::errors::{AppError, AppResult};

/// Default HTTP port when `AROMI_HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default OpenAI-compatible API base when `AROMI_LLM_BASE_URL` is unset
const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model when `AROMI_LLM_MODEL` is unset
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port the HTTP server binds
    pub http_port: u16,
    /// Upstream model provider settings
    pub llm: LlmConfig,
}

/// Upstream model provider settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API (no trailing slash)
    pub base_url: String,
    /// Bearer token; optional for key-less local gateways
    pub api_key: Option<String>,
    /// Model identifier requested for every completion
    pub model: String,
}

impl ServerConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns a config error if `AROMI_HTTP_PORT` is set but not a valid
    /// port number.
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var("AROMI_HTTP_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| {
                AppError::config(format!("Invalid AROMI_HTTP_PORT value '{raw}': {e}"))
            })?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let base_url = env::var("AROMI_LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let api_key = env::var("AROMI_LLM_API_KEY").ok().filter(|k| !k.is_empty());
        let model = env::var("AROMI_LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_owned());

        Ok(Self {
            http_port,
            llm: LlmConfig {
                base_url,
                api_key,
                model,
            },
        })
    }
}
