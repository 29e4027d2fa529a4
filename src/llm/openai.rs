// ABOUTME: OpenAI-compatible streaming completion provider over SSE
// ABOUTME: Decodes chat.completion.chunk deltas into plain text increments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

use async_stream::try_stream;
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{ChatMessage, CompletionBackend, CompletionRequest, CompletionStream};

/// Sentinel data line closing an OpenAI-compatible completion stream
const PROVIDER_STREAM_DONE: &str = "[DONE]";

/// Streaming chat-completion client for any OpenAI-compatible endpoint
///
/// Holds only the shared connection pool and static configuration, so one
/// instance serves concurrent requests. Retry policy, if any, belongs to the
/// transport configuration, not this provider.
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiProvider {
    /// Create a provider for the configured endpoint and model
    #[must_use]
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

/// Request body for `POST {base}/chat/completions`
#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChunkResponse {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl CompletionBackend for OpenAiProvider {
    async fn stream_completion(&self, request: CompletionRequest) -> AppResult<CompletionStream> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = CompletionBody {
            model: &self.config.model,
            messages: &request.messages,
            stream: true,
        };

        let mut http_request = self.client.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Model request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!(
                "Model provider returned {status}: {detail}"
            )));
        }

        debug!(model = %self.config.model, "opened completion stream");

        let mut events = response.bytes_stream().eventsource();
        let stream = try_stream! {
            while let Some(next) = events.next().await {
                let event = next
                    .map_err(|e| AppError::upstream(format!("Model stream failed: {e}")))?;
                if event.data == PROVIDER_STREAM_DONE {
                    break;
                }
                let chunk: ChunkResponse = serde_json::from_str(&event.data)
                    .map_err(|e| AppError::upstream(format!("Malformed model chunk: {e}")))?;
                let delta = chunk
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.delta.content);
                if let Some(delta) = delta {
                    if !delta.is_empty() {
                        yield delta;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
