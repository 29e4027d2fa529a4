// ABOUTME: LLM provider abstraction for the coach chat pipeline
// ABOUTME: Wire-model chat messages, the streaming backend trait, prompt assembly, orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! LLM integration layer
//!
//! The model is stateless between requests; conversation continuity is
//! reconstructed per request from the full supplied history. This module owns
//! the wire-model message form, the [`CompletionBackend`] seam implemented by
//! concrete providers, system prompt assembly, and the stream orchestrator
//! that turns a backend response into cancellable increments.

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::errors::AppResult;

/// OpenAI-compatible streaming provider
pub mod openai;

/// Cancellable increment pipeline between backend and HTTP boundary
pub mod orchestrator;

/// System prompt assembly from the user context snapshot
pub mod prompt;

pub use openai::OpenAiProvider;
pub use orchestrator::{Increment, StreamOrchestrator};
pub use prompt::build_system_prompt;

/// Role of a wire-model chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions fixed by the server
    System,
    /// End user turn
    User,
    /// Model turn
    Assistant,
}

impl MessageRole {
    /// Wire representation of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message in the form sent to the model provider
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    /// Sender role
    pub role: MessageRole,
    /// Flattened text content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// A completion request in the exact order handed to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System prompt first, then the full prior conversation oldest-first
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Create a request from an ordered message sequence
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }
}

/// Live sequence of text increments from a provider
pub type CompletionStream = Pin<Box<dyn Stream<Item = AppResult<String>> + Send>>;

/// Seam implemented by concrete model providers
///
/// A backend holds no per-request state and is safe to share across
/// concurrent requests behind an `Arc`.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Open a streaming completion for the given request
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the provider rejects the request before
    /// any increment is produced; mid-stream failures surface as `Err` items
    /// on the returned stream.
    async fn stream_completion(&self, request: CompletionRequest) -> AppResult<CompletionStream>;
}
