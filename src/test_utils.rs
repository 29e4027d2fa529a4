// ABOUTME: Scripted completion backend for orchestrator and route tests
// ABOUTME: Replays configured chunks, optionally fails mid-stream, records every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

//! Test utilities
//!
//! Enabled for unit tests and, via the `testing` cargo feature, for
//! integration tests in dependent crates that need a deterministic backend
//! behind a real server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_stream::stream;
use async_trait::async_trait;

use crate::errors::{AppError, AppResult};
use crate::llm::{CompletionBackend, CompletionRequest, CompletionStream};

/// Deterministic [`CompletionBackend`] replaying a fixed script
///
/// Every request is recorded for later assertions on ordering and content.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    chunks: Vec<String>,
    error: Option<String>,
    chunk_delay: Option<Duration>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedBackend {
    /// Backend that streams the given chunks and then ends cleanly
    pub fn with_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Backend that streams the given chunks and then fails mid-stream
    pub fn failing_after<I>(chunks: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            error: Some(message.into()),
            ..Self::with_chunks(chunks)
        }
    }

    /// Pause between chunks so tests can interleave cancellation
    #[must_use]
    pub const fn with_chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = Some(delay);
        self
    }

    /// All requests seen so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn stream_completion(&self, request: CompletionRequest) -> AppResult<CompletionStream> {
        self.requests.lock().unwrap().push(request);

        let chunks = self.chunks.clone();
        let error = self.error.clone();
        let delay = self.chunk_delay;

        let deltas = stream! {
            for chunk in chunks {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                yield Ok(chunk);
            }
            if let Some(message) = error {
                yield Err(AppError::upstream(message));
            }
        };

        Ok(Box::pin(deltas))
    }
}
