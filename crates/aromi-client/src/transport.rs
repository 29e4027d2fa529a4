// ABOUTME: Transport seam between a session controller and the coach endpoint
// ABOUTME: ChatTransport trait plus the HTTP/SSE implementation with cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! Chat transport
//!
//! Controllers talk to the coach endpoint through the [`ChatTransport`]
//! trait, so tests can script a deterministic stream while production uses
//! [`HttpTransport`] against `POST /api/chat`.

use std::pin::Pin;

use aromi_core::{CancellationToken, ChatStreamRequest, StreamEvent, STREAM_TERMINATOR};
use async_stream::try_stream;
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Live sequence of decoded stream events for one turn
pub type EventStream = Pin<Box<dyn Stream<Item = ClientResult<StreamEvent>> + Send>>;

/// Seam between a controller and the coach endpoint
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send the full conversation and open the response event stream
    ///
    /// The supplied token cancels the in-flight request; once it fires the
    /// returned stream ends without further events.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be sent or the server
    /// rejects it before streaming begins.
    async fn send_messages(
        &self,
        request: &ChatStreamRequest,
        cancel: &CancellationToken,
    ) -> ClientResult<EventStream>;
}

/// HTTP transport speaking the UI message stream protocol over SSE
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport posting to the given chat endpoint URL
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send_messages(
        &self,
        request: &ChatStreamRequest,
        cancel: &CancellationToken,
    ) -> ClientResult<EventStream> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        debug!(endpoint = %self.endpoint, "opened coach event stream");

        let cancel = cancel.clone();
        let mut events = response.bytes_stream().eventsource();

        Ok(Box::pin(try_stream! {
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    next = events.next() => match next {
                        Some(Ok(event)) => {
                            if event.data == STREAM_TERMINATOR {
                                break;
                            }
                            let parsed: StreamEvent = serde_json::from_str(&event.data)
                                .map_err(|e| ClientError::Decode(e.to_string()))?;
                            yield parsed;
                        }
                        Some(Err(e)) => {
                            Err(ClientError::Stream(e.to_string()))?;
                        }
                        None => break,
                    }
                }
            }
        }))
    }
}
