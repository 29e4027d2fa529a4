// ABOUTME: Streaming chat route for coach conversations
// ABOUTME: Parses history and context, drives the orchestrator, emits the UI message stream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! Chat route for the coach conversation
//!
//! One endpoint, `POST /api/chat`: the caller supplies its full ordered
//! message history plus an optional context snapshot, and receives the
//! assistant turn as a self-describing SSE stream. The handler performs no
//! authentication; deployments place that collaborator in front of it.

use std::convert::Infallible;
use std::sync::Arc;

use aromi_core::{
    CancellationToken, ChatStreamRequest, Role, StreamEvent, UiMessage, STREAM_TERMINATOR,
    UI_STREAM_HEADER_NAME, UI_STREAM_HEADER_VALUE,
};
use async_stream::stream;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use futures_util::Stream;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm::{build_system_prompt, ChatMessage, Increment, StreamOrchestrator};
use crate::server::ServerResources;

// ============================================================================
// Chat Routes
// ============================================================================

/// Chat route handlers
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create the chat routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/chat", post(Self::stream_chat))
            .with_state(resources)
    }

    /// Stream one assistant turn for the supplied conversation
    ///
    /// Malformed bodies fail fast before the orchestrator is invoked. An
    /// absent `messages` array is an empty conversation, not an error.
    async fn stream_chat(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<ChatStreamRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = payload
            .map_err(|e| AppError::invalid_request(format!("Malformed chat request: {e}")))?;

        info!(
            correlation_id = request.id.as_deref().unwrap_or("-"),
            history_len = request.messages.len(),
            has_context = request.context.is_some(),
            "starting coach completion"
        );

        let system_prompt = build_system_prompt(request.context.as_ref());
        let history = Self::build_history(&request.messages);

        let cancel = CancellationToken::new();
        let orchestrator = StreamOrchestrator::new(Arc::clone(&resources.backend));
        let increments = orchestrator.stream(system_prompt, history, cancel.clone());

        let sse =
            Sse::new(Self::ui_message_stream(increments, cancel)).keep_alive(KeepAlive::default());
        let mut response = sse.into_response();
        response.headers_mut().insert(
            UI_STREAM_HEADER_NAME,
            HeaderValue::from_static(UI_STREAM_HEADER_VALUE),
        );
        Ok(response)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Convert surface messages into wire-model form, preserving order
    ///
    /// Non-text parts are display-only and are not forwarded to the model;
    /// each message flattens to its concatenated text.
    fn build_history(messages: &[UiMessage]) -> Vec<ChatMessage> {
        messages
            .iter()
            .map(|message| match message.role {
                Role::User => ChatMessage::user(message.text()),
                Role::Assistant => ChatMessage::assistant(message.text()),
            })
            .collect()
    }

    /// Wrap orchestrator increments in the self-describing stream protocol
    ///
    /// Emits `start` immediately, opens a text part on the first increment,
    /// and always closes with the `[DONE]` sentinel. Dropping the stream
    /// (client disconnected) fires the cancellation token so generation
    /// stops consuming model output.
    fn ui_message_stream(
        mut increments: mpsc::Receiver<Increment>,
        cancel: CancellationToken,
    ) -> impl Stream<Item = Result<Event, Infallible>> {
        stream! {
            let _disconnect = DisconnectGuard { cancel };

            let message_id = format!("msg_{}", Uuid::new_v4().simple());
            let text_id = format!("txt_{}", Uuid::new_v4().simple());

            yield Ok(json_event(&StreamEvent::Start { message_id }));

            let mut text_open = false;
            while let Some(increment) = increments.recv().await {
                match increment {
                    Increment::Text(delta) => {
                        if !text_open {
                            text_open = true;
                            yield Ok(json_event(&StreamEvent::TextStart { id: text_id.clone() }));
                        }
                        yield Ok(json_event(&StreamEvent::TextDelta {
                            id: text_id.clone(),
                            delta,
                        }));
                    }
                    Increment::Done => {
                        if text_open {
                            yield Ok(json_event(&StreamEvent::TextEnd { id: text_id.clone() }));
                        }
                        yield Ok(json_event(&StreamEvent::Finish));
                        break;
                    }
                    Increment::Error(message) => {
                        warn!("coach completion failed: {message}");
                        yield Ok(json_event(&StreamEvent::Error { error_text: message }));
                        break;
                    }
                }
            }

            yield Ok(Event::default().data(STREAM_TERMINATOR));
        }
    }
}

/// Fires cancellation when the response stream is dropped mid-flight
struct DisconnectGuard {
    cancel: CancellationToken,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn json_event(event: &StreamEvent) -> Event {
    Event::default().data(serde_json::to_string(event).unwrap_or_else(|_| "{}".to_owned()))
}
