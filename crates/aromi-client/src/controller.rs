// ABOUTME: Per-surface chat session controller and status state machine
// ABOUTME: Owns draft input, message history, streamed-turn reduction, and cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! Chat session controller
//!
//! One controller per mounted surface. State lives only for the mount:
//! nothing persists across remounts, and two controllers never synchronize.
//! The state machine is `idle → submitted → streaming → idle`, with any
//! active state falling to `error` on failure and `error → submitted` on the
//! next send.
//!
//! Turns are pull-based. `submit` appends the user message optimistically,
//! issues the request with the entire current history plus the context
//! snapshot, and hands back the turn's event stream; the surface applies
//! events in arrival order. Increments are pure appends, so every
//! intermediate render is a prefix of the final text.

use aromi_core::{CancellationToken, ChatStreamRequest, StreamEvent, UiMessage, UserContext};
use futures_util::StreamExt;
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientResult;
use crate::transport::{ChatTransport, EventStream};

/// Status of one surface's session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    /// No request in flight; input accepted
    Idle,
    /// Request sent, no increment received yet
    Submitted,
    /// Increments arriving for the in-progress assistant message
    Streaming,
    /// Last turn failed; partial content retained, input accepted
    Error,
}

/// Session state machine for one conversational surface
pub struct ChatController<T: ChatTransport> {
    transport: T,
    context: Option<UserContext>,
    session_id: String,
    messages: Vec<UiMessage>,
    status: ChatStatus,
    draft: String,
    last_error: Option<String>,
    streaming_message: Option<String>,
    in_flight: Option<CancellationToken>,
}

impl<T: ChatTransport> ChatController<T> {
    /// Create an idle controller over a transport and context snapshot
    ///
    /// The snapshot is captured once at mount; later profile edits do not
    /// retroactively change it.
    pub fn new(transport: T, context: Option<UserContext>) -> Self {
        Self {
            transport,
            context,
            session_id: format!("chat_{}", Uuid::new_v4().simple()),
            messages: Vec::new(),
            status: ChatStatus::Idle,
            draft: String::new(),
            last_error: None,
            streaming_message: None,
            in_flight: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Conversation history, oldest first
    #[must_use]
    pub fn messages(&self) -> &[UiMessage] {
        &self.messages
    }

    /// Current session status
    #[must_use]
    pub const fn status(&self) -> ChatStatus {
        self.status
    }

    /// Uncommitted input text
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Message of the last failure, if the session is in error
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The context snapshot captured at mount
    #[must_use]
    pub const fn context(&self) -> Option<&UserContext> {
        self.context.as_ref()
    }

    /// Whether a request is outstanding (submitted or streaming)
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.status, ChatStatus::Submitted | ChatStatus::Streaming)
    }

    /// Replace the uncommitted input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Submit the current draft as a user turn
    ///
    /// Returns `Ok(None)` without any state change when the draft is empty or
    /// whitespace, or while a request is outstanding. On acceptance the draft
    /// is cleared and the turn's event stream returned.
    ///
    /// # Errors
    ///
    /// Returns the transport error when the request cannot be opened; the
    /// session moves to [`ChatStatus::Error`] with the optimistic user
    /// message retained.
    pub async fn submit(&mut self) -> ClientResult<Option<EventStream>> {
        let text = self.draft.trim().to_owned();
        let turn = self.submit_with(&text).await?;
        if turn.is_some() {
            self.draft.clear();
        }
        Ok(turn)
    }

    /// Submit the given text as a user turn, leaving the draft untouched
    ///
    /// Used by quick prompts. Same rejection rules as [`Self::submit`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn submit_with(&mut self, text: &str) -> ClientResult<Option<EventStream>> {
        let text = text.trim();
        if text.is_empty() || self.is_busy() {
            debug!(busy = self.is_busy(), "submission rejected");
            return Ok(None);
        }

        // Optimistic append before any network confirmation
        let id = format!("msg_{}", Uuid::new_v4().simple());
        self.messages.push(UiMessage::user(id, text));

        self.open_turn().await.map(Some)
    }

    /// Reissue the request with the current history as-is
    ///
    /// No user message is appended; an empty history is a valid conversation
    /// opener. Rejected while a request is outstanding.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn regenerate(&mut self) -> ClientResult<Option<EventStream>> {
        if self.is_busy() {
            return Ok(None);
        }
        self.open_turn().await.map(Some)
    }

    async fn open_turn(&mut self) -> ClientResult<EventStream> {
        self.status = ChatStatus::Submitted;
        self.last_error = None;
        self.streaming_message = None;

        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());

        let request = ChatStreamRequest {
            messages: self.messages.clone(),
            id: Some(self.session_id.clone()),
            context: self.context.clone(),
        };

        match self.transport.send_messages(&request, &cancel).await {
            Ok(events) => Ok(events),
            Err(e) => {
                self.fail(e.to_string());
                Err(e)
            }
        }
    }

    // ========================================================================
    // Reduction
    // ========================================================================

    /// Apply one stream event to the session state
    ///
    /// Events must be applied in arrival order. Text increments extend only
    /// the trailing text part of the in-progress assistant message; already
    /// applied text is never reordered or duplicated.
    pub fn apply(&mut self, event: &StreamEvent) {
        match event {
            StreamEvent::Start { message_id } => {
                self.ensure_assistant(Some(message_id));
            }
            StreamEvent::TextStart { .. } => {
                self.ensure_assistant(None);
            }
            StreamEvent::TextDelta { delta, .. } => {
                self.ensure_assistant(None);
                if let Some(message) = self.messages.last_mut() {
                    message.append_text_delta(delta);
                }
            }
            StreamEvent::TextEnd { .. } => {}
            StreamEvent::Finish => {
                self.settle(ChatStatus::Idle);
            }
            StreamEvent::Error { error_text } => {
                self.fail(error_text.clone());
            }
        }
    }

    /// Pump a turn's event stream to completion
    ///
    /// A stream that ends without a finish marker is a clean stop
    /// (cancellation or disconnect): the session returns to idle with the
    /// partial content retained.
    ///
    /// # Errors
    ///
    /// Returns the stream error after moving the session to
    /// [`ChatStatus::Error`]; already-streamed content is preserved.
    pub async fn drive(&mut self, mut events: EventStream) -> ClientResult<()> {
        while let Some(next) = events.next().await {
            match next {
                Ok(event) => self.apply(&event),
                Err(e) => {
                    self.fail(e.to_string());
                    return Err(e);
                }
            }
        }
        if self.is_busy() {
            self.settle(ChatStatus::Idle);
        }
        Ok(())
    }

    /// Record a turn failure, keeping any partially streamed content visible
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("turn failed: {message}");
        self.last_error = Some(message);
        self.settle(ChatStatus::Error);
    }

    /// Cancel the outstanding request, if any
    ///
    /// Not an error: the session returns to idle and partial assistant
    /// content stays as-is. Cancelling an idle or completed session is a
    /// no-op.
    pub fn cancel(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        if self.is_busy() {
            self.status = ChatStatus::Idle;
            self.streaming_message = None;
        }
    }

    // ========================================================================
    // Internal state transitions
    // ========================================================================

    /// Append the turn's assistant message once, entering streaming
    fn ensure_assistant(&mut self, id: Option<&str>) {
        if self.streaming_message.is_none() {
            let id = id.map_or_else(
                || format!("msg_{}", Uuid::new_v4().simple()),
                ToOwned::to_owned,
            );
            self.messages.push(UiMessage::assistant(id.clone()));
            self.streaming_message = Some(id);
        }
        self.status = ChatStatus::Streaming;
    }

    /// Close the current turn with the given terminal status
    fn settle(&mut self, status: ChatStatus) {
        self.status = status;
        self.streaming_message = None;
        self.in_flight = None;
    }
}

impl<T: ChatTransport> Drop for ChatController<T> {
    // Unmounting a surface discards the controller; fire the token so an
    // in-flight stream stops consuming output.
    fn drop(&mut self) {
        if let Some(token) = &self.in_flight {
            token.cancel();
        }
    }
}
