// ABOUTME: Chat message DTOs exchanged between client surfaces and the coach endpoint
// ABOUTME: UiMessage with ordered typed parts, roles, and the chat request envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

use serde::{Deserialize, Serialize};

mod context;

pub use context::{HealthAssessment, UserContext, UserProfile};

/// Sender of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End user turn
    User,
    /// Coach (model) turn
    Assistant,
}

impl Role {
    /// Wire representation of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One typed content segment of a message
///
/// Text segments are rendered and sent to the model. Any other segment type is
/// carried through opaquely so unknown part kinds survive a round trip in
/// their original position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MessagePart {
    /// Plain text segment
    #[serde(rename = "text")]
    Text {
        /// Text payload
        text: String,
    },
    /// Unrecognized segment, passed through unrendered
    #[serde(untagged)]
    Other(serde_json::Value),
}

impl MessagePart {
    /// Create a text part
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// A conversation message as displayed by a surface
///
/// Part order is display order and must be preserved through serialization.
/// While an assistant message streams, only its trailing text part grows;
/// once complete the message is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiMessage {
    /// Opaque unique message id
    pub id: String,
    /// Sender role
    pub role: Role,
    /// Ordered content segments
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

impl UiMessage {
    /// Create a user message with a single text part
    #[must_use]
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            parts: vec![MessagePart::text(text)],
        }
    }

    /// Create an empty assistant message awaiting streamed content
    #[must_use]
    pub fn assistant(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            parts: Vec::new(),
        }
    }

    /// Concatenated text of all text parts, in display order
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            if let MessagePart::Text { text } = part {
                out.push_str(text);
            }
        }
        out
    }

    /// Extend the trailing text part with one streamed increment
    ///
    /// Appends a new text part when the message is empty or ends in a
    /// non-text segment, so an increment never rewrites earlier content.
    pub fn append_text_delta(&mut self, delta: &str) {
        if let Some(MessagePart::Text { text }) = self.parts.last_mut() {
            text.push_str(delta);
        } else {
            self.parts.push(MessagePart::text(delta));
        }
    }
}

/// Request body for `POST /api/chat`
///
/// Absent `messages` means an empty conversation, which is valid. The context
/// snapshot is optional and may be empty or partially populated; the server
/// does not distinguish a skipped assessment from unavailable data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatStreamRequest {
    /// Full ordered conversation history, oldest first
    #[serde(default)]
    pub messages: Vec<UiMessage>,
    /// Opaque conversation/request correlation id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Profile and assessment snapshot captured at send time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<UserContext>,
}
