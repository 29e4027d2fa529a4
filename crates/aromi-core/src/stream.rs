// ABOUTME: Self-describing stream-event protocol for incremental coach responses
// ABOUTME: Each event names the message and part it extends; [DONE] terminates the stream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

use serde::{Deserialize, Serialize};

/// Literal sentinel sent as the final SSE data line of every response
pub const STREAM_TERMINATOR: &str = "[DONE]";

/// Marker header identifying the UI message stream protocol version
pub const UI_STREAM_HEADER_NAME: &str = "x-vercel-ai-ui-message-stream";

/// Protocol version carried in [`UI_STREAM_HEADER_NAME`]
pub const UI_STREAM_HEADER_VALUE: &str = "v1";

/// One event of the incremental response stream
///
/// Events for a single assistant message arrive in production order and must
/// be applied in that order. A stream ends with either [`StreamEvent::Finish`]
/// or [`StreamEvent::Error`], followed by the [`STREAM_TERMINATOR`] sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamEvent {
    /// Assistant turn opened
    Start {
        /// Id of the assistant message this stream builds
        #[serde(rename = "messageId")]
        message_id: String,
    },
    /// Text part opened
    TextStart {
        /// Id of the text part being streamed
        id: String,
    },
    /// One text increment extending the named part
    TextDelta {
        /// Id of the text part being extended
        id: String,
        /// Appended text
        delta: String,
    },
    /// Text part complete
    TextEnd {
        /// Id of the completed text part
        id: String,
    },
    /// End-of-stream marker, no further increments for this turn
    Finish,
    /// Error marker carrying a human-readable message
    Error {
        /// Human-readable failure description
        #[serde(rename = "errorText")]
        error_text: String,
    },
}
