// ABOUTME: Canonical wire models shared between the AROMI server and client surfaces
// ABOUTME: Message DTOs, user context snapshot, stream-event protocol, cancellation primitive
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! # AROMI core
//!
//! Shared definitions for the coach chat protocol. Both the server routes and
//! the client session controllers consume these types, so the two sides can
//! never drift apart on the wire format.

/// Cooperative cancellation primitive shared by orchestrator and transports
pub mod cancel;

/// Chat message and user context DTOs
pub mod models;

/// Self-describing incremental stream protocol
pub mod stream;

pub use cancel::CancellationToken;
pub use models::{
    ChatStreamRequest, HealthAssessment, MessagePart, Role, UiMessage, UserContext, UserProfile,
};
pub use stream::{StreamEvent, STREAM_TERMINATOR, UI_STREAM_HEADER_NAME, UI_STREAM_HEADER_VALUE};
