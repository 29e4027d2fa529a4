// ABOUTME: Client-side session controllers and transports for the AROMI coach surfaces
// ABOUTME: Headless state machine per surface; HTTP/SSE transport; surface composition glue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

#![deny(unsafe_code)]

//! # AROMI client
//!
//! Each conversational surface owns one [`ChatController`]: input draft,
//! message history, status state machine, and the network transport. Two
//! surfaces (the full-page coach panel and the floating widget) are two
//! independent instances of the same parametrized type against the same
//! endpoint; they are never merged and never share state, so a message sent
//! through one is invisible to the other by design.
//!
//! The controller is headless and pull-based: `submit` opens a turn and
//! returns its event stream, and the surface pumps events back in through
//! `apply` (or lets `drive` pump to completion). Unmounting a surface cancels
//! its in-flight turn; since nothing else pumps events, no state can mutate
//! after unmount.

/// Client-side error types
pub mod error;

/// Per-surface session state machine
pub mod controller;

/// Surface composition over the controller
pub mod surface;

/// Transport seam between a controller and the coach endpoint
pub mod transport;

pub use controller::{ChatController, ChatStatus};
pub use error::{ClientError, ClientResult};
pub use surface::{ChatSurface, SurfaceKind, QUICK_PROMPTS};
pub use transport::{ChatTransport, EventStream, HttpTransport};
