// ABOUTME: Surface composition glue over the session controller
// ABOUTME: Full-page coach panel and floating widget as two instances of one type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! Conversational surfaces
//!
//! The coach panel and the floating widget are the same state-machine type
//! mounted twice. Each instance owns its controller exclusively; mounting
//! both at once yields two sessions that may diverge when used
//! interchangeably, which is accepted behavior, not a defect.

use aromi_core::UserContext;

use crate::controller::ChatController;
use crate::transport::ChatTransport;

/// Quick prompts offered by the coach panel's empty state
pub const QUICK_PROMPTS: [&str; 4] = [
    "Suggest a workout for today",
    "What should I eat for lunch?",
    "How can I improve my sleep?",
    "Tips to reduce stress",
];

/// Which rendering a surface instance backs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Full-page coach view
    CoachPanel,
    /// Floating overlay widget
    FloatingWidget,
}

/// One mounted conversational surface
pub struct ChatSurface<T: ChatTransport> {
    kind: SurfaceKind,
    open: bool,
    controller: ChatController<T>,
}

impl<T: ChatTransport> ChatSurface<T> {
    /// Mount a surface, capturing the context snapshot at this moment
    ///
    /// The floating widget grounds the coach on the profile only; the panel
    /// sends the full snapshot. The panel starts open, the widget closed.
    pub fn mount(kind: SurfaceKind, transport: T, context: Option<UserContext>) -> Self {
        let context = match kind {
            SurfaceKind::CoachPanel => context,
            SurfaceKind::FloatingWidget => context.map(|c| UserContext {
                profile: c.profile,
                assessment: None,
            }),
        };
        Self {
            kind,
            open: matches!(kind, SurfaceKind::CoachPanel),
            controller: ChatController::new(transport, context),
        }
    }

    /// Which rendering this instance backs
    #[must_use]
    pub const fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Whether the surface is currently shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Show the surface; the session is unaffected
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the surface; the session and any in-flight turn survive
    pub fn close(&mut self) {
        self.open = false;
    }

    /// The surface's session controller
    pub fn controller(&mut self) -> &mut ChatController<T> {
        &mut self.controller
    }

    /// Read-only view of the session controller
    #[must_use]
    pub const fn session(&self) -> &ChatController<T> {
        &self.controller
    }

    /// Empty-state greeting for this surface
    #[must_use]
    pub fn greeting(&self) -> String {
        match self.kind {
            SurfaceKind::CoachPanel => {
                let first_name = self
                    .controller
                    .context()
                    .and_then(|c| c.profile.as_ref())
                    .and_then(|p| p.full_name.as_deref())
                    .and_then(|name| name.split_whitespace().next());
                first_name.map_or_else(
                    || "Hello!".to_owned(),
                    |name| format!("Hello, {name}!"),
                )
            }
            SurfaceKind::FloatingWidget => "Hi! I'm AROMI".to_owned(),
        }
    }

    /// Unmount the surface, cancelling any in-flight turn
    pub fn unmount(mut self) {
        self.controller.cancel();
    }
}
