// ABOUTME: Cooperative cancellation token propagated from transport into the stream pipeline
// ABOUTME: Clonable flag with async wait; cancelling twice or after completion is a no-op
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Cooperative cancellation signal
///
/// Clones share one flag. Once fired the token stays cancelled; firing it
/// again is a no-op, so cancelling an already-completed stream is harmless.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancellationToken {
    /// Create an unfired token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the token, waking every pending [`CancellationToken::cancelled`] wait
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Whether the token has fired
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolve once the token fires; returns immediately if it already has
    pub async fn cancelled(&self) {
        loop {
            // Register the waiter before re-checking the flag so a cancel
            // between check and await cannot be missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
