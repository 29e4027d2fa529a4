// ABOUTME: Structured logging initialization for the coach service
// ABOUTME: tracing-subscriber with RUST_LOG env-filter, info default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info` for this crate. Calling twice is a
/// no-op so tests can initialize freely.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,aromi_coach_server=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
