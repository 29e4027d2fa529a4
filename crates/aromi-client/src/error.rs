// ABOUTME: Error types for the client transports and session controllers
// ABOUTME: Transport, HTTP-status, decode, and mid-stream failure classes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

use thiserror::Error;

/// Convenience alias for results carrying [`ClientError`]
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-side failure, local to one surface's controller
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never reached the server or the connection failed
    #[error("transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the request before streaming began
    #[error("server rejected request ({status}): {message}")]
    Http {
        /// HTTP status code returned
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// A stream event could not be decoded
    #[error("failed to decode stream event: {0}")]
    Decode(String),

    /// The event stream failed mid-flight
    #[error("stream interrupted: {0}")]
    Stream(String),
}
