// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Velo booking client.

use thiserror::Error;

/// The primary error type used by the API client, the booking flow, and the CLI.
#[derive(Debug, Error)]
pub enum VeloError {
    /// Configuration errors (invalid values, unusable base URL, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure: connection refused, DNS, TLS, reset.
    #[error("http error: {message}")]
    Http {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's own error message when the body carried one.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The backend rejected the bearer token (missing, expired, or invalid).
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// A success response whose body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed user input (dates, times, identifiers).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VeloError {
    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Transport failures, timeouts, rate limiting and server-side 5xx are
    /// retryable. Client errors (4xx), auth failures and decode failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            VeloError::Http { .. } | VeloError::Timeout { .. } => true,
            VeloError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            VeloError::Api { status, .. } => Some(*status),
            VeloError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }
}
