//! Error types for the Hubble publishers.
//!
//! Redaction and event shaping never fail: unknown shapes are passed through
//! or skipped. Errors only arise at the edges, when reading destination
//! configuration, serializing a payload, or handing it to a transport or sink.
//!
//! Errors carry a stable numeric code and a category so the host runtime can
//! decide on retry policy without string matching:
//! ```json
//! { "code": 21, "category": "transport", "recoverable": true }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for publisher operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Destination or publisher configuration errors.
    Config,
    /// Outbound HTTP delivery errors.
    Transport,
    /// JSON serialization errors.
    Serialization,
    /// Host-provided event sink errors.
    Sink,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Transport => write!(f, "transport"),
            ErrorCategory::Serialization => write!(f, "serialization"),
            ErrorCategory::Sink => write!(f, "sink"),
        }
    }
}

/// Unified error type for the publishers.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    // Transport errors (20-29)
    #[error("failed to deliver to {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} responded with HTTP {status}")]
    HttpStatus { endpoint: String, status: u16 },

    // Serialization errors (30-39)
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Sink errors (40-49)
    #[error("event sink rejected payload: {0}")]
    Sink(String),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Transport errors
    /// - 30-39: Serialization errors
    /// - 40-49: Sink errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidDestination(_) => 11,
            Error::Transport { .. } => 20,
            Error::HttpStatus { .. } => 21,
            Error::Json(_) => 30,
            Error::Sink(_) => 40,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidDestination(_) => ErrorCategory::Config,
            Error::Transport { .. } | Error::HttpStatus { .. } => ErrorCategory::Transport,
            Error::Json(_) => ErrorCategory::Serialization,
            Error::Sink(_) => ErrorCategory::Sink,
        }
    }

    /// Returns whether retrying the same call could succeed.
    ///
    /// The publishers never retry on their own; this is a hint for the host.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) | Error::InvalidDestination(_) => false,
            Error::Transport { .. } => true,
            // Server-side failures may clear up, client errors will not.
            Error::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            Error::Json(_) => false,
            Error::Sink(_) => true,
        }
    }
}
