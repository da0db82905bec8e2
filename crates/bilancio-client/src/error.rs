//! Analysis client error types.

use std::path::PathBuf;

use bilancio_core::CoreError;
use thiserror::Error;

/// Errors that can occur when submitting an analysis.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The caller broke the request contract; nothing was sent.
    #[error(transparent)]
    Contract(#[from] CoreError),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status code.
    #[error("analysis failed ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// `detail` field of the error body, or the raw body.
        message: String,
    },

    /// The success body did not match the response contract.
    #[error("failed to decode analysis response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No response within the configured bound.
    #[error("analysis timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The caller cancelled the request before it completed.
    #[error("analysis cancelled")]
    Cancelled,

    /// Another submission holds the single-flight guard.
    #[error("an analysis is already in flight")]
    Busy,

    /// The upload file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// HTTP status, when the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
