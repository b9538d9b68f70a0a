//! HTTP exchange errors.

use thiserror::Error;

/// Errors from the HTTP layer.
///
/// These represent network faults, non-success status codes, and request
/// URLs that could not be formed. The client never retries on its own; use
/// [`is_retryable`](CallError::is_retryable) to drive an external policy.
#[derive(Debug, Error)]
pub enum CallError {
    /// HTTP request failed due to network or protocol error, or the
    /// underlying client could not be constructed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success HTTP status code.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// Response body, or the canonical reason if the body was unreadable.
        message: String,
    },

    /// An endpoint path does not resolve below the API base URL.
    #[error("Path {path:?} does not resolve below the API base URL")]
    InvalidPath {
        /// The offending endpoint path.
        path: String,
    },
}

impl CallError {
    /// Returns `true` if this error is retryable.
    ///
    /// Timeout and connection errors are retryable, as are 5xx and 429
    /// status codes.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::InvalidPath { .. } => false,
        }
    }

    /// Returns the HTTP status code if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidPath { .. } => None,
        }
    }
}
