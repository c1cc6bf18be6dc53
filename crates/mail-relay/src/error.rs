//! Mail relay error types.

use thiserror::Error;

/// Errors that can occur when talking to the mail relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Transport-level HTTP failure (connect, timeout, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("relay rejected the request: HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
