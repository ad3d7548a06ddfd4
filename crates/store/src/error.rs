//! Content store error types.

use thiserror::Error;

/// Errors that can occur while talking to the content store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed object does not exist.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The request never got a response.
    #[error("store request failed: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("store returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for logs.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("failed to decode store response: {0}")]
    Decode(String),

    /// The client is misconfigured.
    #[error("store configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
