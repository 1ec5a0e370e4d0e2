//! Error types for the client.

use thiserror::Error;

/// Errors that can occur in the client's task flows.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed in transit
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned {status}")]
    Status { status: reqwest::StatusCode },

    /// Add flow rejected an empty or whitespace-only description locally
    #[error("task description is empty")]
    EmptyDescription,
}
