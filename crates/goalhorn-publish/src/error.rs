//! Error types for publishing channels.

use thiserror::Error;

/// Errors a channel can report for a single post.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Transport failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(u16),

    /// The endpoint accepted the request but returned no usable post reference.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The reply parent lacks the field this channel needs.
    #[error("invalid parent post: {0}")]
    InvalidParent(String),
}

/// Result type for channel operations.
pub type Result<T> = std::result::Result<T, PublishError>;
