//! Error types for the feed crate.

use thiserror::Error;

/// Errors that can occur while fetching or decoding upstream data.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport failure (connect, timeout, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(u16),

    /// Body was not the JSON we expected.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field the record cannot do without was absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A start time that could not be parsed.
    #[error("invalid start time: {0}")]
    InvalidStartTime(String),
}

impl FeedError {
    /// Returns true if retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::Http(_) => true,
            FeedError::Status(code) => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FeedError::Status(503).is_transient());
        assert!(FeedError::Status(429).is_transient());
        assert!(!FeedError::Status(404).is_transient());
        assert!(!FeedError::MissingField("summary").is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = FeedError::MissingField("homeTeam");
        assert_eq!(err.to_string(), "missing field: homeTeam");
    }
}
