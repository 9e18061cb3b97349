//! Error types for the runtime crate.

use thiserror::Error;

use goalhorn_models::{GoalId, HighlightId};

/// Errors that can occur in the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Lock poisoned (a task panicked while holding it).
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// The queue already has a consumer.
    #[error("command queue is already running")]
    AlreadyRunning,

    /// A spawned task panicked or was cancelled.
    #[error("task failed: {0}")]
    Task(String),
}

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Reasons a highlight candidate cannot be turned into a highlight yet.
///
/// None of these are fatal: the candidate is not stored, so the next poll
/// tries it again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Static game data has not been fetched yet.
    #[error("no game data")]
    MissingGameData,

    /// The snapshot has no scoring play for the goal.
    #[error("no scoring play for goal {0}")]
    GoalNotFound(GoalId),

    /// The scoring play has no scorer yet.
    #[error("no scorer for highlight {0}")]
    MissingScorer(HighlightId),
}
