//! Core data models for Goalhorn.
//!
//! This crate provides the fundamental data types shared by the feed,
//! publishing and runtime crates: game identifiers and schedules, the
//! per-poll game snapshot, goal events and the highlights built from them.

pub mod game;
pub mod goal;
pub mod highlight;
pub mod ids;
pub mod period;
pub mod snapshot;
pub mod team;

// Re-export main types
pub use game::{GameData, GameType, RemoteState, ScheduledGame};
pub use goal::{GoalEvent, GoalUpdate, Score, Strength};
pub use highlight::{video_url, Highlight, PostRef, PublicationIds, PublicationSlot};
pub use ids::{GameId, GoalId, HighlightId};
pub use period::{Period, PeriodType};
pub use snapshot::{GameSnapshot, PeriodScoring, ScoringPlay};
pub use team::Team;
