//! Collaborator traits consumed by the monitoring runtime.
//!
//! Implementations must absorb their own failures: a fetch that fails for
//! any reason is reported as `None` (or [`RemoteState::Unknown`]) and the
//! caller simply tries again on its next poll.

use async_trait::async_trait;
use chrono::NaiveDate;

use goalhorn_models::{GameData, GameId, GameSnapshot, RemoteState, ScheduledGame};

/// Source of the day's schedule.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Games scheduled on `date`, in schedule order.
    ///
    /// Games whose start time cannot be parsed are left out. Returns `None`
    /// when the schedule could not be fetched.
    async fn games_on(&self, date: NaiveDate) -> Option<Vec<ScheduledGame>>;
}

/// Source of per-poll game snapshots.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Current scoring summary of a game.
    async fn snapshot(&self, game_id: GameId) -> Option<GameSnapshot>;

    /// Static data about a game (teams, venue, game type).
    async fn game_data(&self, game_id: GameId) -> Option<GameData>;
}

/// Source of a game's coarse lifecycle state.
#[async_trait]
pub trait RemoteStateSource: Send + Sync {
    /// Current lifecycle state; `Unknown` when it could not be fetched.
    async fn remote_state(&self, game_id: GameId) -> RemoteState;
}
