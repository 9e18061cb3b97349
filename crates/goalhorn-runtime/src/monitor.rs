//! Per-game monitor.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use goalhorn_feed::{RemoteStateSource, SnapshotSource};
use goalhorn_models::{GameData, GameId, RemoteState, ScheduledGame};

use crate::clock::{wait_until, Clock};
use crate::config::RuntimeConfig;
use crate::diff::diff_snapshot;
use crate::queue::CommandQueue;
use crate::registry::MonitorRegistry;
use crate::store::HighlightStore;

/// Lifecycle state of a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorState {
    /// Waiting for the scheduled start.
    Scheduled,
    /// Polling a game in progress.
    Live,
    /// The game has ended; still polling for late highlights.
    GracePeriod,
    /// Finished.
    Done,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonitorState::Scheduled => "scheduled",
            MonitorState::Live => "live",
            MonitorState::GracePeriod => "grace_period",
            MonitorState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Watches one game from its scheduled start until the grace period after
/// it ends.
///
/// Every poll fetches the snapshot, diffs it against the monitor's own
/// [`HighlightStore`] and enqueues the resulting commands. A failed fetch
/// skips that poll only.
pub struct EventMonitor {
    game: ScheduledGame,
    state: MonitorState,
    store: HighlightStore,
    game_data: Option<Arc<GameData>>,
    snapshots: Arc<dyn SnapshotSource>,
    states: Arc<dyn RemoteStateSource>,
    queue: CommandQueue,
    registry: MonitorRegistry,
    clock: Arc<dyn Clock>,
    config: RuntimeConfig,
}

impl EventMonitor {
    /// Creates a monitor for a scheduled game.
    pub fn new(
        game: ScheduledGame,
        snapshots: Arc<dyn SnapshotSource>,
        states: Arc<dyn RemoteStateSource>,
        queue: CommandQueue,
        registry: MonitorRegistry,
        clock: Arc<dyn Clock>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            game,
            state: MonitorState::Scheduled,
            store: HighlightStore::new(),
            game_data: None,
            snapshots,
            states,
            queue,
            registry,
            clock,
            config,
        }
    }

    /// Game being monitored.
    pub fn game_id(&self) -> GameId {
        self.game.game_id
    }

    /// Current state.
    pub fn state(&self) -> MonitorState {
        self.state
    }

    async fn transition(&mut self, state: MonitorState) {
        info!(game_id = %self.game.game_id, from = %self.state, to = %state, "Monitor state changed");
        self.state = state;
        self.registry.update(self.game.game_id, state).await;
    }

    /// Runs the monitor to completion and deregisters it.
    pub async fn run(mut self) {
        let game_id = self.game.game_id;
        self.registry.register(game_id, self.state).await;

        info!(game_id = %game_id, start = %self.game.start_time, "Waiting for game start");
        wait_until(self.clock.as_ref(), self.game.start_time, self.config.max_wait_step).await;
        self.transition(MonitorState::Live).await;

        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut grace_deadline: Option<Instant> = None;
        let mut stall_reported = false;

        loop {
            ticker.tick().await;
            self.poll().await;

            match grace_deadline {
                None => {
                    let remote = self.states.remote_state(game_id).await;
                    debug!(game_id = %game_id, remote_state = %remote, "Remote state");
                    if remote.is_terminal() {
                        grace_deadline = Some(Instant::now() + self.config.grace_period);
                        self.transition(MonitorState::GracePeriod).await;
                    } else if remote == RemoteState::Future
                        && !stall_reported
                        && start_overdue(
                            self.clock.now(),
                            self.game.start_time,
                            self.config.start_timeout,
                        )
                    {
                        warn!(
                            game_id = %game_id,
                            start = %self.game.start_time,
                            "Game has not started long after its scheduled start, possibly postponed"
                        );
                        stall_reported = true;
                    }
                }
                Some(deadline) if Instant::now() >= deadline => break,
                Some(_) => {}
            }
        }

        self.transition(MonitorState::Done).await;
        self.store.clear();
        self.registry.deregister(game_id).await;
        info!(game_id = %game_id, "Monitor finished");
    }

    /// One poll: fetch, diff, enqueue.
    async fn poll(&mut self) {
        let game_id = self.game.game_id;

        if self.game_data.is_none() {
            self.game_data = self.snapshots.game_data(game_id).await.map(Arc::new);
        }

        let Some(snapshot) = self.snapshots.snapshot(game_id).await else {
            warn!(game_id = %game_id, "No snapshot this poll");
            return;
        };

        for command in diff_snapshot(&mut self.store, &snapshot, self.game_data.as_ref()) {
            if let Err(e) = self.queue.enqueue(command) {
                error!(game_id = %game_id, error = %e, "Failed to enqueue command");
            }
        }
    }
}

/// Returns true once `timeout` has passed since the scheduled start.
fn start_overdue(now: DateTime<Utc>, start: DateTime<Utc>, timeout: Duration) -> bool {
    (now - start).to_std().is_ok_and(|late| late >= timeout)
}
