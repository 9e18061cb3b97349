//! One day of monitoring: discover games, monitor them, sleep until tomorrow.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tokio::task::{AbortHandle, JoinSet};
use tracing::{debug, error, info};

use goalhorn_feed::{RemoteStateSource, ScheduleSource, SnapshotSource};
use goalhorn_models::ScheduledGame;
use goalhorn_publish::Publisher;

use crate::clock::{wait_until, Clock, SystemClock};
use crate::command::CommandContext;
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::monitor::{EventMonitor, MonitorState};
use crate::queue::{ActiveQueue, CommandQueue};
use crate::registry::MonitorRegistry;
use crate::watcher::CompletionWatcher;

/// The upstream data sources a session reads from.
#[derive(Clone)]
pub struct Feeds {
    /// Today's games.
    pub schedule: Arc<dyn ScheduleSource>,
    /// Per-poll game snapshots and static game data.
    pub snapshots: Arc<dyn SnapshotSource>,
    /// Coarse game state.
    pub states: Arc<dyn RemoteStateSource>,
}

impl Feeds {
    /// Uses one source for all three feeds.
    pub fn from_source<S>(source: Arc<S>) -> Self
    where
        S: ScheduleSource + SnapshotSource + RemoteStateSource + 'static,
    {
        Self {
            schedule: source.clone(),
            snapshots: source.clone(),
            states: source,
        }
    }
}

/// Drives the daily monitoring cycle.
pub struct DaySession {
    config: RuntimeConfig,
    feeds: Feeds,
    publisher: Arc<dyn Publisher>,
    clock: Arc<dyn Clock>,
    registry: MonitorRegistry,
    active: ActiveQueue,
}

impl DaySession {
    /// Creates a session on the system clock.
    pub fn new(config: RuntimeConfig, feeds: Feeds, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            config,
            feeds,
            publisher,
            clock: Arc::new(SystemClock),
            registry: MonitorRegistry::new(),
            active: ActiveQueue::new(),
        }
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Handle to the queue of the running cycle, for the health endpoint.
    pub fn active_queue(&self) -> ActiveQueue {
        self.active.clone()
    }

    /// Monitors of the running cycle.
    pub fn registry(&self) -> MonitorRegistry {
        self.registry.clone()
    }

    /// Today's date in the configured time zone.
    pub fn today(&self) -> NaiveDate {
        self.clock
            .now()
            .with_timezone(&self.config.timezone)
            .date_naive()
    }

    /// Asks the schedule for today's games.
    pub async fn discover_todays_events(&self) -> Option<Vec<ScheduledGame>> {
        let today = self.today();
        info!(date = %today, "Checking for games today");
        self.feeds.schedule.games_on(today).await
    }

    /// Runs one cycle. Returns the number of games monitored.
    ///
    /// Spawns a monitor per game and the completion watcher, then runs the
    /// command queue on this task until the watcher stops it. A monitor task
    /// that panics is reported as [`RuntimeError::Task`] after the rest of
    /// the cycle has finished.
    pub async fn run_cycle(&self) -> Result<usize> {
        let games = match self.discover_todays_events().await {
            Some(games) if !games.is_empty() => games,
            _ => {
                info!("There are no games today");
                return Ok(0);
            }
        };
        let count = games.len();
        info!(games = count, "Starting monitors");

        let queue = CommandQueue::new();
        for game in &games {
            self.registry
                .register(game.game_id, MonitorState::Scheduled)
                .await;
        }

        let mut tasks = JoinSet::new();
        for game in games {
            let monitor = EventMonitor::new(
                game,
                Arc::clone(&self.feeds.snapshots),
                Arc::clone(&self.feeds.states),
                queue.clone(),
                self.registry.clone(),
                Arc::clone(&self.clock),
                self.config.clone(),
            );
            tasks.spawn(supervise(monitor, self.registry.clone()));
        }
        let watcher = CompletionWatcher::new(
            self.registry.clone(),
            queue.clone(),
            self.config.watch_interval,
        );
        tasks.spawn(async move {
            watcher.run().await;
            Ok(())
        });

        self.active.set(queue.clone()).await;
        let ctx = CommandContext::new(Arc::clone(&self.publisher), self.registry.clone());
        let result = queue.run(&ctx).await;
        self.active.clear().await;

        if let Err(e) = &result {
            error!(error = %e, "Command queue failed, abandoning monitors");
            tasks.abort_all();
        }
        let mut failure = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(error = %e, "Monitor failed");
                    failure.get_or_insert(e);
                }
                Err(e) => debug!(error = %e, "Task cancelled"),
            }
        }
        self.registry.clear().await;

        result?;
        if let Some(e) = failure {
            return Err(e);
        }
        info!("All games are finished for the day");
        Ok(count)
    }

    /// The wake instant on a local date. A wake time skipped by a DST gap
    /// moves forward by whole hours to the first local time that exists.
    fn wake_on(&self, date: NaiveDate) -> DateTime<Utc> {
        let naive = date.and_time(self.config.wake_time);
        (0..=24)
            .find_map(|hours| {
                self.config
                    .timezone
                    .from_local_datetime(&(naive + chrono::Duration::hours(hours)))
                    .earliest()
            })
            .map(|t| t.with_timezone(&Utc))
            // No zone skips a whole day.
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
    }

    /// The next wake time strictly after `now`: today's if not yet reached,
    /// otherwise tomorrow's.
    pub fn next_wake_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.with_timezone(&self.config.timezone).date_naive();
        let wake = self.wake_on(today);
        if now < wake {
            return wake;
        }
        today.succ_opt().map_or(wake, |tomorrow| self.wake_on(tomorrow))
    }

    /// Sleeps until the next wake time.
    pub async fn wait_for_next_cycle(&self) {
        let target = self.next_wake_time(self.clock.now());
        info!(until = %target.with_timezone(&self.config.timezone), "Pausing until next cycle");
        wait_until(self.clock.as_ref(), target, self.config.max_wait_step).await;
    }
}

/// Aborts a task when dropped.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Runs a monitor on its own task. A monitor that dies early is
/// deregistered so the completion watcher can still stop the queue.
/// Aborting the supervisor aborts the monitor with it.
async fn supervise(monitor: EventMonitor, registry: MonitorRegistry) -> Result<()> {
    let game_id = monitor.game_id();
    let handle = tokio::spawn(monitor.run());
    let _guard = AbortOnDrop(handle.abort_handle());
    match handle.await {
        Ok(()) => Ok(()),
        Err(e) => {
            registry.deregister(game_id).await;
            Err(RuntimeError::Task(format!("monitor for game {}: {}", game_id, e)))
        }
    }
}
