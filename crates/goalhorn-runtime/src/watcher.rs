//! Stops the command queue once every monitor of the cycle is done.

use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::command::Command;
use crate::queue::CommandQueue;
use crate::registry::MonitorRegistry;

/// Periodically checks the monitor registry.
///
/// While monitors remain it enqueues a [`Command::CheckGameStatus`] status
/// report; once the registry is empty it stops the queue and exits.
pub struct CompletionWatcher {
    registry: MonitorRegistry,
    queue: CommandQueue,
    interval: Duration,
}

impl CompletionWatcher {
    /// Creates a new watcher.
    pub fn new(registry: MonitorRegistry, queue: CommandQueue, interval: Duration) -> Self {
        Self {
            registry,
            queue,
            interval,
        }
    }

    /// Runs until every monitor has deregistered.
    pub async fn run(self) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!(interval_secs = self.interval.as_secs(), "Completion watcher started");

        loop {
            ticker.tick().await;

            let remaining = self.registry.len().await;
            if remaining == 0 {
                break;
            }

            debug!(remaining, "Monitors still running");
            if let Err(e) = self.queue.enqueue(Command::CheckGameStatus) {
                error!(error = %e, "Failed to enqueue status check");
            }
        }

        info!("All monitors finished, stopping command queue");
        if let Err(e) = self.queue.stop() {
            error!(error = %e, "Failed to stop command queue");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::MonitorState;
    use goalhorn_models::GameId;

    #[tokio::test(start_paused = true)]
    async fn test_stops_queue_when_registry_empty() {
        let registry = MonitorRegistry::new();
        let queue = CommandQueue::new();
        registry.register(GameId::new(1), MonitorState::Live).await;

        let handle = tokio::spawn(
            CompletionWatcher::new(registry.clone(), queue.clone(), Duration::from_secs(30)).run(),
        );

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(queue.names().unwrap(), vec!["Check Game Status"]);

        registry.deregister(GameId::new(1)).await;
        handle.await.unwrap();
        assert_eq!(
            queue.names().unwrap(),
            vec!["Check Game Status", "Shutdown"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_check_before_first_interval() {
        let registry = MonitorRegistry::new();
        let queue = CommandQueue::new();

        let handle = tokio::spawn(
            CompletionWatcher::new(registry, queue.clone(), Duration::from_secs(30)).run(),
        );
        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(queue.is_empty().unwrap());

        handle.await.unwrap();
        assert_eq!(queue.names().unwrap(), vec!["Shutdown"]);
    }
}
