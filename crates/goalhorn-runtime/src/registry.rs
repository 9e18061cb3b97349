//! Shared view of the monitors still running in a cycle.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use goalhorn_models::GameId;

use crate::monitor::MonitorState;

/// Monitors registered for the current cycle and their last reported state.
///
/// Monitors report state changes and deregister when done; the completion
/// watcher and the status command only read. Locks are held for a single
/// map operation.
#[derive(Debug, Clone, Default)]
pub struct MonitorRegistry {
    monitors: Arc<RwLock<HashMap<GameId, MonitorState>>>,
}

impl MonitorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a monitor, or updates its state if already registered.
    pub async fn register(&self, game_id: GameId, state: MonitorState) {
        self.monitors.write().await.insert(game_id, state);
    }

    /// Records a state change for a registered monitor.
    ///
    /// Monitors that already deregistered are not re-added.
    pub async fn update(&self, game_id: GameId, state: MonitorState) {
        if let Some(current) = self.monitors.write().await.get_mut(&game_id) {
            *current = state;
        }
    }

    /// Removes a monitor. Returns its last state if it was registered.
    pub async fn deregister(&self, game_id: GameId) -> Option<MonitorState> {
        self.monitors.write().await.remove(&game_id)
    }

    /// Returns the state of one monitor.
    pub async fn get(&self, game_id: GameId) -> Option<MonitorState> {
        self.monitors.read().await.get(&game_id).copied()
    }

    /// Returns all registered monitors ordered by game id.
    pub async fn snapshot(&self) -> Vec<(GameId, MonitorState)> {
        let mut monitors: Vec<_> = self
            .monitors
            .read()
            .await
            .iter()
            .map(|(id, state)| (*id, *state))
            .collect();
        monitors.sort_by_key(|(id, _)| *id);
        monitors
    }

    /// Number of registered monitors.
    pub async fn len(&self) -> usize {
        self.monitors.read().await.len()
    }

    /// Returns true once every monitor has deregistered.
    pub async fn is_empty(&self) -> bool {
        self.monitors.read().await.is_empty()
    }

    /// Removes all monitors.
    pub async fn clear(&self) {
        self.monitors.write().await.clear();
    }
}
