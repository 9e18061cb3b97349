//! Application state shared across handlers.

use std::sync::Arc;

use goalhorn_runtime::ActiveQueue;

use crate::config::ApiConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Queue of the running day cycle, if any.
    pub queue: ActiveQueue,
}

impl AppState {
    /// Creates new application state.
    pub fn new(config: ApiConfig, queue: ActiveQueue) -> Self {
        Self {
            config: Arc::new(config),
            queue,
        }
    }
}
