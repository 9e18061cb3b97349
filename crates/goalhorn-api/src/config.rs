//! API configuration.

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// How long the health endpoint waits for the queue to run its probe.
    pub health_timeout: Duration,
    /// Log file shown by the log viewer.
    pub log_path: Option<PathBuf>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl ApiConfig {
    /// Creates a new API configuration with the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Sets the health probe timeout.
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Sets the log file path.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            health_timeout: Duration::from_secs(1),
            log_path: None,
            start_time: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_default() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.health_timeout, Duration::from_secs(1));
        assert!(config.log_path.is_none());
    }

    #[test]
    fn test_api_config_new() {
        let config = ApiConfig::new("127.0.0.1", 3000)
            .with_health_timeout(Duration::from_millis(250))
            .with_log_path("/tmp/goalhorn.log");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.health_timeout, Duration::from_millis(250));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/goalhorn.log")));
    }
}
