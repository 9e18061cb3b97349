//! Runtime configuration.

use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;

/// Configuration for game monitoring.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// How often a monitor polls the feed.
    pub poll_interval: Duration,
    /// How often the completion watcher checks for remaining monitors.
    pub watch_interval: Duration,
    /// How long a monitor keeps polling after the game has ended.
    pub grace_period: Duration,
    /// Local time of day the next cycle starts.
    pub wake_time: NaiveTime,
    /// Time zone that defines "today" and the wake time.
    pub timezone: Tz,
    /// Longest single sleep of a wall-clock wait before the clock is re-read.
    pub max_wait_step: Duration,
    /// How long past its scheduled start a game may still report `FUT`
    /// before its monitor warns that it looks postponed.
    pub start_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            watch_interval: Duration::from_secs(30),
            grace_period: Duration::from_secs(30 * 60),
            wake_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
            timezone: chrono_tz::America::New_York,
            max_wait_step: Duration::from_secs(60),
            start_timeout: Duration::from_secs(12 * 3600),
        }
    }
}

impl RuntimeConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the completion-watch interval.
    pub fn with_watch_interval(mut self, interval: Duration) -> Self {
        self.watch_interval = interval;
        self
    }

    /// Sets the post-game grace period.
    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.grace_period = grace;
        self
    }

    /// Sets the daily wake time.
    pub fn with_wake_time(mut self, wake_time: NaiveTime) -> Self {
        self.wake_time = wake_time;
        self
    }

    /// Sets the time zone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Sets the maximum wall-clock wait step.
    pub fn with_max_wait_step(mut self, step: Duration) -> Self {
        self.max_wait_step = step;
        self
    }

    /// Sets how long a game may stay unstarted before a warning.
    pub fn with_start_timeout(mut self, timeout: Duration) -> Self {
        self.start_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();

        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.watch_interval, Duration::from_secs(30));
        assert_eq!(config.grace_period, Duration::from_secs(1800));
        assert_eq!(config.wake_time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.start_timeout, Duration::from_secs(12 * 3600));
    }

    #[test]
    fn test_config_builder() {
        let config = RuntimeConfig::new()
            .with_poll_interval(Duration::from_secs(1))
            .with_watch_interval(Duration::from_secs(2))
            .with_grace_period(Duration::from_secs(3))
            .with_wake_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
            .with_timezone(chrono_tz::America::Toronto)
            .with_max_wait_step(Duration::from_secs(4))
            .with_start_timeout(Duration::from_secs(5));

        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.watch_interval, Duration::from_secs(2));
        assert_eq!(config.grace_period, Duration::from_secs(3));
        assert_eq!(config.wake_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(config.timezone, chrono_tz::America::Toronto);
        assert_eq!(config.max_wait_step, Duration::from_secs(4));
        assert_eq!(config.start_timeout, Duration::from_secs(5));
    }
}
