//! Wall-clock access and absolute-time waits.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::trace;

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall clock derived from tokio's timer, starting at a fixed time.
///
/// Under a paused tokio runtime it advances together with `tokio::time`,
/// which lets wall-clock waits run instantly in tests.
#[derive(Debug, Clone, Copy)]
pub struct OffsetClock {
    start: DateTime<Utc>,
    origin: tokio::time::Instant,
}

impl OffsetClock {
    /// Creates a clock that reads `start` now.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Clock for OffsetClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.origin.elapsed()).unwrap_or_default();
        self.start + elapsed
    }
}

/// Waits until the clock reads `target`.
///
/// Sleeps in steps of at most `max_step` and re-reads the clock after each
/// one, so a long wait does not drift when the host suspends or the clock
/// is adjusted. Returns immediately if `target` has passed.
pub async fn wait_until(clock: &dyn Clock, target: DateTime<Utc>, max_step: Duration) {
    loop {
        let remaining = match (target - clock.now()).to_std() {
            Ok(remaining) if !remaining.is_zero() => remaining,
            _ => return,
        };
        trace!(remaining_secs = remaining.as_secs(), "waiting for wall-clock time");
        tokio::time::sleep(remaining.min(max_step)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 17, 0, 0).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_offset_clock_follows_tokio_time() {
        let clock = OffsetClock::starting_at(start());
        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(clock.now(), start() + chrono::Duration::seconds(90));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_reaches_target() {
        let clock = OffsetClock::starting_at(start());
        let target = start() + chrono::Duration::minutes(10);

        wait_until(&clock, target, Duration::from_secs(60)).await;
        assert_eq!(clock.now(), target);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_past_target_returns_immediately() {
        let clock = OffsetClock::starting_at(start());
        let before = tokio::time::Instant::now();

        wait_until(&clock, start() - chrono::Duration::hours(1), Duration::from_secs(60)).await;
        assert_eq!(tokio::time::Instant::now(), before);
    }
}
