//! Command-line interface definition using clap.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;
use clap::Parser;

use goalhorn_api::ApiConfig;
use goalhorn_feed::{config::DEFAULT_BASE_URL, FeedConfig};
use goalhorn_runtime::RuntimeConfig;

use crate::config;
use crate::logging::filter_for_verbosity;

/// Goalhorn - posts NHL goal highlights as they happen
#[derive(Parser, Debug)]
#[command(name = "goalhorn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Address the HTTP server binds to
    #[arg(long, env = "GOALHORN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP server listens on
    #[arg(short, long, env = "GOALHORN_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Path to state directory
    #[arg(short, long, env = config::STATE_DIR_ENV)]
    pub state_dir: Option<PathBuf>,

    /// Log posts instead of publishing them
    #[arg(long)]
    pub dry_run: bool,

    /// Webhook to publish posts to (repeatable)
    #[arg(long = "webhook-url", env = config::WEBHOOK_URL_ENV, value_delimiter = ',')]
    pub webhook_urls: Vec<String>,

    /// Time zone that defines "today" and the wake time
    #[arg(long, env = "GOALHORN_TIMEZONE", default_value = "America/New_York", value_parser = parse_timezone)]
    pub timezone: Tz,

    /// Local time the next day's cycle starts (HH:MM)
    #[arg(long, default_value = "12:00", value_parser = parse_wake_time)]
    pub wake_time: NaiveTime,

    /// Base URL of the NHL web API
    #[arg(long, env = "GOALHORN_FEED_URL", default_value = DEFAULT_BASE_URL)]
    pub feed_url: String,

    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_timezone(value: &str) -> Result<Tz, String> {
    Tz::from_str(value).map_err(|_| format!("unknown time zone: {}", value))
}

fn parse_wake_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| format!("expected HH:MM, got: {}", value))
}

impl Cli {
    /// Returns the state directory, falling back to `~/.goalhorn`.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(config::default_state_dir)
    }

    /// Returns the default tracing filter for the verbosity.
    pub fn log_filter(&self) -> &'static str {
        filter_for_verbosity(self.verbose)
    }

    /// Monitoring configuration.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig::new()
            .with_timezone(self.timezone)
            .with_wake_time(self.wake_time)
    }

    /// HTTP server configuration.
    pub fn api_config(&self, log_path: &Path) -> ApiConfig {
        ApiConfig::new(self.host.clone(), self.port)
            .with_health_timeout(Duration::from_secs(1))
            .with_log_path(log_path)
    }

    /// Feed client configuration.
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig::new().with_base_url(self.feed_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["goalhorn"]);
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 5000);
        assert!(!cli.dry_run);
        assert_eq!(cli.timezone, chrono_tz::America::New_York);
        assert_eq!(cli.wake_time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parse_options() {
        let cli = Cli::parse_from([
            "goalhorn",
            "--port",
            "8080",
            "--dry-run",
            "--timezone",
            "America/Vancouver",
            "--wake-time",
            "09:30",
            "--webhook-url",
            "https://a.example/hook,https://b.example/hook",
            "-vv",
        ]);
        assert_eq!(cli.port, 8080);
        assert!(cli.dry_run);
        assert_eq!(cli.timezone, chrono_tz::America::Vancouver);
        assert_eq!(cli.wake_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(cli.webhook_urls.len(), 2);
        assert_eq!(cli.log_filter(), "info,goalhorn=trace");
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["goalhorn", "--timezone", "Mars/Olympus"]).is_err());
        assert!(Cli::try_parse_from(["goalhorn", "--wake-time", "noon"]).is_err());
    }

    #[test]
    fn test_derived_configs() {
        let cli = Cli::parse_from(["goalhorn", "--state-dir", "/tmp/gh", "--wake-time", "11:00"]);
        assert_eq!(cli.state_dir(), PathBuf::from("/tmp/gh"));

        let runtime = cli.runtime_config();
        assert_eq!(runtime.wake_time, NaiveTime::from_hms_opt(11, 0, 0).unwrap());

        let log_path = config::log_path(&cli.state_dir());
        let api = cli.api_config(&log_path);
        assert_eq!(api.bind_address(), "0.0.0.0:5000");
        assert_eq!(api.log_path, Some(log_path));
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
