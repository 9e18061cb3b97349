//! Goalhorn binary.
//!
//! Start with:
//! ```bash
//! GOALHORN_WEBHOOK_URL=https://example.com/hook cargo run -p goalhorn
//! ```

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use goalhorn::cli::Cli;
use goalhorn::config;
use goalhorn::logging::{self, LogFile};
use goalhorn_api::AppState;
use goalhorn_feed::NhlClient;
use goalhorn_publish::{Output, Publisher, WebhookChannel};
use goalhorn_runtime::{DaySession, Feeds};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Environment first so clap's env fallbacks see it
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());

    let cli = Cli::parse();

    let state_dir = cli.state_dir();
    let log_file = LogFile::open(config::log_path(&state_dir))?;
    logging::init(cli.log_filter(), log_file.clone());

    let publisher = build_output(&cli)?;
    let client = Arc::new(NhlClient::new(cli.feed_config())?);
    let session = DaySession::new(
        cli.runtime_config(),
        Feeds::from_source(client),
        publisher,
    );

    let state = AppState::new(cli.api_config(log_file.path()), session.active_queue());
    tokio::spawn(async move {
        if let Err(e) = goalhorn_api::serve(state).await {
            error!(error = %e, "API server stopped");
        }
    });

    info!(
        timezone = %cli.timezone,
        wake_time = %cli.wake_time,
        "Goalhorn started"
    );

    tokio::select! {
        _ = run_days(&session, &log_file) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}

/// Runs one cycle per day, forever.
async fn run_days(session: &DaySession, log_file: &LogFile) {
    loop {
        if let Err(e) = log_file.truncate() {
            warn!(error = %e, "Failed to reset log file");
        }

        match session.run_cycle().await {
            Ok(count) => info!(games = count, "Cycle finished"),
            Err(e) => error!(error = %e, "Cycle failed"),
        }

        session.wait_for_next_cycle().await;
    }
}

fn build_output(cli: &Cli) -> goalhorn_publish::Result<Arc<dyn Publisher>> {
    if cli.dry_run || cli.webhook_urls.is_empty() {
        if !cli.dry_run {
            warn!("No webhook configured, posts will only be logged");
        }
        return Ok(Arc::new(Output::dry_run()));
    }

    let mut output = Output::new();
    for (index, url) in cli.webhook_urls.iter().enumerate() {
        let channel = WebhookChannel::new(format!("webhook-{}", index + 1), url.clone())?;
        output.register(Arc::new(channel));
    }
    info!(channels = ?output.list(), "Publishing enabled");
    Ok(Arc::new(output))
}
