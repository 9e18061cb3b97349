//! HTTP client for the NHL web API.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use goalhorn_models::{GameData, GameId, GameSnapshot, RemoteState, ScheduledGame};

use crate::config::FeedConfig;
use crate::error::{FeedError, Result};
use crate::parse::{parse_schedule, Landing};
use crate::source::{RemoteStateSource, ScheduleSource, SnapshotSource};

/// NHL web API client implementing every collaborator trait.
#[derive(Clone)]
pub struct NhlClient {
    client: reqwest::Client,
    config: FeedConfig,
}

impl NhlClient {
    /// Creates a new client.
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    fn schedule_url(&self, date: NaiveDate) -> String {
        format!("{}/schedule/{}", self.config.base_url, date.format("%Y-%m-%d"))
    }

    fn landing_url(&self, game_id: GameId) -> String {
        format!("{}/gamecenter/{}/landing", self.config.base_url, game_id)
    }

    /// Fetches a document body, retrying transient failures with
    /// exponential backoff.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 1;
        loop {
            debug!(url = %url, attempt = attempt, "fetching");
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.config.max_attempts => {
                    let backoff = self.config.backoff_after(attempt);
                    warn!(
                        url = %url,
                        attempt = attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "fetch failed, retrying"
                    );
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    /// Fetches and decodes the landing document of a game.
    pub async fn landing(&self, game_id: GameId) -> Result<Landing> {
        let body = self.fetch(&self.landing_url(game_id)).await?;
        Landing::parse(&body)
    }
}

#[async_trait]
impl ScheduleSource for NhlClient {
    async fn games_on(&self, date: NaiveDate) -> Option<Vec<ScheduledGame>> {
        let url = self.schedule_url(date);
        let result = match self.fetch(&url).await {
            Ok(body) => parse_schedule(&body, date),
            Err(e) => Err(e),
        };
        match result {
            Ok(games) => Some(games),
            Err(e) => {
                error!(url = %url, error = %e, "could not load schedule");
                None
            }
        }
    }
}

#[async_trait]
impl SnapshotSource for NhlClient {
    async fn snapshot(&self, game_id: GameId) -> Option<GameSnapshot> {
        match self.landing(game_id).await {
            Ok(landing) => Some(landing.snapshot()),
            Err(e) => {
                error!(game_id = %game_id, error = %e, "could not load game snapshot");
                None
            }
        }
    }

    async fn game_data(&self, game_id: GameId) -> Option<GameData> {
        match self.landing(game_id).await.and_then(|l| l.game_data()) {
            Ok(data) => Some(data),
            Err(e) => {
                error!(game_id = %game_id, error = %e, "could not load game data");
                None
            }
        }
    }
}

#[async_trait]
impl RemoteStateSource for NhlClient {
    async fn remote_state(&self, game_id: GameId) -> RemoteState {
        match self.landing(game_id).await {
            Ok(landing) => landing.remote_state(),
            Err(e) => {
                warn!(game_id = %game_id, error = %e, "could not load game state");
                RemoteState::Unknown
            }
        }
    }
}
