//! End-to-end day cycle: two games, one with a failing first poll.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tokio::time::Instant;

use goalhorn_feed::{RemoteStateSource, ScheduleSource, SnapshotSource};
use goalhorn_models::{
    GameData, GameId, GameSnapshot, GameType, HighlightId, Period, PeriodScoring, PeriodType,
    PostRef, PublicationIds, RemoteState, ScheduledGame, ScoringPlay, Strength, Team,
};
use goalhorn_publish::Publisher;
use goalhorn_runtime::{Command, DaySession, Feeds, OffsetClock, RuntimeConfig};

const GAME_A: u64 = 2024020101;
const GAME_B: u64 = 2024020102;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 18, 0, 0, 0).unwrap()
}

fn snapshot(game_id: GameId, clip: u64, scorer: &str) -> GameSnapshot {
    GameSnapshot {
        game_id,
        game_type: GameType::RegularSeason,
        home_score: 1,
        away_score: 0,
        periods: vec![PeriodScoring {
            period: Period::new(1, PeriodType::Regulation),
            goals: vec![ScoringPlay {
                highlight_clip: Some(HighlightId::new(clip)),
                home_score: 1,
                away_score: 0,
                team_abbrev: Some("COL".to_string()),
                scorer: Some(scorer.to_string()),
                assists: vec!["Cale Makar".to_string()],
                time_in_period: "04:12".to_string(),
                strength: Strength::Even,
                empty_net: false,
            }],
        }],
    }
}

/// Game A fails its first poll; game B always answers.
#[derive(Default)]
struct Feed {
    polls: Mutex<HashMap<GameId, usize>>,
}

#[async_trait]
impl ScheduleSource for Feed {
    async fn games_on(&self, _date: NaiveDate) -> Option<Vec<ScheduledGame>> {
        Some(vec![
            ScheduledGame::new(GAME_A, start()),
            ScheduledGame::new(GAME_B, start()),
        ])
    }
}

#[async_trait]
impl SnapshotSource for Feed {
    async fn snapshot(&self, game_id: GameId) -> Option<GameSnapshot> {
        let poll = {
            let mut polls = self.polls.lock().unwrap();
            let count = polls.entry(game_id).or_default();
            *count += 1;
            *count
        };
        match game_id.value() {
            GAME_A if poll == 1 => None,
            GAME_A => Some(snapshot(game_id, 9001, "Nathan MacKinnon")),
            _ => Some(snapshot(game_id, 9002, "Mikko Rantanen")),
        }
    }

    async fn game_data(&self, game_id: GameId) -> Option<GameData> {
        Some(GameData {
            game_id,
            home: Team::from_abbreviation("COL", "Avalanche"),
            away: Team::from_abbreviation("STL", "Blues"),
            start_time: start(),
            venue: "Ball Arena".to_string(),
            game_type: GameType::RegularSeason,
        })
    }
}

#[async_trait]
impl RemoteStateSource for Feed {
    async fn remote_state(&self, _game_id: GameId) -> RemoteState {
        RemoteState::Final
    }
}

/// Records what was published and when.
#[derive(Default)]
struct Recorder {
    posts: Mutex<Vec<(String, Duration)>>,
    origin: Mutex<Option<Instant>>,
}

impl Recorder {
    fn posts_for(&self, scorer: &str) -> Vec<Duration> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|(text, _)| text.contains(scorer))
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait]
impl Publisher for Recorder {
    async fn publish(
        &self,
        text: &str,
        _media: Option<&str>,
        _parents: Option<&PublicationIds>,
    ) -> PublicationIds {
        let origin = self.origin.lock().unwrap().unwrap_or_else(Instant::now);
        self.posts
            .lock()
            .unwrap()
            .push((text.to_string(), origin.elapsed()));
        let mut ids = PublicationIds::new();
        ids.insert("recorder", PostRef::with_id("1"));
        ids
    }
}

fn make_session(recorder: Arc<Recorder>) -> DaySession {
    let config = RuntimeConfig::new().with_grace_period(Duration::from_secs(60));
    DaySession::new(config, Feeds::from_source(Arc::new(Feed::default())), recorder)
        .with_clock(Arc::new(OffsetClock::starting_at(start())))
}

#[tokio::test(start_paused = true)]
async fn test_failed_first_poll_is_announced_on_second() {
    let recorder = Arc::new(Recorder::default());
    *recorder.origin.lock().unwrap() = Some(Instant::now());
    let session = make_session(recorder.clone());

    assert_eq!(session.run_cycle().await.unwrap(), 2);

    // Game B is announced from the first poll, game A from the second.
    assert_eq!(recorder.posts_for("Mikko Rantanen"), vec![Duration::ZERO]);
    assert_eq!(
        recorder.posts_for("Nathan MacKinnon"),
        vec![Duration::from_secs(5)]
    );
    assert!(session.registry().is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_health_probe_during_cycle() {
    let recorder = Arc::new(Recorder::default());
    let session = Arc::new(make_session(recorder));
    let active = session.active_queue();

    let cycle = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.run_cycle().await })
    };

    tokio::time::sleep(Duration::from_secs(12)).await;
    let queue = active.get().await.expect("cycle should be running");
    let (probe, rx) = Command::check_health();
    queue.enqueue(probe).unwrap();
    tokio::time::timeout(Duration::from_secs(1), rx)
        .await
        .expect("probe should be answered")
        .unwrap();

    assert_eq!(cycle.await.unwrap().unwrap(), 2);
    assert!(active.get().await.is_none());
}
