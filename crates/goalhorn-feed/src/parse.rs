//! Decoding of NHL web API documents into domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::warn;

use goalhorn_models::{
    GameData, GameId, GameSnapshot, GameType, HighlightId, Period, PeriodScoring, PeriodType,
    RemoteState, ScheduledGame, ScoringPlay, Strength, Team,
};

use crate::error::{FeedError, Result};

/// A localised string: either plain, or `{"default": "..."}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Localized {
    Plain(String),
    Map { default: String },
}

impl Localized {
    fn text(&self) -> &str {
        match self {
            Localized::Plain(s) => s,
            Localized::Map { default } => default,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleDoc {
    #[serde(default)]
    game_week: Vec<ScheduleDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleDay {
    date: Option<String>,
    #[serde(default)]
    games: Vec<ScheduleGame>,
}

#[derive(Debug, Deserialize)]
struct ScheduleGame {
    id: u64,
    #[serde(rename = "startTimeUTC")]
    start_time_utc: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LandingDoc {
    id: u64,
    game_type: Option<u32>,
    game_state: Option<String>,
    #[serde(rename = "startTimeUTC")]
    start_time_utc: Option<String>,
    venue: Option<Localized>,
    home_team: Option<TeamDoc>,
    away_team: Option<TeamDoc>,
    summary: Option<SummaryDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamDoc {
    abbrev: String,
    common_name: Option<Localized>,
    score: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SummaryDoc {
    #[serde(default)]
    scoring: Vec<PeriodScoringDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeriodScoringDoc {
    period_descriptor: PeriodDescriptorDoc,
    #[serde(default)]
    goals: Vec<GoalDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeriodDescriptorDoc {
    number: u32,
    period_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalDoc {
    highlight_clip: Option<u64>,
    home_score: u32,
    away_score: u32,
    team_abbrev: Option<Localized>,
    first_name: Option<Localized>,
    last_name: Option<Localized>,
    name: Option<Localized>,
    #[serde(default)]
    assists: Vec<PlayerDoc>,
    time_in_period: Option<String>,
    strength: Option<String>,
    goal_modifier: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerDoc {
    first_name: Option<Localized>,
    last_name: Option<Localized>,
    name: Option<Localized>,
}

fn full_name(
    first: Option<&Localized>,
    last: Option<&Localized>,
    fallback: Option<&Localized>,
) -> Option<String> {
    match (first, last) {
        (Some(first), Some(last)) => Some(format!("{} {}", first.text(), last.text())),
        _ => fallback.map(|name| name.text().to_string()),
    }
}

fn parse_start_time(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| FeedError::InvalidStartTime(text.to_string()))
}

/// Decodes a schedule document and returns the games for `date`.
///
/// If no day in the document matches `date`, the first day is used.
/// Games without a parseable start time are dropped with a warning.
pub fn parse_schedule(body: &str, date: NaiveDate) -> Result<Vec<ScheduledGame>> {
    let doc: ScheduleDoc = serde_json::from_str(body)?;
    let wanted = date.format("%Y-%m-%d").to_string();

    let day = doc
        .game_week
        .iter()
        .find(|day| day.date.as_deref() == Some(wanted.as_str()))
        .or_else(|| doc.game_week.first())
        .ok_or(FeedError::MissingField("gameWeek"))?;

    let mut games = Vec::with_capacity(day.games.len());
    for game in &day.games {
        let start = game
            .start_time_utc
            .as_deref()
            .ok_or(FeedError::MissingField("startTimeUTC"))
            .and_then(parse_start_time);
        match start {
            Ok(start_time) => games.push(ScheduledGame::new(game.id, start_time)),
            Err(e) => warn!(game_id = game.id, error = %e, "skipping game without start time"),
        }
    }
    Ok(games)
}

/// A decoded game-center landing document.
#[derive(Debug)]
pub struct Landing(LandingDoc);

impl Landing {
    /// Decodes a landing document.
    pub fn parse(body: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(body)?))
    }

    /// Game ID of the document.
    pub fn game_id(&self) -> GameId {
        GameId::new(self.0.id)
    }

    /// Game type; regular season if absent.
    pub fn game_type(&self) -> GameType {
        self.0
            .game_type
            .map(GameType::from_code)
            .unwrap_or_default()
    }

    /// Lifecycle state reported by the document.
    pub fn remote_state(&self) -> RemoteState {
        self.0
            .game_state
            .as_deref()
            .map(RemoteState::from_code)
            .unwrap_or_default()
    }

    /// Static game data.
    pub fn game_data(&self) -> Result<GameData> {
        let home = self.0.home_team.as_ref().ok_or(FeedError::MissingField("homeTeam"))?;
        let away = self.0.away_team.as_ref().ok_or(FeedError::MissingField("awayTeam"))?;
        let start = self
            .0
            .start_time_utc
            .as_deref()
            .ok_or(FeedError::MissingField("startTimeUTC"))?;

        Ok(GameData {
            game_id: self.game_id(),
            home: to_team(home),
            away: to_team(away),
            start_time: parse_start_time(start)?,
            venue: self
                .0
                .venue
                .as_ref()
                .map(|v| v.text().to_string())
                .unwrap_or_default(),
            game_type: self.game_type(),
        })
    }

    /// Scoring summary snapshot. A game with no goals yet has an empty summary.
    pub fn snapshot(&self) -> GameSnapshot {
        let periods = self
            .0
            .summary
            .as_ref()
            .map(|summary| summary.scoring.iter().map(to_period_scoring).collect())
            .unwrap_or_default();

        GameSnapshot {
            game_id: self.game_id(),
            game_type: self.game_type(),
            home_score: self.0.home_team.as_ref().and_then(|t| t.score).unwrap_or(0),
            away_score: self.0.away_team.as_ref().and_then(|t| t.score).unwrap_or(0),
            periods,
        }
    }
}

fn to_team(doc: &TeamDoc) -> Team {
    let common_name = doc
        .common_name
        .as_ref()
        .map(|n| n.text().to_string())
        .unwrap_or_default();
    Team::from_abbreviation(doc.abbrev.clone(), common_name)
}

fn to_period_scoring(doc: &PeriodScoringDoc) -> PeriodScoring {
    let period = Period::new(
        doc.period_descriptor.number,
        PeriodType::from_code(&doc.period_descriptor.period_type),
    );
    PeriodScoring {
        period,
        goals: doc.goals.iter().map(to_scoring_play).collect(),
    }
}

fn to_scoring_play(doc: &GoalDoc) -> ScoringPlay {
    ScoringPlay {
        highlight_clip: doc.highlight_clip.map(HighlightId::new),
        home_score: doc.home_score,
        away_score: doc.away_score,
        team_abbrev: doc.team_abbrev.as_ref().map(|t| t.text().to_string()),
        scorer: full_name(
            doc.first_name.as_ref(),
            doc.last_name.as_ref(),
            doc.name.as_ref(),
        ),
        assists: doc
            .assists
            .iter()
            .filter_map(|a| full_name(a.first_name.as_ref(), a.last_name.as_ref(), a.name.as_ref()))
            .collect(),
        time_in_period: doc.time_in_period.clone().unwrap_or_default(),
        strength: doc
            .strength
            .as_deref()
            .map(Strength::from_code)
            .unwrap_or_default(),
        empty_net: doc.goal_modifier.as_deref() == Some("empty-net"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalhorn_models::GoalId;

    const SCHEDULE: &str = r#"{
        "gameWeek": [
            {"date": "2025-01-04", "games": [
                {"id": 2024020001, "startTimeUTC": "2025-01-04T00:00:00Z"},
                {"id": 2024020002, "startTimeUTC": "not a time"},
                {"id": 2024020003}
            ]},
            {"date": "2025-01-05", "games": [
                {"id": 2024020010, "startTimeUTC": "2025-01-05T23:00:00Z"}
            ]}
        ]
    }"#;

    const LANDING: &str = r#"{
        "id": 2024020500,
        "gameType": 2,
        "gameState": "LIVE",
        "startTimeUTC": "2025-01-05T00:00:00Z",
        "venue": {"default": "Scotiabank Arena"},
        "homeTeam": {"abbrev": "TOR", "commonName": {"default": "Maple Leafs"}, "score": 2},
        "awayTeam": {"abbrev": "BOS", "commonName": {"default": "Bruins"}, "score": 1},
        "summary": {"scoring": [
            {"periodDescriptor": {"number": 1, "periodType": "REG"}, "goals": [
                {
                    "highlightClip": 6366000001,
                    "homeScore": 1, "awayScore": 0,
                    "teamAbbrev": {"default": "TOR"},
                    "firstName": {"default": "Auston"}, "lastName": {"default": "Matthews"},
                    "assists": [
                        {"firstName": {"default": "Mitch"}, "lastName": {"default": "Marner"}},
                        {"name": {"default": "M. Rielly"}}
                    ],
                    "timeInPeriod": "04:12",
                    "strength": "pp"
                }
            ]},
            {"periodDescriptor": {"number": 2, "periodType": "REG"}, "goals": [
                {
                    "homeScore": 1, "awayScore": 1,
                    "teamAbbrev": {"default": "BOS"},
                    "name": {"default": "D. Pastrnak"},
                    "timeInPeriod": "10:00",
                    "strength": "ev"
                },
                {
                    "highlightClip": 6366000003,
                    "homeScore": 2, "awayScore": 1,
                    "teamAbbrev": "TOR",
                    "firstName": "William", "lastName": "Nylander",
                    "timeInPeriod": "19:30",
                    "strength": "ev",
                    "goalModifier": "empty-net"
                }
            ]}
        ]}
    }"#;

    #[test]
    fn test_parse_schedule_for_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 4).unwrap();
        let games = parse_schedule(SCHEDULE, date).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].game_id, GameId::new(2024020001));
    }

    #[test]
    fn test_parse_schedule_matches_later_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let games = parse_schedule(SCHEDULE, date).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].game_id, GameId::new(2024020010));
    }

    #[test]
    fn test_parse_schedule_empty_week() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 4).unwrap();
        let err = parse_schedule(r#"{"gameWeek": []}"#, date).unwrap_err();
        assert!(matches!(err, FeedError::MissingField("gameWeek")));
    }

    #[test]
    fn test_landing_game_data() {
        let landing = Landing::parse(LANDING).unwrap();
        let data = landing.game_data().unwrap();
        assert_eq!(data.home.location, "Toronto");
        assert_eq!(data.away.common_name, "Bruins");
        assert_eq!(data.venue, "Scotiabank Arena");
        assert_eq!(data.game_type, GameType::RegularSeason);
        assert_eq!(landing.remote_state(), RemoteState::Live);
    }

    #[test]
    fn test_landing_snapshot() {
        let snapshot = Landing::parse(LANDING).unwrap().snapshot();
        assert_eq!(snapshot.home_score, 2);
        assert_eq!(snapshot.periods.len(), 2);

        let refs = snapshot.highlight_refs();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].0, HighlightId::new(6366000001));

        let first = snapshot.goal_event(GoalId::from_score(1, 0)).unwrap();
        assert_eq!(first.scorer.as_deref(), Some("Auston Matthews"));
        assert_eq!(first.primary_assist.as_deref(), Some("Mitch Marner"));
        assert_eq!(first.secondary_assist.as_deref(), Some("M. Rielly"));
        assert_eq!(first.strength, Strength::PowerPlay);
        assert_eq!(first.time_remaining, "15:48");

        let third = snapshot.goal_event(GoalId::from_score(2, 1)).unwrap();
        assert_eq!(third.scorer.as_deref(), Some("William Nylander"));
        assert!(third.empty_net);
        assert_eq!(third.team.as_deref(), Some("TOR"));
    }

    #[test]
    fn test_landing_without_summary() {
        let landing = Landing::parse(r#"{"id": 7, "gameState": "FUT"}"#).unwrap();
        assert!(landing.snapshot().periods.is_empty());
        assert_eq!(landing.remote_state(), RemoteState::Future);
        assert!(matches!(
            landing.game_data(),
            Err(FeedError::MissingField("homeTeam"))
        ));
    }
}
