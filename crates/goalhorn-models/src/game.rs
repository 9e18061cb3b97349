//! Game-level types: schedule entries, static game data and remote lifecycle state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::GameId;
use crate::team::Team;

/// Kind of game, from the upstream numeric game type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// Pre-season exhibition game (code 1).
    Exhibition,
    /// Regular-season game (code 2).
    #[default]
    RegularSeason,
    /// Playoff game (code 3).
    Playoff,
    /// Four Nations Face-off round-robin game (code 19).
    FourNations,
    /// Four Nations Face-off final (code 20).
    FourNationsFinal,
    /// Any other code.
    Other(u32),
}

impl GameType {
    /// Maps an upstream game type code.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => GameType::Exhibition,
            2 => GameType::RegularSeason,
            3 => GameType::Playoff,
            19 => GameType::FourNations,
            20 => GameType::FourNationsFinal,
            other => GameType::Other(other),
        }
    }

    /// Returns true for playoff games.
    pub fn is_playoff(&self) -> bool {
        matches!(self, GameType::Playoff)
    }

    /// Returns true for any Four Nations tournament game, including the final.
    pub fn is_four_nations(&self) -> bool {
        matches!(self, GameType::FourNations | GameType::FourNationsFinal)
    }
}

/// Coarse lifecycle state of a game as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RemoteState {
    /// `FUT` - scheduled in the future.
    Future,
    /// `PRE` - pre-game warmups.
    Pregame,
    /// `LIVE` - in progress.
    Live,
    /// `CRIT` - in progress, late in a close game.
    Critical,
    /// `OVER` - play has ended, result not yet final.
    Over,
    /// `FINAL` - result is final.
    Final,
    /// `OFF` - result is official.
    Official,
    /// Unrecognised code or no data.
    #[default]
    Unknown,
}

impl RemoteState {
    /// Parses the upstream `gameState` code.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "FUT" => RemoteState::Future,
            "PRE" => RemoteState::Pregame,
            "LIVE" => RemoteState::Live,
            "CRIT" => RemoteState::Critical,
            "OVER" => RemoteState::Over,
            "FINAL" => RemoteState::Final,
            "OFF" => RemoteState::Official,
            _ => RemoteState::Unknown,
        }
    }

    /// Returns true once the game has ended for good.
    ///
    /// This is the trigger for a monitor's grace period.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RemoteState::Final | RemoteState::Official)
    }
}

impl fmt::Display for RemoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            RemoteState::Future => "FUT",
            RemoteState::Pregame => "PRE",
            RemoteState::Live => "LIVE",
            RemoteState::Critical => "CRIT",
            RemoteState::Over => "OVER",
            RemoteState::Final => "FINAL",
            RemoteState::Official => "OFF",
            RemoteState::Unknown => "UNKNOWN",
        };
        f.write_str(code)
    }
}

/// An entry in today's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledGame {
    /// Game ID.
    pub game_id: GameId,
    /// Scheduled puck drop.
    pub start_time: DateTime<Utc>,
}

impl ScheduledGame {
    /// Creates a new schedule entry.
    pub fn new(game_id: impl Into<GameId>, start_time: DateTime<Utc>) -> Self {
        Self {
            game_id: game_id.into(),
            start_time,
        }
    }
}

/// Static data about a game. Fetched once; does not change during play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    /// Game ID.
    pub game_id: GameId,
    /// Home team.
    pub home: Team,
    /// Away team.
    pub away: Team,
    /// Scheduled start.
    pub start_time: DateTime<Utc>,
    /// Venue name.
    #[serde(default)]
    pub venue: String,
    /// Kind of game.
    #[serde(default)]
    pub game_type: GameType,
}

impl GameData {
    /// Returns the location name of the team with the given abbreviation,
    /// or an empty string if it is neither of the two teams.
    pub fn team_location(&self, abbreviation: Option<&str>) -> String {
        match abbreviation {
            Some(abbrev) if abbrev == self.home.abbreviation => self.home.location.clone(),
            Some(abbrev) if abbrev == self.away.abbreviation => self.away.location.clone(),
            _ => String::new(),
        }
    }

    /// Returns the team opposing the team with the given abbreviation.
    pub fn opposition(&self, abbreviation: &str) -> Option<&Team> {
        if abbreviation == self.home.abbreviation {
            Some(&self.away)
        } else if abbreviation == self.away.abbreviation {
            Some(&self.home)
        } else {
            None
        }
    }

    /// Hashtags appended to every post about this game.
    pub fn hashtags(&self) -> String {
        let mut tags = vec![format!(
            "#{}vs{}",
            self.away.abbreviation, self.home.abbreviation
        )];
        for tag in [self.home.hashtag(), self.away.hashtag()] {
            if !tag.is_empty() {
                tags.push(tag.to_string());
            }
        }
        if self.game_type.is_four_nations() {
            tags.push("#4Nations".to_string());
        }
        tags.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_game(game_type: GameType) -> GameData {
        GameData {
            game_id: GameId::new(1),
            home: Team::from_abbreviation("TOR", "Maple Leafs"),
            away: Team::from_abbreviation("BOS", "Bruins"),
            start_time: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            venue: "Scotiabank Arena".to_string(),
            game_type,
        }
    }

    #[test]
    fn test_game_type_codes() {
        assert_eq!(GameType::from_code(2), GameType::RegularSeason);
        assert!(GameType::from_code(3).is_playoff());
        assert!(GameType::from_code(19).is_four_nations());
        assert!(GameType::from_code(20).is_four_nations());
        assert_eq!(GameType::from_code(9), GameType::Other(9));
    }

    #[test]
    fn test_remote_state_codes() {
        assert_eq!(RemoteState::from_code("LIVE"), RemoteState::Live);
        assert_eq!(RemoteState::from_code("off"), RemoteState::Official);
        assert_eq!(RemoteState::from_code(""), RemoteState::Unknown);
        assert_eq!(RemoteState::from_code("OVER").to_string(), "OVER");
    }

    #[test]
    fn test_remote_state_terminal() {
        assert!(RemoteState::Final.is_terminal());
        assert!(RemoteState::Official.is_terminal());
        assert!(!RemoteState::Over.is_terminal());
        assert!(!RemoteState::Live.is_terminal());
        assert!(!RemoteState::Unknown.is_terminal());
    }

    #[test]
    fn test_team_location() {
        let game = make_game(GameType::RegularSeason);
        assert_eq!(game.team_location(Some("TOR")), "Toronto");
        assert_eq!(game.team_location(Some("BOS")), "Boston");
        assert_eq!(game.team_location(Some("MTL")), "");
        assert_eq!(game.team_location(None), "");
        assert_eq!(game.opposition("TOR").unwrap().abbreviation, "BOS");
        assert!(game.opposition("MTL").is_none());
    }

    #[test]
    fn test_hashtags() {
        let game = make_game(GameType::RegularSeason);
        assert_eq!(game.hashtags(), "#BOSvsTOR #LeafsForever #NHLBruins");

        let game = make_game(GameType::FourNationsFinal);
        assert!(game.hashtags().ends_with("#4Nations"));
    }
}
