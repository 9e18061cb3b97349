//! Game periods.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::GameType;

/// Length of a regulation period in seconds.
const REGULATION_LENGTH_SECS: u32 = 20 * 60;

/// Length of a regular-season overtime period in seconds.
const REGULAR_SEASON_OT_LENGTH_SECS: u32 = 5 * 60;

/// Kind of period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// One of the three regulation periods.
    Regulation,
    /// An overtime period.
    Overtime,
    /// The shootout.
    Shootout,
    /// Anything the upstream feed reports that we do not recognise.
    Other,
}

impl PeriodType {
    /// Parses the upstream period type code (`REG`, `OT`, `SO`).
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "REG" => PeriodType::Regulation,
            "OT" => PeriodType::Overtime,
            "SO" | "SHO" => PeriodType::Shootout,
            _ => PeriodType::Other,
        }
    }
}

/// A period of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Period number, starting at 1. Overtime periods continue the count (4, 5, ...).
    pub number: u32,
    /// Kind of period.
    pub period_type: PeriodType,
}

impl Period {
    /// Creates a new period.
    pub fn new(number: u32, period_type: PeriodType) -> Self {
        Self {
            number,
            period_type,
        }
    }

    /// Returns true if this is a regulation period.
    pub fn is_regulation(&self) -> bool {
        self.period_type == PeriodType::Regulation
    }

    /// Returns true if this is an overtime period.
    pub fn is_overtime(&self) -> bool {
        self.period_type == PeriodType::Overtime
    }

    /// Returns true if this is the shootout.
    pub fn is_shootout(&self) -> bool {
        self.period_type == PeriodType::Shootout
    }

    /// Short ordinal label used in posts: `1st`, `2nd`, `3rd`, `OT`, `2OT`, `SO`.
    pub fn ordinal(&self) -> String {
        match self.period_type {
            PeriodType::Regulation => match self.number {
                1 => "1st".to_string(),
                2 => "2nd".to_string(),
                3 => "3rd".to_string(),
                _ => String::new(),
            },
            PeriodType::Overtime => match self.number {
                5..=7 => format!("{}OT", self.number - 3),
                _ => "OT".to_string(),
            },
            PeriodType::Shootout => "SO".to_string(),
            PeriodType::Other => String::new(),
        }
    }

    /// Length of this period in seconds, or `None` when it has no clock.
    pub fn length_secs(&self, game_type: GameType) -> Option<u32> {
        match self.period_type {
            PeriodType::Regulation => Some(REGULATION_LENGTH_SECS),
            PeriodType::Overtime if game_type.is_playoff() => Some(REGULATION_LENGTH_SECS),
            PeriodType::Overtime => Some(REGULAR_SEASON_OT_LENGTH_SECS),
            PeriodType::Shootout | PeriodType::Other => None,
        }
    }

    /// Converts an elapsed `MM:SS` time-in-period into the time remaining.
    ///
    /// Falls back to the elapsed string when it cannot be parsed or the
    /// period has no clock.
    pub fn time_remaining(&self, game_type: GameType, time_in_period: &str) -> String {
        let (Some(length), Some(elapsed)) = (self.length_secs(game_type), parse_clock(time_in_period))
        else {
            return time_in_period.to_string();
        };
        let remaining = length.saturating_sub(elapsed);
        format!("{:02}:{:02}", remaining / 60, remaining % 60)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match (self.period_type, self.number) {
            (PeriodType::Regulation, 1) => "The first period",
            (PeriodType::Regulation, 2) => "The second period",
            (PeriodType::Regulation, 3) => "The third period",
            (PeriodType::Overtime, _) => "The OT period",
            (PeriodType::Shootout, _) => "The shootout",
            _ => "The period",
        };
        f.write_str(text)
    }
}

fn parse_clock(text: &str) -> Option<u32> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    (seconds < 60).then_some(minutes * 60 + seconds)
}
