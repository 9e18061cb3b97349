//! Goal events: the snapshot of a scoring play that highlights are diffed on.

use serde::{Deserialize, Serialize};

use crate::game::GameType;
use crate::period::Period;
use crate::snapshot::ScoringPlay;

/// Manpower situation when a goal was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    /// Even strength.
    #[default]
    Even,
    /// Power play.
    PowerPlay,
    /// Short-handed.
    ShortHanded,
}

impl Strength {
    /// Parses the upstream strength code (`ev`, `pp`, `sh`).
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "pp" => Strength::PowerPlay,
            "sh" => Strength::ShortHanded,
            _ => Strength::Even,
        }
    }
}

/// Kind of correction announced in a reply to an earlier goal post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalUpdate {
    /// The time of the goal changed.
    TimeChanged,
    /// Both assists changed.
    AssistsChanged,
    /// Only the primary assist changed.
    PrimaryAssistChanged,
    /// Only the secondary assist changed.
    SecondaryAssistChanged,
    /// Both assists were added.
    AssistsAdded,
    /// Only the primary assist was added.
    PrimaryAssistAdded,
    /// Only the secondary assist was added.
    SecondaryAssistAdded,
    /// The goal was credited to a different scorer.
    ScorerChanged,
}

/// Score after a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Score {
    /// Home goals.
    pub home: u32,
    /// Away goals.
    pub away: u32,
}

/// Snapshot of a goal at the time of a poll.
///
/// Two polls of the same highlight are compared on this value; any
/// difference is treated as an upstream correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEvent {
    /// Abbreviation of the scoring team.
    pub team: Option<String>,
    /// Scorer's name.
    pub scorer: Option<String>,
    /// Primary assist.
    pub primary_assist: Option<String>,
    /// Secondary assist.
    pub secondary_assist: Option<String>,
    /// Time remaining in the period, `MM:SS`.
    pub time_remaining: String,
    /// Period of the goal.
    pub period: Period,
    /// Manpower situation.
    pub strength: Strength,
    /// Whether the net was empty.
    pub empty_net: bool,
    /// Score after the goal.
    pub score: Score,
}

impl GoalEvent {
    /// Builds the goal event from an upstream scoring play.
    pub fn from_play(play: &ScoringPlay, period: Period, game_type: GameType) -> Self {
        Self {
            team: play.team_abbrev.clone(),
            scorer: play.scorer.clone(),
            primary_assist: play.assists.first().cloned(),
            secondary_assist: play.assists.get(1).cloned(),
            time_remaining: period.time_remaining(game_type, &play.time_in_period),
            period,
            strength: play.strength,
            empty_net: play.empty_net,
            score: Score {
                home: play.home_score,
                away: play.away_score,
            },
        }
    }

    /// The scorer was present before and is now a different player.
    pub fn is_scorer_modified(&self, previous: &GoalEvent) -> bool {
        previous.scorer.is_some() && self.scorer.is_some() && previous.scorer != self.scorer
    }

    /// The primary assist existed before and now differs (including removal).
    pub fn is_primary_assist_modified(&self, previous: &GoalEvent) -> bool {
        previous.primary_assist.is_some() && previous.primary_assist != self.primary_assist
    }

    /// The secondary assist existed before and now differs (including removal).
    pub fn is_secondary_assist_modified(&self, previous: &GoalEvent) -> bool {
        previous.secondary_assist.is_some() && previous.secondary_assist != self.secondary_assist
    }

    /// The primary assist was absent before and is now present.
    pub fn is_primary_assist_added(&self, previous: &GoalEvent) -> bool {
        previous.primary_assist.is_none() && self.primary_assist.is_some()
    }

    /// The secondary assist was absent before and is now present.
    pub fn is_secondary_assist_added(&self, previous: &GoalEvent) -> bool {
        previous.secondary_assist.is_none() && self.secondary_assist.is_some()
    }

    /// The time of the goal changed.
    pub fn is_time_modified(&self, previous: &GoalEvent) -> bool {
        previous.time_remaining != self.time_remaining
    }
}
