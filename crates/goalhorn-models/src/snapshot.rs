//! Per-poll game snapshot as returned by the snapshot source.

use serde::{Deserialize, Serialize};

use crate::game::GameType;
use crate::goal::{GoalEvent, Strength};
use crate::ids::{GameId, GoalId, HighlightId};
use crate::period::Period;

/// A single scoring play as reported upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPlay {
    /// Reference to the highlight clip, once one has been published upstream.
    pub highlight_clip: Option<HighlightId>,
    /// Home score after this goal.
    pub home_score: u32,
    /// Away score after this goal.
    pub away_score: u32,
    /// Abbreviation of the scoring team.
    pub team_abbrev: Option<String>,
    /// Scorer's name.
    pub scorer: Option<String>,
    /// Assisting players, primary first.
    #[serde(default)]
    pub assists: Vec<String>,
    /// Elapsed time in the period, `MM:SS`.
    pub time_in_period: String,
    /// Manpower situation.
    #[serde(default)]
    pub strength: Strength,
    /// Whether the net was empty.
    #[serde(default)]
    pub empty_net: bool,
}

impl ScoringPlay {
    /// Positional goal ID derived from the score after this play.
    pub fn goal_id(&self) -> GoalId {
        GoalId::from_score(self.home_score, self.away_score)
    }
}

/// Scoring plays of one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodScoring {
    /// The period.
    pub period: Period,
    /// Goals scored in the period, in order.
    #[serde(default)]
    pub goals: Vec<ScoringPlay>,
}

/// Current state of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Game ID.
    pub game_id: GameId,
    /// Kind of game.
    #[serde(default)]
    pub game_type: GameType,
    /// Current home score.
    pub home_score: u32,
    /// Current away score.
    pub away_score: u32,
    /// Scoring summary by period.
    #[serde(default)]
    pub periods: Vec<PeriodScoring>,
}

impl GameSnapshot {
    /// Creates an empty snapshot (no goals yet).
    pub fn empty(game_id: GameId) -> Self {
        Self {
            game_id,
            game_type: GameType::default(),
            home_score: 0,
            away_score: 0,
            periods: Vec::new(),
        }
    }

    /// Every scoring play that carries a highlight clip, in scoring order.
    pub fn highlight_refs(&self) -> Vec<(HighlightId, GoalId)> {
        self.periods
            .iter()
            .flat_map(|p| p.goals.iter())
            .filter_map(|goal| goal.highlight_clip.map(|clip| (clip, goal.goal_id())))
            .collect()
    }

    /// Looks up the scoring play for a goal ID.
    pub fn find_goal(&self, goal_id: GoalId) -> Option<(Period, &ScoringPlay)> {
        self.periods.iter().find_map(|p| {
            p.goals
                .iter()
                .find(|goal| goal.goal_id() == goal_id)
                .map(|goal| (p.period, goal))
        })
    }

    /// Builds the goal event for a goal ID, if the goal is in the summary.
    pub fn goal_event(&self, goal_id: GoalId) -> Option<GoalEvent> {
        self.find_goal(goal_id)
            .map(|(period, play)| GoalEvent::from_play(play, period, self.game_type))
    }
}
