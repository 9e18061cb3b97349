//! Turns repeated snapshots of a game into post and reply commands.

use std::sync::Arc;

use tracing::{debug, error, info};

use goalhorn_models::{GameData, GameSnapshot, GoalEvent, GoalId, GoalUpdate, Highlight, HighlightId};

use crate::command::Command;
use crate::error::ResolveError;
use crate::store::HighlightStore;

/// Builds the highlight for one clip reference of a snapshot.
fn resolve_candidate(
    snapshot: &GameSnapshot,
    game: Option<&Arc<GameData>>,
    id: HighlightId,
    goal_id: GoalId,
) -> Result<Highlight, ResolveError> {
    let game = game.ok_or(ResolveError::MissingGameData)?;
    let event = snapshot
        .goal_event(goal_id)
        .ok_or(ResolveError::GoalNotFound(goal_id))?;
    if event.scorer.is_none() {
        return Err(ResolveError::MissingScorer(id));
    }
    Ok(Highlight::new(id, goal_id, event, Arc::clone(game)))
}

/// Diffs a snapshot against the store and returns the commands to enqueue.
///
/// - an unknown clip is stored and yields [`Command::PostHighlight`]
/// - a known clip whose goal changed replaces the stored value and yields
///   [`Command::PostReply`] carrying both values
/// - an unchanged clip yields nothing
///
/// Candidates that cannot be resolved are logged and left out of the
/// store, so the next poll sees them as new again.
pub fn diff_snapshot(
    store: &mut HighlightStore,
    snapshot: &GameSnapshot,
    game: Option<&Arc<GameData>>,
) -> Vec<Command> {
    let mut commands = Vec::new();

    for (id, goal_id) in snapshot.highlight_refs() {
        let mut highlight = match resolve_candidate(snapshot, game, id, goal_id) {
            Ok(highlight) => highlight,
            Err(e) => {
                error!(
                    game_id = %snapshot.game_id,
                    highlight_id = %id,
                    error = %e,
                    "Could not resolve highlight"
                );
                continue;
            }
        };

        match store.get(id) {
            None => {
                info!(game_id = %snapshot.game_id, highlight_id = %id, goal_id = %goal_id, "New highlight");
                store.add(highlight.clone());
                commands.push(Command::post_highlight(highlight));
            }
            Some(previous) if previous.same_snapshot(&highlight) => {
                debug!(highlight_id = %id, "Highlight unchanged");
            }
            Some(previous) => {
                info!(game_id = %snapshot.game_id, highlight_id = %id, "Highlight changed");
                highlight.inherit_publications(previous);
                if let Some(previous) = store.update(highlight.clone()) {
                    commands.push(Command::post_reply(previous, highlight));
                }
            }
        }
    }

    commands
}

/// Decides which correction a reply announces.
///
/// Checks run in a fixed order and a later match overrides an earlier one:
/// time, changed assists, added assists, then scorer. Returns `None` when
/// none of them apply (for example, only the strength changed).
pub fn resolve_update(previous: &GoalEvent, updated: &GoalEvent) -> Option<GoalUpdate> {
    let mut update = None;

    if updated.is_time_modified(previous) {
        update = Some(GoalUpdate::TimeChanged);
    }

    let primary_modified = updated.is_primary_assist_modified(previous);
    let secondary_modified = updated.is_secondary_assist_modified(previous);
    if primary_modified && secondary_modified {
        update = Some(GoalUpdate::AssistsChanged);
    } else if primary_modified {
        update = Some(GoalUpdate::PrimaryAssistChanged);
    } else if secondary_modified {
        update = Some(GoalUpdate::SecondaryAssistChanged);
    }

    let primary_added = updated.is_primary_assist_added(previous);
    let secondary_added = updated.is_secondary_assist_added(previous);
    if primary_added && secondary_added {
        update = Some(GoalUpdate::AssistsAdded);
    } else if primary_added {
        update = Some(GoalUpdate::PrimaryAssistAdded);
    } else if secondary_added {
        update = Some(GoalUpdate::SecondaryAssistAdded);
    }

    if updated.is_scorer_modified(previous) {
        update = Some(GoalUpdate::ScorerChanged);
    }

    update
}
