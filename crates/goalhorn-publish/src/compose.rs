//! Post and reply text for highlights.

use goalhorn_models::{GoalEvent, GoalUpdate, Highlight, Strength};

/// Composes the original post for a highlight.
///
/// Returns `None` when the goal has no scorer or no scoring team yet; the
/// post is held back until a later poll fills them in.
pub fn compose_post(highlight: &Highlight) -> Option<String> {
    let event = &highlight.event;
    let scorer = event.scorer.as_deref()?;
    let team_abbrev = event.team.as_deref()?;
    let team = highlight.game.team_location(Some(team_abbrev));

    let headline = if event.empty_net {
        format!("Empty net goal for {}!", team)
    } else {
        match event.strength {
            Strength::PowerPlay => format!("Power play goal for {}!", team),
            Strength::ShortHanded => format!("Short-handed goal for {}!", team),
            Strength::Even => format!("{} goal!", team),
        }
    };

    let mut text = format!(
        "{}\n\nScored by {} with {} remaining in the {} period.\n",
        headline,
        scorer,
        event.time_remaining,
        event.period.ordinal()
    );

    match (&event.primary_assist, &event.secondary_assist) {
        (Some(primary), Some(secondary)) => {
            text.push_str(&format!("\nAssisted by {} and {}.\n", primary, secondary));
        }
        (Some(primary), None) => text.push_str(&format!("\nAssisted by {}.\n", primary)),
        _ => {}
    }

    text.push('\n');
    text.push_str(&score_footer(highlight));
    Some(text)
}

/// Composes a reply announcing a correction to an earlier post.
///
/// Returns `None` when the corrected goal has lost its scorer; upstream
/// sometimes blanks a goal after it was posted and replying to that would
/// only add noise.
pub fn compose_reply(update: GoalUpdate, highlight: &Highlight) -> Option<String> {
    let event = &highlight.event;
    let scorer = event.scorer.as_deref()?;
    let team = highlight.game.team_location(event.team.as_deref());

    let text = match update {
        GoalUpdate::TimeChanged => format!(
            "The time of the {} goal has been changed to {} remaining in the {} period.",
            team,
            event.time_remaining,
            event.period.ordinal()
        ),
        GoalUpdate::AssistsChanged => format!(
            "The assists on the {} goal have been changed to {}.",
            team,
            assist_list(event)
        ),
        GoalUpdate::PrimaryAssistChanged => format!(
            "The primary assist on the {} goal has been changed to {}.",
            scorer,
            name_or_none(&event.primary_assist)
        ),
        GoalUpdate::SecondaryAssistChanged => format!(
            "The secondary assist on the {} goal has been changed to {}.",
            scorer,
            name_or_none(&event.secondary_assist)
        ),
        GoalUpdate::AssistsAdded => format!(
            "{} have been credited with assists on the {} goal.",
            assist_list(event),
            scorer
        ),
        GoalUpdate::PrimaryAssistAdded => format!(
            "{} has been credited with the primary assist on the {} goal.",
            name_or_none(&event.primary_assist),
            scorer
        ),
        GoalUpdate::SecondaryAssistAdded => format!(
            "{} has been credited with the secondary assist on the {} goal.",
            name_or_none(&event.secondary_assist),
            scorer
        ),
        GoalUpdate::ScorerChanged => {
            format!("The {} goal has been credited to {}.", team, scorer)
        }
    };

    Some(format!("{}\n\n{}", text, highlight.game.hashtags()))
}

/// Score lines and hashtags closing every goal post.
fn score_footer(highlight: &Highlight) -> String {
    let game = &highlight.game;
    let score = highlight.event.score;
    format!(
        "{}: {}\n{}: {}\n\n{}",
        game.home.location,
        score.home,
        game.away.location,
        score.away,
        game.hashtags()
    )
}

fn assist_list(event: &GoalEvent) -> String {
    match (&event.primary_assist, &event.secondary_assist) {
        (Some(primary), Some(secondary)) => format!("{} and {}", primary, secondary),
        (Some(primary), None) => primary.clone(),
        (None, Some(secondary)) => secondary.clone(),
        (None, None) => "none".to_string(),
    }
}

fn name_or_none(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("none")
}
