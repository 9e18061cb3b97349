//! Highlights and the per-channel publication record attached to them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::game::GameData;
use crate::goal::GoalEvent;
use crate::ids::{GameId, GoalId, HighlightId};

/// Brightcove player URL prefix for highlight clips.
const VIDEO_URL_PREFIX: &str =
    "https://players.brightcove.net/6415718365001/EXtG1xJ7H_default/index.html?videoId=";

/// Returns the public video URL for a highlight clip.
pub fn video_url(id: HighlightId) -> String {
    format!("{}{}", VIDEO_URL_PREFIX, id)
}

/// Reference to a published post on one channel.
///
/// Channels identify posts differently (a single id, or a uri/cid pair), so
/// this is a small string map rather than a single id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostRef(BTreeMap<String, String>);

impl PostRef {
    /// Creates a reference holding a single `id` field.
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("id".to_string(), id.into());
        Self(fields)
    }

    /// Adds a field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns a field value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the `id` field.
    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }
}

/// Post references keyed by channel name. Channels that failed are absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicationIds(BTreeMap<String, PostRef>);

impl PublicationIds {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the post reference for a channel.
    pub fn insert(&mut self, channel: impl Into<String>, post: PostRef) {
        self.0.insert(channel.into(), post);
    }

    /// Returns the post reference for a channel.
    pub fn get(&self, channel: &str) -> Option<&PostRef> {
        self.0.get(channel)
    }

    /// Channels with a successful publication.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of channels with a successful publication.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no channel succeeded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Write-once cell for a highlight's publication ids.
///
/// The monitor that owns a highlight and the queue consumer that posts it
/// run on different tasks. The consumer fills the slot once when the
/// original post goes out; replacements of the same highlight share the
/// slot so later replies can find the parent post.
#[derive(Debug, Clone, Default)]
pub struct PublicationSlot(Arc<OnceLock<PublicationIds>>);

impl PublicationSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the publication ids. Returns false if they were already set.
    pub fn record(&self, ids: PublicationIds) -> bool {
        self.0.set(ids).is_ok()
    }

    /// Returns the recorded ids, if the original post has gone out.
    pub fn get(&self) -> Option<&PublicationIds> {
        self.0.get()
    }

    /// Returns true if both handles refer to the same slot.
    pub fn is_shared_with(&self, other: &PublicationSlot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A scoring-play highlight.
#[derive(Debug, Clone)]
pub struct Highlight {
    /// Clip ID; the identity of the highlight.
    pub id: HighlightId,
    /// Game the highlight belongs to.
    pub game_id: GameId,
    /// Positional goal ID within the game.
    pub goal_id: GoalId,
    /// Goal snapshot as of the poll that produced this value.
    pub event: GoalEvent,
    /// Static game data used to compose posts.
    pub game: Arc<GameData>,
    /// Where the original post went out.
    pub publications: PublicationSlot,
}

impl Highlight {
    /// Creates a new, unpublished highlight.
    pub fn new(id: HighlightId, goal_id: GoalId, event: GoalEvent, game: Arc<GameData>) -> Self {
        Self {
            id,
            game_id: game.game_id,
            goal_id,
            event,
            game,
            publications: PublicationSlot::new(),
        }
    }

    /// Public URL of the highlight video.
    pub fn video_url(&self) -> String {
        video_url(self.id)
    }

    /// Returns true if the goal snapshot is identical to another highlight's.
    pub fn same_snapshot(&self, other: &Highlight) -> bool {
        self.event == other.event
    }

    /// Takes over the publication slot of the value this one replaces.
    pub fn inherit_publications(&mut self, previous: &Highlight) {
        self.publications = previous.publications.clone();
    }
}
