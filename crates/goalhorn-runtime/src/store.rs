//! Per-monitor store of the last-seen value of each highlight.

use std::collections::HashMap;

use goalhorn_models::{Highlight, HighlightId};

/// Last-seen highlights of one game, keyed by clip id.
///
/// Owned by a single monitor; never shared.
#[derive(Debug, Default)]
pub struct HighlightStore {
    highlights: HashMap<HighlightId, Highlight>,
}

impl HighlightStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a highlight, replacing any value with the same id.
    ///
    /// Returns the replaced value.
    pub fn add(&mut self, highlight: Highlight) -> Option<Highlight> {
        self.highlights.insert(highlight.id, highlight)
    }

    /// Replaces the stored value of an existing highlight.
    ///
    /// Returns the previous value, or `None` (and stores nothing) if the id
    /// is unknown.
    pub fn update(&mut self, highlight: Highlight) -> Option<Highlight> {
        let slot = self.highlights.get_mut(&highlight.id)?;
        Some(std::mem::replace(slot, highlight))
    }

    /// Returns true if a highlight with this id is stored.
    pub fn exists(&self, id: HighlightId) -> bool {
        self.highlights.contains_key(&id)
    }

    /// Returns the stored highlight.
    pub fn get(&self, id: HighlightId) -> Option<&Highlight> {
        self.highlights.get(&id)
    }

    /// Number of stored highlights.
    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.highlights.clear();
    }
}
