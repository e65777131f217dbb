//! Row selection keyed by stable row ids.

use std::collections::HashSet;

/// Tracks selected rows by their stable ids.
///
/// Selection survives sorting, filtering, and visibility changes because it
/// never references array positions. Ids whose rows have left the source
/// data are pruned lazily, when the engine reads the selection, not on
/// every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle selection for an id. Returns true if it is now selected.
    pub fn toggle(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.selected.contains(&id) {
            self.selected.remove(&id);
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Replace the whole selection.
    pub fn replace(&mut self, ids: HashSet<String>) {
        self.selected = ids;
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop ids that are no longer present in the source data.
    pub fn prune(&mut self, live: &HashSet<String>) {
        self.selected.retain(|id| live.contains(id));
    }

    /// All selected ids, in arbitrary order.
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
