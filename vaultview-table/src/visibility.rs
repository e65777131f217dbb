//! Column visibility state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-column visibility; columns absent from the map are visible.
///
/// Hidden columns are excluded from rendering and from global-filter
/// matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityState {
    columns: HashMap<String, bool>,
}

impl VisibilityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an explicit map.
    pub fn from_map(columns: HashMap<String, bool>) -> Self {
        Self { columns }
    }

    /// Whether a column is currently visible.
    pub fn is_visible(&self, column_id: &str) -> bool {
        self.columns.get(column_id).copied().unwrap_or(true)
    }

    /// Set visibility for one column.
    pub fn set_column(&mut self, column_id: impl Into<String>, visible: bool) {
        self.columns.insert(column_id.into(), visible);
    }

    /// Merge an update map over the current state.
    pub fn apply(&mut self, update: HashMap<String, bool>) {
        self.columns.extend(update);
    }
}
