//! Sort state and the stable multi-key comparator.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::column::ColumnDef;

/// Sort direction for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One entry of a multi-key sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Ascending key for a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending key for a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Ordered sequence of sort keys; empty means insertion order.
///
/// Each column appears at most once. Comparison tie-breaks left-to-right,
/// and rows equal under every key keep their original relative order (the
/// engine sorts with a stable sort).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    /// Empty sort state (insertion order).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit keys; later duplicates of a column are dropped.
    pub fn from_keys(keys: impl IntoIterator<Item = SortKey>) -> Self {
        let mut state = Self::new();
        for key in keys {
            if !state.contains(&key.column_id) {
                state.keys.push(key);
            }
        }
        state
    }

    /// The keys, in tie-break order.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether a column currently participates in the sort.
    pub fn contains(&self, column_id: &str) -> bool {
        self.keys.iter().any(|k| k.column_id == column_id)
    }

    /// Cycle a column through ascending → descending → removed.
    ///
    /// A column not yet in the sort is appended ascending, after any
    /// existing keys.
    pub fn toggle(&mut self, column_id: &str) {
        if let Some(pos) = self.keys.iter().position(|k| k.column_id == column_id) {
            match self.keys[pos].direction {
                SortDirection::Ascending => {
                    self.keys[pos].direction = SortDirection::Descending;
                }
                SortDirection::Descending => {
                    self.keys.remove(pos);
                }
            }
        } else {
            self.keys.push(SortKey::asc(column_id));
        }
    }

    /// Compare two rows under this sort state.
    ///
    /// Keys referencing unknown column ids are skipped. Returns `Equal`
    /// when every key ties, leaving order to the stable sort.
    pub fn compare_rows<T>(&self, a: &T, b: &T, columns: &[ColumnDef<T>]) -> Ordering {
        for key in &self.keys {
            let Some(column) = columns.iter().find(|c| c.id == key.column_id) else {
                continue;
            };
            let ordering = column.cell(a).compare(&column.cell(b));
            let ordering = match key.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}
