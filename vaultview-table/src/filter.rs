//! Filter state: one global search term plus per-column filters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::column::ColumnDef;
use crate::visibility::VisibilityState;

/// Global and per-column filters, AND-combined.
///
/// The global term matches a row when any visible, filterable cell contains
/// it case-insensitively. Column filters match against that column's
/// stringified value, also case-insensitive contains, and apply even while
/// the column is hidden (an explicit column filter is deliberate intent).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    global: String,
    columns: HashMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current global search term.
    pub fn global(&self) -> &str {
        &self.global
    }

    /// Set the global search term; empty clears it.
    pub fn set_global(&mut self, term: impl Into<String>) {
        self.global = term.into();
    }

    /// The current filter value for a column, if any.
    pub fn column(&self, column_id: &str) -> Option<&str> {
        self.columns.get(column_id).map(String::as_str)
    }

    /// Set a column filter; an empty value removes the filter.
    pub fn set_column(&mut self, column_id: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let column_id = column_id.into();
        if value.is_empty() {
            self.columns.remove(&column_id);
        } else {
            self.columns.insert(column_id, value);
        }
    }

    /// Whether no filter is active at all.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.columns.is_empty()
    }

    /// Evaluate the combined predicate for one row.
    pub fn matches<T>(
        &self,
        row: &T,
        columns: &[ColumnDef<T>],
        visibility: &VisibilityState,
    ) -> bool {
        if !self.global.is_empty() {
            let needle = self.global.to_lowercase();
            let hit = columns.iter().any(|c| {
                c.filterable
                    && visibility.is_visible(&c.id)
                    && c.cell(row).filter_text().contains(&needle)
            });
            if !hit {
                return false;
            }
        }

        for (column_id, value) in &self.columns {
            let Some(column) = columns.iter().find(|c| &c.id == column_id) else {
                continue;
            };
            let needle = value.to_lowercase();
            if !column.cell(row).filter_text().contains(&needle) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    #[derive(Clone)]
    struct Job {
        name: &'static str,
        status: &'static str,
    }

    fn columns() -> Vec<ColumnDef<Job>> {
        vec![
            ColumnDef::new("name", |j: &Job| j.name.into()),
            ColumnDef::new("status", |j: &Job| j.status.into()),
        ]
    }

    #[test]
    fn global_filter_is_case_insensitive() {
        let mut filters = FilterState::new();
        filters.set_global("NIGHT");
        let job = Job {
            name: "nightly",
            status: "ok",
        };
        assert!(filters.matches(&job, &columns(), &VisibilityState::default()));
    }

    #[test]
    fn hidden_columns_do_not_match_the_global_filter() {
        let mut filters = FilterState::new();
        filters.set_global("night");
        let mut visibility = VisibilityState::default();
        visibility.set_column("name", false);
        let job = Job {
            name: "nightly",
            status: "ok",
        };
        assert!(!filters.matches(&job, &columns(), &visibility));
    }

    #[test]
    fn column_filters_and_combine_with_global() {
        let mut filters = FilterState::new();
        filters.set_global("night");
        filters.set_column("status", "fail");
        let ok = Job {
            name: "nightly",
            status: "ok",
        };
        let failed = Job {
            name: "nightly",
            status: "Failed",
        };
        let cols = columns();
        let visibility = VisibilityState::default();
        assert!(!filters.matches(&ok, &cols, &visibility));
        assert!(filters.matches(&failed, &cols, &visibility));
    }

    #[test]
    fn empty_value_clears_a_column_filter() {
        let mut filters = FilterState::new();
        filters.set_column("status", "fail");
        filters.set_column("status", "");
        assert!(filters.is_empty());
    }

    #[test]
    fn non_filterable_columns_are_skipped_by_global() {
        let mut filters = FilterState::new();
        filters.set_global("secret");
        let cols = vec![ColumnDef::new("token", |_: &Job| {
            CellValue::from("secret-value")
        })
        .not_filterable()];
        let job = Job {
            name: "n",
            status: "s",
        };
        assert!(!filters.matches(&job, &cols, &VisibilityState::default()));
    }
}
