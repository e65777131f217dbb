//! The generic table state engine.
//!
//! `TableEngine<T>` owns the transient state of one mounted list view:
//! sort keys, filters, column visibility, row selection, and pagination.
//! It is a cooperative single-threaded state machine: every operation runs
//! synchronously to completion and returns the freshly derived view, so no
//! locking is needed.

use std::collections::{HashMap, HashSet};

use crate::column::{ColumnDef, TableRow};
use crate::filter::FilterState;
use crate::pagination::{self, PaginationState};
use crate::selection::Selection;
use crate::sort::SortState;
use crate::visibility::VisibilityState;

/// Engine capabilities and initial state for one view.
///
/// Calling an operation for a disabled capability is a silent no-op that
/// returns the unchanged view. This keeps screens composable without
/// capability checks at every call site.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub enable_sorting: bool,
    pub enable_filtering: bool,
    pub enable_row_selection: bool,
    pub enable_column_visibility: bool,
    /// Trust a caller-supplied slice and page count instead of slicing
    /// locally (used when the backend paginates).
    pub manual_pagination: bool,
    /// Page count reported by the backend in manual mode.
    pub external_page_count: Option<usize>,
    pub initial_sort: Option<SortState>,
    pub initial_column_filters: Vec<(String, String)>,
    pub initial_column_visibility: Option<HashMap<String, bool>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_sorting: true,
            enable_filtering: true,
            enable_row_selection: false,
            enable_column_visibility: true,
            manual_pagination: false,
            external_page_count: None,
            initial_sort: None,
            initial_column_filters: Vec::new(),
            initial_column_visibility: None,
        }
    }
}

/// The derived view computed from the engine state.
#[derive(Debug, Clone)]
pub struct TableView<T> {
    /// Rows of the current page, after filter → sort → paginate.
    pub visible_page: Vec<T>,
    /// Total pages available, never less than one.
    pub page_count: usize,
    /// Selected rows still present in the source data, in data order.
    pub selected_rows: Vec<T>,
    /// Pagination after clamping, for the pager strip.
    pub pagination: PaginationState,
}

type PageSizeHook = Box<dyn FnMut(usize) + Send>;

/// Per-view table state and the filter → sort → paginate pipeline.
///
/// The engine never inspects row shape; it reads cells through the column
/// accessors and identifies rows by [`TableRow::id`]. One engine instance
/// lives exactly as long as its view; shared concerns (the page-size
/// preference) stay outside, wired in through [`on_page_size_change`].
///
/// [`on_page_size_change`]: TableEngine::on_page_size_change
pub struct TableEngine<T: TableRow> {
    data: Vec<T>,
    columns: Vec<ColumnDef<T>>,
    config: EngineConfig,
    sort: SortState,
    filters: FilterState,
    visibility: VisibilityState,
    selection: Selection,
    pagination: PaginationState,
    external_page_count: Option<usize>,
    page_size_hook: Option<PageSizeHook>,
}

impl<T: TableRow> TableEngine<T> {
    /// Create an engine over a row collection and column schema.
    ///
    /// Column ids must be unique within the schema; accessors must be pure
    /// and total over well-formed rows.
    pub fn new(data: Vec<T>, columns: Vec<ColumnDef<T>>, config: EngineConfig) -> Self {
        debug_assert!(
            {
                let mut seen = HashSet::new();
                columns.iter().all(|c| seen.insert(c.id.as_str()))
            },
            "column ids must be unique within a schema"
        );

        let sort = config.initial_sort.clone().unwrap_or_default();
        let mut filters = FilterState::new();
        for (column_id, value) in &config.initial_column_filters {
            filters.set_column(column_id.clone(), value.clone());
        }
        let visibility = config
            .initial_column_visibility
            .clone()
            .map(VisibilityState::from_map)
            .unwrap_or_default();
        let external_page_count = config.external_page_count;

        Self {
            data,
            columns,
            config,
            sort,
            filters,
            visibility,
            selection: Selection::new(),
            pagination: PaginationState::default(),
            external_page_count,
            page_size_hook: None,
        }
    }

    /// Register the write-through hook for gesture-driven page-size
    /// changes. The host screen uses this to push the new size into the
    /// shared preference store.
    pub fn on_page_size_change(&mut self, hook: impl FnMut(usize) + Send + 'static) {
        self.page_size_hook = Some(Box::new(hook));
    }

    // -------------------------------------------------------------------------
    // State access
    // -------------------------------------------------------------------------

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filters
    }

    pub fn visibility_state(&self) -> &VisibilityState {
        &self.visibility
    }

    pub fn pagination_state(&self) -> PaginationState {
        self.pagination
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.ids().cloned().collect()
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Replace the row collection.
    ///
    /// Selection is not scanned here; ids whose rows disappeared are pruned
    /// lazily on the next view read. The page index moves only if the page
    /// count shrank below it.
    pub fn set_data(&mut self, data: Vec<T>) -> TableView<T> {
        self.data = data;
        self.view()
    }

    /// Replace the sort state. Keys for unknown or unsortable columns are
    /// dropped. No-op when sorting is disabled.
    pub fn set_sorting(&mut self, next: SortState) -> TableView<T> {
        if self.config.enable_sorting {
            self.sort = SortState::from_keys(
                next.keys()
                    .iter()
                    .filter(|k| self.sortable_column(&k.column_id))
                    .cloned(),
            );
        }
        self.view()
    }

    /// Cycle a column through ascending → descending → unsorted.
    /// No-op for unsortable columns or when sorting is disabled.
    pub fn toggle_sort(&mut self, column_id: &str) -> TableView<T> {
        if self.config.enable_sorting && self.sortable_column(column_id) {
            self.sort.toggle(column_id);
        }
        self.view()
    }

    /// Set the global search term. No-op when filtering is disabled.
    pub fn set_global_filter(&mut self, value: impl Into<String>) -> TableView<T> {
        if self.config.enable_filtering {
            self.filters.set_global(value);
        }
        self.view()
    }

    /// Set one column filter; an empty value clears it. No-op when
    /// filtering is disabled.
    pub fn set_column_filter(
        &mut self,
        column_id: impl Into<String>,
        value: impl Into<String>,
    ) -> TableView<T> {
        if self.config.enable_filtering {
            self.filters.set_column(column_id, value);
        }
        self.view()
    }

    /// Merge a visibility update. Attempts to hide a non-hidable column
    /// are dropped; no-op when column visibility is disabled.
    pub fn set_column_visibility(&mut self, update: HashMap<String, bool>) -> TableView<T> {
        if self.config.enable_column_visibility {
            let update = update
                .into_iter()
                .filter(|(column_id, visible)| *visible || self.hidable_column(column_id))
                .collect();
            self.visibility.apply(update);
        }
        self.view()
    }

    /// Replace the selection with an explicit id set. No-op when row
    /// selection is disabled.
    pub fn set_row_selection(&mut self, ids: HashSet<String>) -> TableView<T> {
        if self.config.enable_row_selection {
            self.selection.replace(ids);
        }
        self.view()
    }

    /// Toggle selection of one row by id. No-op when row selection is
    /// disabled.
    pub fn toggle_selection(&mut self, id: impl Into<String>) -> TableView<T> {
        if self.config.enable_row_selection {
            self.selection.toggle(id);
        }
        self.view()
    }

    /// Set page index and size together, e.g. when restoring persisted
    /// view state. Does not fire the page-size write-through hook; the
    /// index is clamped into range on the recompute.
    pub fn set_pagination(&mut self, next: PaginationState) -> TableView<T> {
        if next.page_size > 0 {
            self.pagination = next;
        } else {
            self.pagination.page_index = next.page_index;
        }
        self.view()
    }

    /// Jump to a zero-based page index (clamped into range).
    pub fn set_page_index(&mut self, page_index: usize) -> TableView<T> {
        self.pagination.page_index = page_index;
        self.view()
    }

    /// Change the page size from a user gesture and notify the
    /// write-through hook. A zero size is ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> TableView<T> {
        if page_size > 0 && page_size != self.pagination.page_size {
            self.pagination.page_size = page_size;
            if let Some(hook) = self.page_size_hook.as_mut() {
                hook(page_size);
            }
        }
        self.view()
    }

    /// Update the backend-reported page count in manual mode.
    pub fn set_external_page_count(&mut self, page_count: usize) -> TableView<T> {
        if self.config.manual_pagination {
            self.external_page_count = Some(page_count);
        }
        self.view()
    }

    // -------------------------------------------------------------------------
    // Derived view
    // -------------------------------------------------------------------------

    /// Recompute the derived view: filter, then stable sort, then paginate.
    ///
    /// The page index is clamped into `0..page_count` here, so a filter
    /// that shrinks the result moves the view to the last valid page
    /// instead of dwelling on an out-of-range empty one. Stale selection
    /// ids are pruned against the current data on this read.
    pub fn view(&mut self) -> TableView<T> {
        if self.config.enable_row_selection && !self.selection.is_empty() {
            let live: HashSet<String> = self.data.iter().map(TableRow::id).collect();
            self.selection.prune(&live);
        }

        let mut indices: Vec<usize> = (0..self.data.len()).collect();
        if self.config.enable_filtering && !self.filters.is_empty() {
            indices
                .retain(|&i| self.filters.matches(&self.data[i], &self.columns, &self.visibility));
        }
        if self.config.enable_sorting && !self.sort.is_empty() {
            // Vec::sort_by is stable; ties keep insertion order.
            indices.sort_by(|&a, &b| {
                self.sort
                    .compare_rows(&self.data[a], &self.data[b], &self.columns)
            });
        }

        let page_count = if self.config.manual_pagination {
            self.external_page_count.unwrap_or(1).max(1)
        } else {
            pagination::page_count(indices.len(), self.pagination.page_size)
        };
        self.pagination.page_index =
            pagination::clamp_page_index(self.pagination.page_index, page_count);

        let visible_page: Vec<T> = if self.config.manual_pagination {
            indices.iter().map(|&i| self.data[i].clone()).collect()
        } else {
            indices
                .iter()
                .skip(self.pagination.page_index * self.pagination.page_size)
                .take(self.pagination.page_size)
                .map(|&i| self.data[i].clone())
                .collect()
        };

        log::trace!(
            "recomputed view: {} of {} rows, page {}/{page_count}",
            visible_page.len(),
            self.data.len(),
            self.pagination.page_index + 1
        );

        let selected_rows: Vec<T> = if self.config.enable_row_selection {
            self.data
                .iter()
                .filter(|row| self.selection.is_selected(&row.id()))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        TableView {
            visible_page,
            page_count,
            selected_rows,
            pagination: self.pagination,
        }
    }

    fn sortable_column(&self, column_id: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.id == column_id && c.sortable)
    }

    fn hidable_column(&self, column_id: &str) -> bool {
        self.columns.iter().any(|c| c.id == column_id && c.hidable)
    }
}
