//! Presentation adapter contract.
//!
//! The engine stays renderer-agnostic: a rendering layer implements
//! [`TableSurface`] to consume derived views and translates UI gestures
//! into [`TableGesture`] values fed back through [`TableEngine::apply`].
//! How the surface draws is out of scope here.

use crate::column::TableRow;
use crate::engine::{TableEngine, TableView};
use crate::pagination::{self, PageItem};

/// Window of neighbour pages shown each side of the active page.
pub const PAGER_WINDOW: usize = 3;

/// Target of a filter-change gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterTarget {
    /// The single search box over all visible, filterable columns.
    Global,
    /// One column's filter input.
    Column(String),
}

/// A user interaction forwarded by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableGesture {
    /// Header click on a column.
    SortToggle(String),
    /// Filter input changed; an empty value clears the filter.
    FilterChange(FilterTarget, String),
    /// Pager click, zero-based page index.
    PageChange(usize),
    /// Page-size selector changed.
    PageSizeChange(usize),
    /// Row checkbox toggled, by stable row id.
    SelectionToggle(String),
}

/// Contract a rendering layer satisfies to present engine output.
pub trait TableSurface<T: TableRow> {
    /// Present a freshly derived view together with its pager strip.
    fn present(&mut self, view: &TableView<T>, pager: &[PageItem]);
}

impl<T: TableRow> TableEngine<T> {
    /// Route a gesture to the matching operation and return the updated
    /// view. Gestures against disabled capabilities fall through as
    /// silent no-ops, like the operations themselves.
    pub fn apply(&mut self, gesture: TableGesture) -> TableView<T> {
        match gesture {
            TableGesture::SortToggle(column_id) => self.toggle_sort(&column_id),
            TableGesture::FilterChange(FilterTarget::Global, value) => {
                self.set_global_filter(value)
            }
            TableGesture::FilterChange(FilterTarget::Column(column_id), value) => {
                self.set_column_filter(column_id, value)
            }
            TableGesture::PageChange(page_index) => self.set_page_index(page_index),
            TableGesture::PageSizeChange(page_size) => self.set_page_size(page_size),
            TableGesture::SelectionToggle(id) => self.toggle_selection(id),
        }
    }

    /// Recompute the view and push it to a surface with its pager strip.
    pub fn present_to(&mut self, surface: &mut impl TableSurface<T>) {
        let view = self.view();
        let pager = pager_strip(&view);
        surface.present(&view, &pager);
    }
}

/// Pager strip for a derived view, one-based for display.
pub fn pager_strip<T>(view: &TableView<T>) -> Vec<PageItem> {
    pagination::visible_page_numbers(
        view.page_count,
        view.pagination.page_index + 1,
        PAGER_WINDOW,
    )
}
