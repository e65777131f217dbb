//! Generic data-table state engine for list-oriented admin screens.
//!
//! Every list screen of the console owns one [`TableEngine`] over its row
//! collection and column schema. The engine applies filter → stable sort →
//! paginate on every state change and hands the derived [`TableView`] to
//! whatever rendering layer implements [`TableSurface`]. Page-size changes
//! flow out through a write-through hook so the size preference stays
//! shared across screens (see the `vaultview-prefs` crate).

pub mod adapter;
pub mod column;
pub mod engine;
pub mod filter;
pub mod pagination;
pub mod selection;
pub mod sort;
pub mod value;
pub mod visibility;

pub use adapter::{FilterTarget, TableGesture, TableSurface, pager_strip};
pub use column::{ColumnDef, TableRow};
pub use engine::{EngineConfig, TableEngine, TableView};
pub use filter::FilterState;
pub use pagination::{
    DEFAULT_PAGE_SIZE, PageItem, PaginationState, clamp_page_index, page_count,
    visible_page_numbers,
};
pub use selection::Selection;
pub use sort::{SortDirection, SortKey, SortState};
pub use value::CellValue;
pub use visibility::VisibilityState;
