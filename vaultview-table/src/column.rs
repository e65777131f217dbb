//! Column definitions and the row identity trait.

use std::fmt;
use std::sync::Arc;

use crate::value::CellValue;

/// Trait for rows displayed by a [`TableEngine`](crate::engine::TableEngine).
///
/// The engine never inspects row shape directly; it reads cells through
/// column accessors and identifies rows through this trait. The id must be
/// stable across sorting, filtering, and data reloads — selection is keyed
/// on it, never on array position.
pub trait TableRow: Clone {
    /// Stable unique identifier for this row.
    fn id(&self) -> String;
}

type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Column configuration: a unique id, a pure accessor, and capability flags.
///
/// Accessors must be total and side-effect-free over well-formed rows; a
/// panicking accessor is a caller bug and is deliberately not caught here.
///
/// # Examples
///
/// ```
/// use vaultview_table::{CellValue, ColumnDef};
///
/// #[derive(Clone)]
/// struct Job { name: String, runs: i64 }
///
/// let columns = vec![
///     ColumnDef::new("name", |j: &Job| j.name.as_str().into()).sortable(),
///     ColumnDef::new("runs", |j: &Job| j.runs.into()).sortable().hidable(),
/// ];
/// ```
#[derive(Clone)]
pub struct ColumnDef<T> {
    /// Column id, unique within a schema.
    pub id: String,
    accessor: Accessor<T>,
    /// Whether sort keys may reference this column.
    pub sortable: bool,
    /// Whether this column participates in filtering.
    pub filterable: bool,
    /// Whether this column may be hidden.
    pub hidable: bool,
}

impl<T> ColumnDef<T> {
    /// Create a new column with an accessor.
    ///
    /// Columns default to filterable, not sortable, not hidable.
    pub fn new(
        id: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            accessor: Arc::new(accessor),
            sortable: false,
            filterable: true,
            hidable: false,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column hidable.
    pub fn hidable(mut self) -> Self {
        self.hidable = true;
        self
    }

    /// Exclude the column from filtering.
    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    /// Read the cell value for a row.
    pub fn cell(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("hidable", &self.hidable)
            .finish_non_exhaustive()
    }
}
