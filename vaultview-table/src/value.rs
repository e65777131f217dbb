//! Cell value enum for dynamic column contents.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

/// A dynamic value produced by a column accessor.
///
/// This enum covers the cell types a backup console lists: names and
/// descriptions, counts, byte sizes, run timestamps, and on/off flags.
///
/// # Example
///
/// ```
/// use vaultview_table::CellValue;
///
/// let name = CellValue::from("Nightly documents");
/// let size = CellValue::Bytes(1_572_864);
/// let runs = CellValue::from(42i64);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Null/empty cell.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Byte size (backup/restore volumes).
    Bytes(u64),
    /// Text.
    Text(String),
    /// Date and time with timezone.
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    /// Total ordering across all variants, used by the sort comparator.
    ///
    /// `Int` and `Float` compare numerically against each other; all other
    /// cross-variant comparisons fall back to a fixed variant rank with
    /// `Null` first.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        use CellValue::{Bool, Bytes, Float, Int, Text, Timestamp};
        match (self, other) {
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Bytes(a), Bytes(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    /// Lowercase text form used for case-insensitive filter matching.
    pub fn filter_text(&self) -> String {
        self.to_string().to_lowercase()
    }

    /// Check for the null variant.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Bytes(_) => 3,
            CellValue::Text(_) => 4,
            CellValue::Timestamp(_) => 5,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bytes(v) => write!(f, "{v}"),
            CellValue::Text(v) => write!(f, "{v}"),
            CellValue::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(i64::from(value))
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Timestamp(value)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}
