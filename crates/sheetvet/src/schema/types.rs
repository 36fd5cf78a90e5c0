//! Core type definitions for schema representation.

use serde::{Deserialize, Serialize};

/// Declared semantic type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Date and/or time values.
    Temporal,
    /// Decimal numbers.
    Numeric,
    /// Text values, passed through verbatim.
    Text,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Numeric)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Temporal)
    }

    /// SQL column type used when creating the backing table.
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Temporal => "DATE",
            ColumnType::Numeric => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

/// Reference to a worksheet within an uploaded workbook.
///
/// A sheet is addressed either by zero-based position or by name; the
/// reference is resolved against the workbook at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetRef {
    /// Zero-based sheet position.
    Index(usize),
    /// Sheet name, matched exactly.
    Name(String),
}

impl std::fmt::Display for SheetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetRef::Index(i) => write!(f, "#{}", i),
            SheetRef::Name(name) => write!(f, "'{}'", name),
        }
    }
}

impl From<usize> for SheetRef {
    fn from(index: usize) -> Self {
        SheetRef::Index(index)
    }
}

impl From<&str> for SheetRef {
    fn from(name: &str) -> Self {
        SheetRef::Name(name.to_string())
    }
}
