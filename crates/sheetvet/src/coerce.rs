//! Type coercion: raw cells → declared semantic types, failing soft.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::ColumnType;
use crate::table::{RawCell, RawTable};

/// A cell value after coercion.
///
/// `Invalid` is the explicit sentinel for a value that was empty or could
/// not be converted to its declared type. Coercion never raises; every
/// failure degrades to `Invalid` so later rules can attribute errors to
/// specific coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    /// Empty or unconvertible cell.
    Invalid,
    /// Parsed date/time value.
    Temporal(NaiveDateTime),
    /// Parsed decimal number.
    Number(f64),
    /// Verbatim text.
    Text(String),
    /// Boolean, only produced by undeclared pass-through columns.
    Bool(bool),
}

impl CoercedValue {
    /// Returns true for the invalid sentinel.
    pub fn is_invalid(&self) -> bool {
        matches!(self, CoercedValue::Invalid)
    }

    /// Numeric view of the value, used by the checksum rule.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CoercedValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// JSON rendering with the explicit absent-value marker.
    ///
    /// Invalid cells become JSON `null`; non-finite floats are normalized to
    /// `null` as well since NaN is not representable in JSON. Temporals
    /// render as full ISO-8601 datetime strings, midnight included.
    pub fn to_json(&self) -> Value {
        match self {
            CoercedValue::Invalid => Value::Null,
            CoercedValue::Temporal(dt) => {
                Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            CoercedValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CoercedValue::Text(s) => Value::String(s.clone()),
            CoercedValue::Bool(b) => Value::Bool(*b),
        }
    }
}

/// A table with the same shape as its [`RawTable`] source, every cell under
/// a declared column converted to its semantic type or marked invalid.
#[derive(Debug, Clone)]
pub struct CoercedTable {
    /// Column headers, in sheet order.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<CoercedValue>>,
}

impl CoercedTable {
    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CoercedValue> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&CoercedValue::Invalid))
    }

    /// A specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&CoercedValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// Coerce every cell of a raw table against the declared column types.
///
/// Declared columns absent from the table are simply skipped; their absence
/// is the Columns check's business. Undeclared columns pass through so they
/// still appear in previews.
pub fn coerce_table(raw: &RawTable, columns: &IndexMap<String, ColumnType>) -> CoercedTable {
    let column_types: Vec<Option<ColumnType>> = raw
        .headers
        .iter()
        .map(|name| columns.get(name).copied())
        .collect();

    let rows = raw
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&column_types)
                .map(|(cell, ty)| match ty {
                    Some(ty) => coerce_cell(cell, *ty),
                    None => passthrough(cell),
                })
                .collect()
        })
        .collect();

    CoercedTable {
        headers: raw.headers.clone(),
        rows,
    }
}

/// Coerce a single cell to a declared type.
pub fn coerce_cell(cell: &RawCell, ty: ColumnType) -> CoercedValue {
    match ty {
        ColumnType::Temporal => coerce_temporal(cell),
        ColumnType::Numeric => coerce_numeric(cell),
        ColumnType::Text => coerce_text(cell),
    }
}

fn coerce_temporal(cell: &RawCell) -> CoercedValue {
    match cell {
        RawCell::DateTime(dt) => CoercedValue::Temporal(*dt),
        RawCell::Text(s) => parse_datetime(s)
            .map(CoercedValue::Temporal)
            .unwrap_or(CoercedValue::Invalid),
        RawCell::Empty | RawCell::Number(_) | RawCell::Bool(_) => CoercedValue::Invalid,
    }
}

fn coerce_numeric(cell: &RawCell) -> CoercedValue {
    match cell {
        RawCell::Number(n) => CoercedValue::Number(*n),
        RawCell::Bool(b) => CoercedValue::Number(if *b { 1.0 } else { 0.0 }),
        RawCell::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(CoercedValue::Number)
            .unwrap_or(CoercedValue::Invalid),
        RawCell::Empty | RawCell::DateTime(_) => CoercedValue::Invalid,
    }
}

fn coerce_text(cell: &RawCell) -> CoercedValue {
    match cell {
        RawCell::Text(s) => CoercedValue::Text(s.clone()),
        // Numeric cells in a text column stay numeric; previews show them
        // as JSON numbers, not stringified.
        RawCell::Number(n) => CoercedValue::Number(*n),
        RawCell::Bool(b) => CoercedValue::Text(b.to_string()),
        RawCell::DateTime(dt) => CoercedValue::Text(dt.to_string()),
        RawCell::Empty => CoercedValue::Invalid,
    }
}

fn passthrough(cell: &RawCell) -> CoercedValue {
    match cell {
        RawCell::Empty => CoercedValue::Invalid,
        RawCell::Text(s) => CoercedValue::Text(s.clone()),
        RawCell::Number(n) => CoercedValue::Number(*n),
        RawCell::Bool(b) => CoercedValue::Bool(*b),
        RawCell::DateTime(dt) => CoercedValue::Temporal(*dt),
    }
}

/// Permissive date/time parsing over the formats seen in uploads.
fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y", "%d %b %Y"];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d.and_time(chrono::NaiveTime::MIN));
        }
    }

    None
}
