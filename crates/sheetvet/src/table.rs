//! Raw tabular data as parsed from one worksheet.

use chrono::NaiveDateTime;

/// A raw cell value before any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// No value at all.
    Empty,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Native spreadsheet date/time value.
    DateTime(NaiveDateTime),
}

impl RawCell {
    /// Returns true if the cell carries no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }
}

/// Parsed data of a single worksheet.
///
/// Storage is positional: a header row plus row-major cell data. Rows are
/// padded to the header width, so `column_index` + row offset always
/// addresses a cell. Row indices are stable for the life of one request
/// only.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Column headers, in sheet order.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Create a raw table, padding short rows with empty cells.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<RawCell>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, RawCell::Empty);
        }
        Self { headers, rows }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a column with the given name is present.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// All values of a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &RawCell> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&RawCell::Empty))
    }

    /// A specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&RawCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}
