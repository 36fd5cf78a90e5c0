//! Check verdicts and error-location tracking.

use serde::{Deserialize, Serialize};

/// Verdict of one named rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the rule passed.
    pub passed: bool,
    /// Human-readable message, always present.
    pub msg: String,
}

impl CheckResult {
    /// A passing result.
    pub fn pass(msg: impl Into<String>) -> Self {
        Self {
            passed: true,
            msg: msg.into(),
        }
    }

    /// A failing result.
    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            passed: false,
            msg: msg.into(),
        }
    }
}

/// A (row, column) coordinate implicated by a failed rule.
///
/// Row indices are positions within the parsed sheet, stable for the life
/// of one request only. Serialized as a `[row, column]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, String)", into = "(usize, String)")]
pub struct ErrorLocation {
    /// Zero-based row index within the parsed sheet.
    pub row: usize,
    /// Column name.
    pub column: String,
}

impl ErrorLocation {
    /// Create an error location.
    pub fn new(row: usize, column: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
        }
    }
}

impl From<(usize, String)> for ErrorLocation {
    fn from((row, column): (usize, String)) -> Self {
        Self { row, column }
    }
}

impl From<ErrorLocation> for (usize, String) {
    fn from(loc: ErrorLocation) -> Self {
        (loc.row, loc.column)
    }
}

/// Accumulates error locations for one sheet.
///
/// Pure accumulation: first-seen order is preserved and nothing is
/// deduplicated. A cell flagged by two rules appears twice, matching the
/// report shape callers render highlights from.
#[derive(Debug, Default)]
pub struct ErrorTracker {
    locations: Vec<ErrorLocation>,
}

impl ErrorTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failing cell.
    pub fn record(&mut self, row: usize, column: impl Into<String>) {
        self.locations.push(ErrorLocation::new(row, column));
    }

    /// Number of recorded locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Consume the tracker, yielding locations in first-seen order.
    pub fn into_locations(self) -> Vec<ErrorLocation> {
        self.locations
    }
}
