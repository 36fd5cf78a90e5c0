//! Report assembly for one validated workbook.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checks::{CheckResult, ErrorLocation};
use crate::coerce::CoercedTable;

/// One preview row: ordered column → JSON value, invalid cells as `null`.
pub type PreviewRow = IndexMap<String, Value>;

/// Top-level validation response, keyed by table name throughout.
///
/// Built and discarded within a single request; nothing here persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// AND across all sheets' check results.
    pub valid: bool,
    /// Per-table verdicts keyed by rule name.
    pub check_results: IndexMap<String, IndexMap<String, CheckResult>>,
    /// Flattened messages of every failed check, in sheet order.
    pub errors: Vec<String>,
    /// Per-table row previews of the coerced data.
    pub previews: IndexMap<String, Vec<PreviewRow>>,
    /// Per-table failing cell coordinates.
    pub error_locations: IndexMap<String, Vec<ErrorLocation>>,
}

impl ValidationReport {
    /// An empty report that is valid until a failing sheet is added.
    pub fn new() -> Self {
        Self {
            valid: true,
            check_results: IndexMap::new(),
            errors: Vec::new(),
            previews: IndexMap::new(),
            error_locations: IndexMap::new(),
        }
    }

    /// Fold one sheet's outcome into the report.
    pub fn add_table(
        &mut self,
        table_name: &str,
        check_results: IndexMap<String, CheckResult>,
        preview: Vec<PreviewRow>,
        locations: Vec<ErrorLocation>,
    ) {
        if check_results.values().any(|r| !r.passed) {
            self.valid = false;
        }
        self.errors.extend(
            check_results
                .values()
                .filter(|r| !r.passed)
                .map(|r| r.msg.clone()),
        );
        self.check_results
            .insert(table_name.to_string(), check_results);
        self.previews.insert(table_name.to_string(), preview);
        self.error_locations
            .insert(table_name.to_string(), locations);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a coerced table as preview rows.
///
/// Every invalid or missing cell becomes an explicit JSON `null`; no raw
/// NaN ever reaches the serialized report.
pub fn preview_rows(table: &CoercedTable) -> Vec<PreviewRow> {
    table
        .rows
        .iter()
        .map(|row| {
            table
                .headers
                .iter()
                .zip(row)
                .map(|(header, value)| (header.clone(), value.to_json()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::CoercedValue;

    #[test]
    fn test_preview_normalizes_invalid_to_null() {
        let table = CoercedTable {
            headers: vec!["asset".into(), "value".into()],
            rows: vec![vec![CoercedValue::Text("bond".into()), CoercedValue::Invalid]],
        };

        let rows = preview_rows(&table);
        assert_eq!(rows[0]["asset"], Value::String("bond".into()));
        assert_eq!(rows[0]["value"], Value::Null);
    }

    #[test]
    fn test_report_valid_is_and_across_tables() {
        let mut report = ValidationReport::new();

        let mut passing = IndexMap::new();
        passing.insert("Columns".to_string(), CheckResult::pass("All required"));
        report.add_table("pnl_actuals", passing, vec![], vec![]);
        assert!(report.valid);

        let mut failing = IndexMap::new();
        failing.insert(
            "Columns".to_string(),
            CheckResult::fail("Missing: kpi_value"),
        );
        report.add_table("pnl_kpis", failing, vec![], vec![]);

        assert!(!report.valid);
        assert_eq!(report.errors, vec!["Missing: kpi_value"]);
        assert_eq!(report.check_results.len(), 2);
    }
}
