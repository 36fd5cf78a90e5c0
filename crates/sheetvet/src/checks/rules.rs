//! The four sheet-level checks.

use indexmap::IndexMap;

use crate::coerce::CoercedTable;
use crate::schema::SheetSchema;

use super::outcome::{CheckResult, ErrorLocation, ErrorTracker};

/// Trait for sheet-level checks.
///
/// Checks are independent and order-insensitive; each produces one verdict
/// and records failing cells on the shared tracker.
pub trait Check: Send + Sync {
    /// Rule name, used as the key in the report.
    fn name(&self) -> &'static str;

    /// Run the check against a coerced table.
    fn run(
        &self,
        table: &CoercedTable,
        schema: &SheetSchema,
        tracker: &mut ErrorTracker,
    ) -> CheckResult;
}

/// Structural check: all required columns must be present.
pub struct ColumnsCheck;

impl Check for ColumnsCheck {
    fn name(&self) -> &'static str {
        "Columns"
    }

    fn run(
        &self,
        table: &CoercedTable,
        schema: &SheetSchema,
        _tracker: &mut ErrorTracker,
    ) -> CheckResult {
        let missing: Vec<&str> = schema
            .required_cols
            .iter()
            .filter(|col| table.column_index(col).is_none())
            .map(|col| col.as_str())
            .collect();

        if missing.is_empty() {
            CheckResult::pass("All required")
        } else {
            CheckResult::fail(format!("Missing: {}", missing.join(", ")))
        }
    }
}

/// Every declared column present in the table must hold valid coerced
/// values. A declared column that is absent entirely is not evaluated here;
/// the Columns check already covers it.
pub struct DataTypesCheck;

impl Check for DataTypesCheck {
    fn name(&self) -> &'static str {
        "Data Types"
    }

    fn run(
        &self,
        table: &CoercedTable,
        schema: &SheetSchema,
        tracker: &mut ErrorTracker,
    ) -> CheckResult {
        let mut failed = false;

        for col in schema.columns.keys() {
            let Some(index) = table.column_index(col) else {
                continue;
            };
            for (row, value) in table.column_values(index).enumerate() {
                if value.is_invalid() {
                    tracker.record(row, col.clone());
                    failed = true;
                }
            }
        }

        if failed {
            CheckResult::fail("Invalid data types found")
        } else {
            CheckResult::pass("All data types valid")
        }
    }
}

/// Required columns must be populated on every row.
///
/// This re-walks required columns independently of the Data Types check, so
/// a cell that is both wrong-typed and required is recorded twice. That
/// duplication is deliberate; callers depend on the report shape.
pub struct MissingValuesCheck;

impl Check for MissingValuesCheck {
    fn name(&self) -> &'static str {
        "Missing Values"
    }

    fn run(
        &self,
        table: &CoercedTable,
        schema: &SheetSchema,
        tracker: &mut ErrorTracker,
    ) -> CheckResult {
        let mut failed = false;

        for col in &schema.required_cols {
            let Some(index) = table.column_index(col) else {
                continue;
            };
            for (row, value) in table.column_values(index).enumerate() {
                if value.is_invalid() {
                    tracker.record(row, col.clone());
                    failed = true;
                }
            }
        }

        if failed {
            CheckResult::fail("Missing values in required columns")
        } else {
            CheckResult::pass("No missing values")
        }
    }
}

/// Coarse row-level sanity rule: the sum of the designated numeric columns
/// must be positive.
///
/// Invalid or absent numeric cells contribute zero to the sum, so a row
/// with no usable numeric values sums to zero and is flagged. A schema with
/// no numeric columns passes vacuously, as does a table where none of the
/// designated columns are present.
pub struct ChecksumCheck;

impl Check for ChecksumCheck {
    fn name(&self) -> &'static str {
        "Checksum"
    }

    fn run(
        &self,
        table: &CoercedTable,
        schema: &SheetSchema,
        tracker: &mut ErrorTracker,
    ) -> CheckResult {
        let present: Vec<(&str, usize)> = schema
            .numeric_cols
            .iter()
            .filter_map(|col| table.column_index(col).map(|i| (col.as_str(), i)))
            .collect();

        if schema.numeric_cols.is_empty() || present.is_empty() {
            return CheckResult::pass("All checksums valid");
        }

        let mut failed = false;
        for row in 0..table.row_count() {
            let sum: f64 = present
                .iter()
                .filter_map(|(_, index)| table.get(row, *index))
                .filter_map(|value| value.as_number())
                .filter(|n| n.is_finite())
                .sum();

            if sum <= 0.0 {
                for (col, _) in &present {
                    tracker.record(row, col.to_string());
                }
                failed = true;
            }
        }

        if failed {
            CheckResult::fail("Invalid checksums found")
        } else {
            CheckResult::pass("All checksums valid")
        }
    }
}

/// Runs the full rule set against one sheet.
pub struct CheckEngine {
    checks: Vec<Box<dyn Check>>,
}

impl CheckEngine {
    /// Create the engine with the standard rule set.
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(ColumnsCheck),
                Box::new(DataTypesCheck),
                Box::new(MissingValuesCheck),
                Box::new(ChecksumCheck),
            ],
        }
    }

    /// Run every check, returning verdicts keyed by rule name plus the
    /// accumulated error locations.
    pub fn run(
        &self,
        table: &CoercedTable,
        schema: &SheetSchema,
    ) -> (IndexMap<String, CheckResult>, Vec<ErrorLocation>) {
        let mut tracker = ErrorTracker::new();
        let mut results = IndexMap::with_capacity(self.checks.len());

        for check in &self.checks {
            let result = check.run(table, schema, &mut tracker);
            results.insert(check.name().to_string(), result);
        }

        (results, tracker.into_locations())
    }
}

impl Default for CheckEngine {
    fn default() -> Self {
        Self::new()
    }
}
