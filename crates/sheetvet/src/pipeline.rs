//! Main SheetVet struct and public API.

use indexmap::IndexMap;

use crate::checks::{CheckEngine, CheckResult, ErrorLocation};
use crate::coerce::{CoercedTable, coerce_table};
use crate::error::Result;
use crate::report::{ValidationReport, preview_rows};
use crate::schema::{SchemaRegistry, SheetSchema};
use crate::table::RawTable;
use crate::workbook;

/// Outcome of validating a single sheet against its schema.
#[derive(Debug)]
pub struct TableValidation {
    /// The coerced table, shape-identical to the raw input.
    pub coerced: CoercedTable,
    /// Verdicts keyed by rule name.
    pub check_results: IndexMap<String, CheckResult>,
    /// Failing cell coordinates, first-seen order.
    pub locations: Vec<ErrorLocation>,
    /// AND of all check results.
    pub passed: bool,
}

/// The validation pipeline: registry lookup, per-sheet coercion and checks,
/// report aggregation.
pub struct SheetVet {
    registry: SchemaRegistry,
    engine: CheckEngine,
}

impl SheetVet {
    /// Create a pipeline over the built-in dataset registry.
    pub fn new() -> Self {
        Self::with_registry(SchemaRegistry::builtin())
    }

    /// Create a pipeline over a custom registry.
    pub fn with_registry(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            engine: CheckEngine::new(),
        }
    }

    /// The registry this pipeline validates against.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Validate one raw table against a sheet schema.
    pub fn validate_table(&self, schema: &SheetSchema, raw: &RawTable) -> TableValidation {
        let coerced = coerce_table(raw, &schema.columns);
        let (check_results, locations) = self.engine.run(&coerced, schema);
        let passed = check_results.values().all(|r| r.passed);

        TableValidation {
            coerced,
            check_results,
            locations,
            passed,
        }
    }

    /// Validate an uploaded workbook against a named dataset.
    ///
    /// The dataset is resolved first so an unknown name fails before any
    /// workbook parsing. Every sheet in the schema is then processed in
    /// order; failed checks never abort the pass, so the report always
    /// carries every sheet's preview alongside its errors. Only structural
    /// problems (`SheetNotFound`, `UnreadableWorkbook`) return an error.
    pub fn validate_workbook(&self, dataset: &str, bytes: &[u8]) -> Result<ValidationReport> {
        let dataset = self.registry.get(dataset)?;

        let mut report = ValidationReport::new();
        for sheet_schema in &dataset.sheets {
            let raw = workbook::read_sheet(bytes, &sheet_schema.sheet)?;
            let validation = self.validate_table(sheet_schema, &raw);

            report.add_table(
                &sheet_schema.table_name,
                validation.check_results,
                preview_rows(&validation.coerced),
                validation.locations,
            );
        }

        Ok(report)
    }
}

impl Default for SheetVet {
    fn default() -> Self {
        Self::new()
    }
}
