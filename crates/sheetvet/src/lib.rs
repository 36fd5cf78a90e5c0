//! Sheetvet: schema-driven validation for spreadsheet-sourced tabular data.
//!
//! Sheetvet validates uploaded workbooks against declarative per-dataset
//! schemas, reports per-cell error locations, and produces JSON-serializable
//! previews of the coerced data.
//!
//! # Core Principles
//!
//! - **Schema as data**: datasets are described by plain configuration
//!   structures, not per-dataset code paths
//! - **Soft coercion**: a cell that cannot be converted becomes an invalid
//!   marker, never an error
//! - **Structural errors abort, data errors report**: only an unknown
//!   dataset or an unreadable workbook fails a request; data-quality
//!   problems come back as check results and error locations
//!
//! # Example
//!
//! ```no_run
//! use sheetvet::SheetVet;
//!
//! let vet = SheetVet::new();
//! let bytes = std::fs::read("valuations.xlsx").unwrap();
//! let report = vet.validate_workbook("Valuations", &bytes).unwrap();
//!
//! println!("valid: {}", report.valid);
//! println!("errors: {:?}", report.errors);
//! ```

pub mod checks;
pub mod coerce;
pub mod error;
pub mod report;
pub mod schema;
pub mod table;
pub mod workbook;

mod pipeline;

pub use crate::pipeline::{SheetVet, TableValidation};
pub use checks::{CheckResult, ErrorLocation};
pub use coerce::{CoercedTable, CoercedValue};
pub use error::{Result, SheetVetError};
pub use report::{PreviewRow, ValidationReport};
pub use schema::{ColumnType, DatasetSchema, SchemaRegistry, SheetRef, SheetSchema};
pub use table::{RawCell, RawTable};
