//! Error types for the sheetvet library.

use thiserror::Error;

/// Main error type for sheetvet operations.
///
/// Only structural problems are represented here. Data-quality failures
/// (bad types, missing values, checksum violations) are never errors; they
/// are reported as failed checks inside a [`crate::ValidationReport`].
#[derive(Debug, Error)]
pub enum SheetVetError {
    /// Dataset name not present in the schema registry.
    #[error("Unknown dataset: '{0}'")]
    UnknownDataset(String),

    /// The referenced sheet does not resolve within the uploaded workbook.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The uploaded bytes could not be read as a workbook.
    #[error("Unreadable workbook: {0}")]
    UnreadableWorkbook(String),

    /// A schema violated its own invariants (e.g. a required column that is
    /// not declared).
    #[error("Invalid schema for table '{table}': {message}")]
    InvalidSchema { table: String, message: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for sheetvet operations.
pub type Result<T> = std::result::Result<T, SheetVetError>;
