//! Dataset and sheet schema definitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetVetError};

use super::types::{ColumnType, SheetRef};

/// Validation contract for a single worksheet within an uploaded workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSchema {
    /// Which worksheet this schema applies to.
    pub sheet: SheetRef,
    /// Name of the backing table rows are persisted into.
    pub table_name: String,
    /// Declared columns and their semantic types, in table order.
    pub columns: IndexMap<String, ColumnType>,
    /// Columns that must be present and populated.
    pub required_cols: Vec<String>,
    /// Columns participating in the checksum rule.
    pub numeric_cols: Vec<String>,
}

impl SheetSchema {
    /// Create a sheet schema.
    pub fn new(
        sheet: impl Into<SheetRef>,
        table_name: impl Into<String>,
        columns: IndexMap<String, ColumnType>,
        required_cols: Vec<String>,
        numeric_cols: Vec<String>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            table_name: table_name.into(),
            columns,
            required_cols,
            numeric_cols,
        }
    }

    /// Check the schema invariants: required and numeric columns must be
    /// declared columns.
    pub fn validate(&self) -> Result<()> {
        for col in &self.required_cols {
            if !self.columns.contains_key(col) {
                return Err(SheetVetError::InvalidSchema {
                    table: self.table_name.clone(),
                    message: format!("required column '{}' is not declared", col),
                });
            }
        }
        for col in &self.numeric_cols {
            if !self.columns.contains_key(col) {
                return Err(SheetVetError::InvalidSchema {
                    table: self.table_name.clone(),
                    message: format!("numeric column '{}' is not declared", col),
                });
            }
        }
        Ok(())
    }

    /// Get the declared type of a column, if any.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns.get(name).copied()
    }
}

/// A named dataset composed of one or more sheet schemas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// Dataset name as presented to callers.
    pub name: String,
    /// Sheet schemas in processing order.
    pub sheets: Vec<SheetSchema>,
}

impl DatasetSchema {
    /// Create a dataset schema.
    pub fn new(name: impl Into<String>, sheets: Vec<SheetSchema>) -> Self {
        Self {
            name: name.into(),
            sheets,
        }
    }

    /// Check invariants for every sheet schema.
    pub fn validate(&self) -> Result<()> {
        for sheet in &self.sheets {
            sheet.validate()?;
        }
        Ok(())
    }
}
