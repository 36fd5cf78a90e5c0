//! Static dataset-name → schema mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetVetError};

use super::dataset::{DatasetSchema, SheetSchema};
use super::types::ColumnType;

/// Read-only registry of dataset schemas.
///
/// Built once at process start and never mutated afterwards; concurrent
/// lookups need no locking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaRegistry {
    datasets: IndexMap<String, DatasetSchema>,
}

impl SchemaRegistry {
    /// Build a registry from a list of dataset schemas.
    ///
    /// Every schema's invariants are checked up front so a bad configuration
    /// fails at startup rather than mid-request.
    pub fn new(datasets: Vec<DatasetSchema>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(datasets.len());
        for dataset in datasets {
            dataset.validate()?;
            map.insert(dataset.name.clone(), dataset);
        }
        Ok(Self { datasets: map })
    }

    /// Load a registry from a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let datasets: Vec<DatasetSchema> = serde_json::from_str(json)?;
        Self::new(datasets)
    }

    /// The built-in production datasets.
    pub fn builtin() -> Self {
        let datasets = vec![
            DatasetSchema::new(
                "Valuations",
                vec![SheetSchema::new(
                    0,
                    "valuations",
                    columns(&[
                        ("date", ColumnType::Temporal),
                        ("asset", ColumnType::Text),
                        ("value", ColumnType::Numeric),
                    ]),
                    names(&["date", "asset", "value"]),
                    names(&["value"]),
                )],
            ),
            DatasetSchema::new(
                "Risk",
                vec![SheetSchema::new(
                    0,
                    "risk",
                    columns(&[
                        ("date", ColumnType::Temporal),
                        ("risk_factor", ColumnType::Text),
                        ("exposure", ColumnType::Numeric),
                    ]),
                    names(&["date", "risk_factor", "exposure"]),
                    names(&["exposure"]),
                )],
            ),
            DatasetSchema::new(
                "P&L",
                vec![
                    SheetSchema::new(
                        "Actuals",
                        "pnl_actuals",
                        columns(&[
                            ("date", ColumnType::Temporal),
                            ("account", ColumnType::Text),
                            ("profit_loss", ColumnType::Numeric),
                        ]),
                        names(&["date", "account", "profit_loss"]),
                        names(&["profit_loss"]),
                    ),
                    SheetSchema::new(
                        "KPIs",
                        "pnl_kpis",
                        columns(&[
                            ("date", ColumnType::Temporal),
                            ("kpi_type", ColumnType::Text),
                            ("kpi_name", ColumnType::Text),
                            ("kpi_value", ColumnType::Numeric),
                        ]),
                        names(&["date", "kpi_type", "kpi_name", "kpi_value"]),
                        names(&["kpi_value"]),
                    ),
                ],
            ),
        ];

        // The built-in schemas satisfy their own invariants.
        Self::new(datasets).expect("built-in registry is valid")
    }

    /// Look up a dataset by exact name.
    pub fn get(&self, name: &str) -> Result<&DatasetSchema> {
        self.datasets
            .get(name)
            .ok_or_else(|| SheetVetError::UnknownDataset(name.to_string()))
    }

    /// Names of all registered datasets, in registration order.
    pub fn dataset_names(&self) -> Vec<&str> {
        self.datasets.keys().map(|s| s.as_str()).collect()
    }

    /// Iterate over every sheet schema of every dataset.
    pub fn all_sheets(&self) -> impl Iterator<Item = &SheetSchema> {
        self.datasets.values().flat_map(|d| d.sheets.iter())
    }
}

fn columns(pairs: &[(&str, ColumnType)]) -> IndexMap<String, ColumnType> {
    pairs
        .iter()
        .map(|(name, ty)| (name.to_string(), *ty))
        .collect()
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
