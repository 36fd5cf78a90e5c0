//! Declarative per-dataset schemas and the registry that serves them.

mod dataset;
mod registry;
mod types;

pub use dataset::{DatasetSchema, SheetSchema};
pub use registry::SchemaRegistry;
pub use types::{ColumnType, SheetRef};
