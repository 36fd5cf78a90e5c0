//! Application state for the web server.

use std::sync::Arc;

use sheetvet::SheetVet;
use sqlx::SqlitePool;

/// Shared application state.
///
/// The validation pipeline (and the registry inside it) is read-only after
/// startup; the pool is the only handle to shared mutable storage. Each
/// request builds its own tables and report, nothing per-request is shared.
#[derive(Clone)]
pub struct AppState {
    /// The validation pipeline.
    pub vet: Arc<SheetVet>,
    /// SQLite connection pool for the persistence adapter.
    pub pool: SqlitePool,
}

impl AppState {
    /// Create new application state.
    pub fn new(vet: Arc<SheetVet>, pool: SqlitePool) -> Self {
        Self { vet, pool }
    }
}
