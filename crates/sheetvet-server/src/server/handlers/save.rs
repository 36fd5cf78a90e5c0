//! Save handler: persist accepted table data.

use axum::{
    Json,
    extract::{Path, State},
};
use indexmap::IndexMap;
use serde::Serialize;
use sheetvet::PreviewRow;

use crate::db;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for a successful save.
#[derive(Serialize)]
pub struct SaveResponse {
    /// Confirmation message.
    pub message: String,
}

/// Append validated (possibly edited) rows to their backing tables.
///
/// Tables are saved one at a time with no cross-table transaction; if a
/// later table fails, earlier tables stay committed and the whole call
/// reports the store's error.
pub async fn save_dataset(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
    Json(payload): Json<IndexMap<String, Vec<PreviewRow>>>,
) -> Result<Json<SaveResponse>, ApiError> {
    for (table, rows) in &payload {
        let inserted = db::append_rows(&state.pool, table, rows).await?;
        tracing::info!(
            "Saved {} rows into '{}' for dataset '{}'",
            inserted,
            table,
            dataset
        );
    }

    Ok(Json(SaveResponse {
        message: "Saved!".to_string(),
    }))
}
