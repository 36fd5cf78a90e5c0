//! Workbook validation handler.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use sheetvet::ValidationReport;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Validate an uploaded workbook against a named dataset.
///
/// Data-quality problems come back inside the report with HTTP-success
/// semantics; only an unknown dataset or a broken upload produces an error
/// status.
pub async fn validate_dataset(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ValidationReport>, ApiError> {
    // Reject unknown datasets before touching the upload.
    state.vet.registry().get(&dataset)?;

    let mut bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload: {}", e)))?
    {
        if field.name() == Some("file") {
            bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?,
            );
            break;
        }
    }

    let bytes = bytes.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".to_string()))?;

    tracing::debug!("Validating {} bytes against dataset '{}'", bytes.len(), dataset);
    let report = state.vet.validate_workbook(&dataset, &bytes)?;

    Ok(Json(report))
}
