//! Axum route handlers for CSV import and export.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::shotlist::codec::{export_shotlist, parse_shotlist};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCsvRequest {
    #[serde(default)]
    pub csv_data: String,
}

/// POST /csv
///
/// Parses the uploaded document and replaces the entire stored collection
/// with the result; import is never a merge. Rows the codec drops are
/// simply absent from the new collection.
pub async fn handle_import_csv(
    State(state): State<AppState>,
    Json(request): Json<ImportCsvRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if request.csv_data.is_empty() {
        return Err(AppError::Validation("CSV data is required".to_string()));
    }

    let shots = parse_shotlist(&request.csv_data);
    state.store.replace_all(&shots)?;
    info!("Imported {} shots from CSV", shots.len());

    Ok(Json(json!({ "message": "CSV imported successfully" })))
}

/// GET /csv
///
/// Serializes the stored collection as a downloadable CSV attachment. An
/// empty collection exports as just the header line.
pub async fn handle_export_csv(State(state): State<AppState>) -> Response {
    let csv = export_shotlist(&state.store.get_all());

    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shots-export.csv\"",
            ),
        ],
        csv,
    )
        .into_response()
}
