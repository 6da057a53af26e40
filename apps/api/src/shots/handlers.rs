//! Axum route handlers for shot CRUD.
//!
//! Every mutating endpoint responds with the full collection so the caller
//! can re-render its list without a second round trip.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::models::shot::{ShotPatch, ShotRecord};
use crate::shots::sample_shots;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateShotRequest {
    #[serde(default)]
    pub id: String,
    pub patch: Option<ShotPatch>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteShotRequest {
    #[serde(default)]
    pub id: String,
}

/// GET /shots
///
/// Returns the full collection. On the first call against an empty
/// collection the built-in samples are seeded; a failing seed write is
/// logged and the empty list returned, so a read-only data directory does
/// not break listing.
pub async fn handle_list_shots(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShotRecord>>, AppError> {
    let mut shots = state.store.get_all();

    if shots.is_empty() {
        let samples = sample_shots();
        match state.store.replace_all(&samples) {
            Ok(()) => shots = samples,
            Err(e) => warn!("Failed to seed sample shots: {e}"),
        }
    }

    Ok(Json(shots))
}

/// POST /shots
///
/// Appends one shot. The body is a full shot object; `title` and `id` are
/// required, everything else defaults.
pub async fn handle_add_shot(
    State(state): State<AppState>,
    Json(shot): Json<ShotRecord>,
) -> Result<Json<Vec<ShotRecord>>, AppError> {
    if shot.title.is_empty() || shot.id.is_empty() {
        return Err(AppError::Validation("Title and ID are required".to_string()));
    }

    state.store.add(shot)?;
    Ok(Json(state.store.get_all()))
}

/// PUT /shots
///
/// Shallow-merges `patch` onto the shot with the given id. An unknown id
/// still succeeds and returns the unchanged collection; the store writes
/// the collection back either way and does not report a miss.
pub async fn handle_update_shot(
    State(state): State<AppState>,
    Json(request): Json<UpdateShotRequest>,
) -> Result<Json<Vec<ShotRecord>>, AppError> {
    if request.id.is_empty() {
        return Err(AppError::Validation("Shot ID and patch are required".to_string()));
    }
    let patch = request
        .patch
        .ok_or_else(|| AppError::Validation("Shot ID and patch are required".to_string()))?;

    state.store.update(&request.id, patch)?;
    Ok(Json(state.store.get_all()))
}

/// DELETE /shots
///
/// Removes the shot with the given id; removing an unknown id succeeds.
pub async fn handle_delete_shot(
    State(state): State<AppState>,
    Json(request): Json<DeleteShotRequest>,
) -> Result<Json<Vec<ShotRecord>>, AppError> {
    if request.id.is_empty() {
        return Err(AppError::Validation("Shot ID is required".to_string()));
    }

    state.store.remove(&request.id)?;
    Ok(Json(state.store.get_all()))
}
