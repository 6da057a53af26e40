pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::drafting::handlers as drafting;
use crate::shotlist::handlers as shotlist;
use crate::shots::handlers as shots;
use crate::state::AppState;

// Spreadsheets with per-shot prompt text get large; the JSON wrapper around
// an uploaded CSV even more so.
const SHOTS_BODY_LIMIT: usize = 50 * 1024 * 1024;
const CSV_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/shots",
            get(shots::handle_list_shots)
                .post(shots::handle_add_shot)
                .put(shots::handle_update_shot)
                .delete(shots::handle_delete_shot)
                .layer(DefaultBodyLimit::max(SHOTS_BODY_LIMIT)),
        )
        .route(
            "/csv",
            get(shotlist::handle_export_csv)
                .post(shotlist::handle_import_csv)
                .layer(DefaultBodyLimit::max(CSV_BODY_LIMIT)),
        )
        .route("/generate-prompt", post(drafting::handle_generate_prompt))
        .route("/update-prompt", post(drafting::handle_update_prompt))
        .with_state(state)
}
