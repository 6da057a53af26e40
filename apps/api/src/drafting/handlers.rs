//! Axum route handlers for the drafting workflow.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::drafting::consistency::analyze_character_consistency;
use crate::drafting::prompts::{
    build_draft_context, build_revision_context, PromptFormData, DRAFT_SYSTEM,
    MAX_EXAMPLE_PROMPTS, REVISE_SYSTEM,
};
use crate::errors::AppError;
use crate::models::shot::{ShotPatch, ShotRecord, ShotStatus};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePromptRequest {
    #[serde(default)]
    pub shot_id: String,
    #[serde(default)]
    pub form_data: Option<PromptFormData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePromptResponse {
    pub prompt: String,
    pub shot: Option<ShotRecord>,
    pub all_shots: Vec<ShotRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromptRequest {
    #[serde(default)]
    pub shot_id: String,
    #[serde(default)]
    pub current_prompt: String,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromptResponse {
    pub updated_prompt: String,
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-prompt
///
/// Drafts a prompt for one shot from the form selections, prior prompt text
/// for the selected characters, and up to five example prompts, then stores
/// it on the shot with status "prompt generated".
pub async fn handle_generate_prompt(
    State(state): State<AppState>,
    Json(request): Json<GeneratePromptRequest>,
) -> Result<Json<GeneratePromptResponse>, AppError> {
    if request.shot_id.is_empty() {
        return Err(AppError::Validation(
            "Shot ID and form data are required".to_string(),
        ));
    }
    let form = request.form_data.ok_or_else(|| {
        AppError::Validation("Shot ID and form data are required".to_string())
    })?;

    let all_shots = state.store.get_all();
    let current = all_shots
        .iter()
        .find(|s| s.id == request.shot_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Shot not found".to_string()))?;

    let consistency = analyze_character_consistency(&all_shots, &form.characters);
    let context = build_draft_context(&form, &consistency, &current, &all_shots);

    let prompt = state
        .drafter
        .draft(&context, DRAFT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Prompt drafting failed: {e}")))?;

    state.store.update(
        &request.shot_id,
        ShotPatch {
            prompt: Some(prompt.clone()),
            status: Some(ShotStatus::PromptGenerated),
            ..Default::default()
        },
    )?;

    let all_shots = state.store.get_all();
    let shot = all_shots.iter().find(|s| s.id == request.shot_id).cloned();

    Ok(Json(GeneratePromptResponse {
        prompt,
        shot,
        all_shots,
    }))
}

/// POST /update-prompt
///
/// Revises an existing prompt from viewer feedback, using other shots'
/// prompts as character references, and stores the result with the
/// transient status "prompt updated". Like the store itself, this does not
/// 404 on an unknown shot id; the revised prompt is still returned.
pub async fn handle_update_prompt(
    State(state): State<AppState>,
    Json(request): Json<UpdatePromptRequest>,
) -> Result<Json<UpdatePromptResponse>, AppError> {
    if request.shot_id.is_empty() || request.current_prompt.is_empty() || request.feedback.is_empty()
    {
        return Err(AppError::Validation(
            "Shot ID, current prompt, and feedback are required".to_string(),
        ));
    }

    let references: Vec<String> = state
        .store
        .get_all()
        .into_iter()
        .filter(|s| !s.prompt.is_empty() && s.id != request.shot_id)
        .map(|s| s.prompt)
        .take(MAX_EXAMPLE_PROMPTS)
        .collect();

    let context = build_revision_context(&request.current_prompt, &request.feedback, &references);

    let updated_prompt = state
        .drafter
        .draft(&context, REVISE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Prompt revision failed: {e}")))?;

    state.store.update(
        &request.shot_id,
        ShotPatch {
            prompt: Some(updated_prompt.clone()),
            status: Some(ShotStatus::PromptUpdated),
            ..Default::default()
        },
    )?;

    Ok(Json(UpdatePromptResponse {
        updated_prompt,
        message: "Prompt updated successfully based on feedback".to_string(),
    }))
}
