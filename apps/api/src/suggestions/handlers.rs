//! Axum route handlers for suggestions and section enhancement.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::resumes::SuggestionsApplied;
use crate::state::AppState;
use crate::suggestions::Suggestion;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub resume_id: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
pub struct ApplySuggestionsRequest {
    pub suggestion_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub section: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub section: String,
    pub enhanced_content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes/:id/suggestions
pub async fn handle_get_suggestions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let record = state.resumes.get(&id).await?;
    let suggestions = state.suggester.suggest(&record).await?;
    Ok(Json(SuggestionsResponse {
        resume_id: record.id,
        suggestions,
    }))
}

/// POST /api/v1/resumes/:id/suggestions/apply
///
/// Suggestions are regenerated against the stored record so the client only
/// has to send ids.
pub async fn handle_apply_suggestions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ApplySuggestionsRequest>,
) -> Result<Json<SuggestionsApplied>, AppError> {
    let outcome = state
        .resumes
        .apply_suggestions(&id, state.suggester.as_ref(), &request.suggestion_ids)
        .await?;
    Ok(Json(outcome))
}

/// POST /api/v1/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    if request.section.trim().is_empty() {
        return Err(AppError::Validation("section cannot be empty".to_string()));
    }

    let enhanced_content = state
        .suggester
        .enhance(&request.section, &request.content)
        .await?;

    Ok(Json(EnhanceResponse {
        section: request.section,
        enhanced_content,
    }))
}
