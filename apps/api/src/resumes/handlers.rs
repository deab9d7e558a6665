use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::resumes::edits::ResumeEdit;
use crate::resumes::SavedResume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: String,
    pub persisted: bool,
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(State(state): State<AppState>) -> Json<ResumeListResponse> {
    let resumes = state.resumes.list().await;
    Json(ResumeListResponse {
        count: resumes.len(),
        resumes,
    })
}

/// POST /api/v1/resumes
///
/// An empty body creates a blank record, which is how the editor starts a
/// résumé from scratch.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SavedResume>), AppError> {
    let record = if body.iter().all(u8::is_ascii_whitespace) {
        ResumeRecord::empty("")
    } else {
        serde_json::from_slice::<ResumeRecord>(&body)
            .map_err(|e| AppError::Validation(format!("Invalid resume body: {e}")))?
            .touched()
    };

    let saved = state.resumes.add(record).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeRecord>, AppError> {
    Ok(Json(state.resumes.get(&id).await?))
}

/// PUT /api/v1/resumes/:id
///
/// The path id wins over any id in the body.
pub async fn handle_replace_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut record): Json<ResumeRecord>,
) -> Result<Json<SavedResume>, AppError> {
    record.id = id;
    Ok(Json(state.resumes.update(record).await?))
}

/// PATCH /api/v1/resumes/:id
pub async fn handle_edit_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(edits): Json<Vec<ResumeEdit>>,
) -> Result<Json<SavedResume>, AppError> {
    Ok(Json(state.resumes.edit(&id, &edits).await?))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let removed = state.resumes.remove(&id).await?;
    Ok(Json(DeleteResponse {
        id: removed.resume.id,
        persisted: removed.persisted,
    }))
}
