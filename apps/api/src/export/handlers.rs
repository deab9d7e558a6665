use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::{export, ExportFormat};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

/// GET /api/v1/resumes/:id/export?format=json|html|print
pub async fn handle_export_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.resumes.get(&id).await?;
    let doc = export(&record, query.format)?;

    let disposition = if doc.inline {
        format!("inline; filename=\"{}\"", doc.file_name)
    } else {
        format!("attachment; filename=\"{}\"", doc.file_name)
    };

    Ok((
        [
            (header::CONTENT_TYPE, doc.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        doc.body,
    ))
}
