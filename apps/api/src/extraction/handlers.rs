//! Axum route handlers for the Extraction API.

use std::path::Path;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::extract;
use crate::models::resume::ResumeRecord;
use crate::resumes::SavedResume;
use crate::state::AppState;

/// Upload types the editor offers. Binary formats are still read as text.
const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "pdf", "doc", "docx"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub raw_text: String,
    #[serde(default)]
    pub file_name: String,
}

/// POST /api/v1/extract
///
/// Preview only: the record is returned but not stored.
pub async fn handle_extract(Json(request): Json<ExtractRequest>) -> Json<ResumeRecord> {
    Json(extract(&request.raw_text, &request.file_name))
}

/// POST /api/v1/extract/upload
///
/// Reads the multipart `file` field, extracts a record from it and adds the
/// record to the store.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SavedResume>), AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume.txt").to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        upload = Some((file_name, data));
    }

    let (file_name, data) = upload
        .ok_or_else(|| AppError::Validation("Multipart field 'file' is required".to_string()))?;
    check_extension(&file_name)?;

    let text = String::from_utf8_lossy(data.strip_prefix(UTF8_BOM).unwrap_or(&data));
    let record = if text.trim().is_empty() {
        warn!(file_name = %file_name, "Uploaded file is empty; starting from a blank resume");
        ResumeRecord::empty(&file_name)
    } else {
        extract(&text, &file_name)
    };

    info!(
        file_name = %file_name,
        bytes = data.len(),
        id = %record.id,
        "Resume extracted from upload"
    );

    let saved = state.resumes.add(record).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

fn check_extension(file_name: &str) -> Result<(), AppError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Unsupported file type for '{file_name}'. Accepted: .txt, .pdf, .doc, .docx"
        )))
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_extension() {
        assert!(check_extension("cv.txt").is_ok());
        assert!(check_extension("CV.PDF").is_ok());
        assert!(check_extension("cv.docx").is_ok());
        assert!(check_extension("cv.exe").is_err());
        assert!(check_extension("cv").is_err());
    }
}
