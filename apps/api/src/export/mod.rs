//! Downloadable renderings of a stored résumé.

pub mod handlers;
pub mod html;

use anyhow::Context;
use serde::Deserialize;

use crate::models::resume::ResumeRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Html,
    Print,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Html | ExportFormat::Print => "html",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json; charset=utf-8",
            ExportFormat::Html | ExportFormat::Print => "text/html; charset=utf-8",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    /// Print sheets open in the browser instead of downloading.
    pub inline: bool,
    pub body: String,
}

pub fn export(record: &ResumeRecord, format: ExportFormat) -> anyhow::Result<ExportedDocument> {
    let body = match format {
        ExportFormat::Json => serde_json::to_string_pretty(record)
            .with_context(|| format!("Failed to serialize resume {}", record.id))?,
        ExportFormat::Html => html::render_document(record),
        ExportFormat::Print => html::render_print(record),
    };

    Ok(ExportedDocument {
        file_name: download_file_name(&record.personal_info.name, format.extension()),
        content_type: format.content_type(),
        inline: format == ExportFormat::Print,
        body,
    })
}

/// `Jane  Q Smith` → `Jane_Q_Smith_resume.<ext>`; runs of whitespace collapse
/// to one underscore. Characters that would break a `Content-Disposition`
/// header are dropped.
pub fn download_file_name(name: &str, extension: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '"' | '/' | '\\') && (c.is_whitespace() || !c.is_control()))
        .collect();
    let stem = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        format!("resume.{extension}")
    } else {
        format!("{stem}_resume.{extension}")
    }
}
