//! Heuristic résumé field extraction — turns free text into a `ResumeRecord`.
//!
//! Extraction never fails. Each rule in `rules::RULES` is an independent,
//! best-effort pattern match; a rule that finds nothing leaves its field at the
//! empty default. Two fallbacks run afterwards and may read what the rules
//! produced.

pub mod handlers;
pub mod patterns;
pub mod rules;

use tracing::debug;

use crate::models::resume::{generate_id, ExperienceEntry, ResumeRecord};
use rules::{EXPERIENCE_END_DATE, EXPERIENCE_START_DATE, RULES};

const SUMMARY_PREVIEW_LINES: usize = 3;
const SUMMARY_PREVIEW_CAP: usize = 200;
const SUMMARY_PREVIEW_MIN: usize = 50;
const SUMMARY_FALLBACK_SKILLS: usize = 3;

/// Raw text segmented once and shared by every rule.
#[derive(Debug)]
pub struct SourceText<'a> {
    pub full: &'a str,
    pub lower: String,
    /// Non-blank lines in document order, untrimmed.
    pub lines: Vec<&'a str>,
    pub file_name: &'a str,
}

impl<'a> SourceText<'a> {
    pub fn new(full: &'a str, file_name: &'a str) -> Self {
        Self {
            full,
            lower: full.to_lowercase(),
            lines: full.lines().filter(|l| !l.trim().is_empty()).collect(),
            file_name,
        }
    }

    /// Index of the first line containing any of the lowercase `headers`.
    pub fn find_anchor(&self, headers: &[&str]) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| patterns::contains_any(line, headers))
    }

    /// Lines in `start..end`, clamped to the document.
    pub fn window(&self, start: usize, end: usize) -> &[&'a str] {
        let end = end.min(self.lines.len());
        let start = start.min(end);
        &self.lines[start..end]
    }
}

/// Extracts a best-effort record from the text of an uploaded file.
pub fn extract(raw_text: &str, file_name: &str) -> ResumeRecord {
    let raw_text = raw_text.strip_prefix('\u{FEFF}').unwrap_or(raw_text);
    let source = SourceText::new(raw_text, file_name);
    let mut record = ResumeRecord::empty(file_name);

    for rule in RULES {
        match (rule.run)(&source) {
            Some(value) => {
                debug!(rule = rule.name, ?value, "extraction rule matched");
                value.apply_to(&mut record);
            }
            None => debug!(rule = rule.name, "extraction rule found nothing"),
        }
    }

    apply_fallbacks(&source, &mut record);

    debug!(
        file_name,
        lines = source.lines.len(),
        skills = record.skills.len(),
        experience = record.experience.len(),
        education = record.education.len(),
        "extraction finished"
    );
    record
}

fn apply_fallbacks(source: &SourceText<'_>, record: &mut ResumeRecord) {
    if record.experience.is_empty() && !record.personal_info.name.is_empty() {
        debug!("no experience entry found, adding placeholder");
        record.experience.push(placeholder_experience());
    }

    if record.summary.is_empty() {
        let preview: String = source
            .lines
            .iter()
            .take(SUMMARY_PREVIEW_LINES)
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(SUMMARY_PREVIEW_CAP)
            .collect();

        if preview.chars().count() > SUMMARY_PREVIEW_MIN {
            record.summary = fallback_summary(&record.skills);
        }
    }
}

fn placeholder_experience() -> ExperienceEntry {
    ExperienceEntry {
        id: generate_id("exp"),
        company: "Previous Company".to_string(),
        position: "Professional Role".to_string(),
        start_date: EXPERIENCE_START_DATE.to_string(),
        end_date: EXPERIENCE_END_DATE.to_string(),
        description: "Professional experience details will be updated during editing.".to_string(),
    }
}

fn fallback_summary(skills: &[String]) -> String {
    let top: Vec<&str> = skills
        .iter()
        .take(SUMMARY_FALLBACK_SKILLS)
        .map(String::as_str)
        .collect();
    format!(
        "Professional with experience in {} and other relevant technologies. Details extracted from uploaded resume.",
        top.join(", ")
    )
}
