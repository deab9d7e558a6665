//! Improvement suggestions for a résumé and applying the ones a user picks.

pub mod handlers;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;

pub use mock::MockSuggestionProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionSection {
    Summary,
    Experience,
    Skills,
    Projects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Improvement,
    Addition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub section: SuggestionSection,
    pub kind: SuggestionKind,
    /// The text the suggestion would replace, as it reads today.
    pub original: String,
    pub suggested: String,
    pub reason: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Suggestion backend. Implement this to swap the canned provider for a real
/// model without touching handlers.
///
/// Carried in `AppState` as `Arc<dyn SuggestionProvider>`.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, record: &ResumeRecord) -> Result<Vec<Suggestion>, AppError>;

    /// Rewrites the free text of a single section.
    async fn enhance(&self, section: &str, content: &str) -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Applying suggestions
// ────────────────────────────────────────────────────────────────────────────

/// Applies the suggestions whose ids are in `chosen`, in suggestion order.
///
/// Returns the new record and the ids that were applied. When nothing applies
/// the record comes back unchanged, timestamp included.
pub fn apply_suggestions(
    record: &ResumeRecord,
    suggestions: &[Suggestion],
    chosen: &[String],
) -> (ResumeRecord, Vec<String>) {
    let mut next = record.clone();
    let mut applied = Vec::new();

    for suggestion in suggestions.iter().filter(|s| chosen.contains(&s.id)) {
        if apply_one(&mut next, suggestion) {
            applied.push(suggestion.id.clone());
        }
    }

    if applied.is_empty() {
        (record.clone(), applied)
    } else {
        (next.touched(), applied)
    }
}

/// Experience and Projects target the first entry; with no entry there is
/// nothing to apply to.
fn apply_one(record: &mut ResumeRecord, suggestion: &Suggestion) -> bool {
    let suggested = suggestion.suggested.clone();
    match suggestion.section {
        SuggestionSection::Summary => record.summary = suggested,
        SuggestionSection::Skills => {
            record.skills = suggested
                .split(", ")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        SuggestionSection::Experience => match record.experience.first_mut() {
            Some(entry) => entry.description = suggested,
            None => return false,
        },
        SuggestionSection::Projects => match record.projects.first_mut() {
            Some(entry) => entry.description = suggested,
            None => return false,
        },
    }
    true
}
