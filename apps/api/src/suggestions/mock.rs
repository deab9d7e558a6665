use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::suggestions::{Suggestion, SuggestionKind, SuggestionProvider, SuggestionSection};

const SUMMARY_ADDENDUM: &str = "Demonstrated expertise in leading cross-functional teams and delivering high-impact solutions that drive business growth and operational efficiency.";

const EXPERIENCE_BULLETS: &str = "\
• Led development of scalable microservices architecture serving 100K+ active users, resulting in 40% improved system performance
• Implemented robust CI/CD pipelines using Jenkins and Docker, reducing deployment time by 60% and minimizing production issues
• Mentored team of 3 junior developers through code reviews and technical guidance, improving team velocity by 25%
• Collaborated with product managers and designers to deliver feature enhancements that increased user engagement by 30%";

const EXTRA_SKILLS: &str = "Kubernetes, Microservices, System Design, Team Leadership, Agile Methodologies, Performance Optimization";

const PROJECT_DESCRIPTION: &str = "Built comprehensive e-commerce platform with React frontend and Node.js backend, featuring real-time inventory management, secure payment processing via Stripe API, and automated email notifications. Achieved 99.9% uptime and processed 10K+ transactions monthly.";

/// Canned suggestions with fixed text. No model behind it; `delay` mimics the
/// latency of one.
#[derive(Debug, Clone, Default)]
pub struct MockSuggestionProvider {
    delay: Duration,
}

impl MockSuggestionProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl SuggestionProvider for MockSuggestionProvider {
    async fn suggest(&self, record: &ResumeRecord) -> Result<Vec<Suggestion>, AppError> {
        self.pause().await;
        debug!(id = %record.id, "generating canned suggestions");
        Ok(canned_suggestions(record))
    }

    async fn enhance(&self, section: &str, content: &str) -> Result<String, AppError> {
        self.pause().await;
        debug!(section, "enhancing section");
        Ok(format!("[Enhanced] {content}"))
    }
}

fn canned_suggestions(record: &ResumeRecord) -> Vec<Suggestion> {
    let skills = record.skills.join(", ");
    let suggested_skills = if skills.is_empty() {
        EXTRA_SKILLS.to_string()
    } else {
        format!("{skills}, {EXTRA_SKILLS}")
    };
    let summary = if record.summary.is_empty() {
        SUMMARY_ADDENDUM.to_string()
    } else {
        format!("{} {SUMMARY_ADDENDUM}", record.summary)
    };

    vec![
        Suggestion {
            id: "1".to_string(),
            section: SuggestionSection::Summary,
            kind: SuggestionKind::Improvement,
            original: record.summary.clone(),
            suggested: summary,
            reason: "Added leadership and business impact keywords to strengthen professional positioning".to_string(),
        },
        Suggestion {
            id: "2".to_string(),
            section: SuggestionSection::Experience,
            kind: SuggestionKind::Improvement,
            original: record
                .experience
                .first()
                .map(|e| e.description.clone())
                .unwrap_or_default(),
            suggested: EXPERIENCE_BULLETS.to_string(),
            reason: "Enhanced with quantifiable achievements, action verbs, and specific technologies".to_string(),
        },
        Suggestion {
            id: "3".to_string(),
            section: SuggestionSection::Skills,
            kind: SuggestionKind::Addition,
            original: skills,
            suggested: suggested_skills,
            reason: "Added trending technical and soft skills relevant to senior developer roles".to_string(),
        },
        Suggestion {
            id: "4".to_string(),
            section: SuggestionSection::Projects,
            kind: SuggestionKind::Improvement,
            original: record
                .projects
                .first()
                .map(|p| p.description.clone())
                .unwrap_or_default(),
            suggested: PROJECT_DESCRIPTION.to_string(),
            reason: "Added technical details, metrics, and business impact to showcase project complexity".to_string(),
        },
    ]
}
