//! Extraction rules. Each rule is a pure function over the segmented source and
//! yields at most one value; `RULES` fixes the order they run in.

use crate::extraction::patterns::{
    contains_any, DEGREE_KEYWORDS, EDUCATION_HEADERS, EMAIL, EXCLUDED_WEBSITE_MARKERS,
    EXPERIENCE_HEADERS, JOB_TITLE_KEYWORDS, LINKEDIN, NAME_LINE, PHONE, SKILL_VOCABULARY,
    STREET_ADDRESS, SUMMARY_HEADERS, WEB_URL,
};
use crate::extraction::SourceText;
use crate::models::resume::{generate_id, EducationEntry, ExperienceEntry, ResumeRecord};

pub const NAME_SCAN_LINES: usize = 5;
/// The experience window ends before `anchor + 10`.
pub const EXPERIENCE_WINDOW_END: usize = 10;
/// The education window starts at the anchor itself and ends before `anchor + 5`.
pub const EDUCATION_WINDOW_END: usize = 5;
pub const SUMMARY_LOOKAHEAD: usize = 3;
pub const SUMMARY_MIN_LINE_CHARS: usize = 20;

pub const EXPERIENCE_PLACEHOLDER_COMPANY: &str = "Company name extracted from resume";
pub const EXPERIENCE_START_DATE: &str = "2020-01-01";
pub const EXPERIENCE_END_DATE: &str = "2023-12-31";
pub const EDUCATION_PLACEHOLDER_INSTITUTION: &str = "Educational Institution";
pub const EDUCATION_START_DATE: &str = "2016-09-01";
pub const EDUCATION_END_DATE: &str = "2020-05-31";

/// A value produced by one rule, tagged with the record field it fills.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Email(String),
    Phone(String),
    Name(String),
    Address(String),
    Linkedin(String),
    Website(String),
    Skills(Vec<String>),
    Experience(ExperienceEntry),
    Education(EducationEntry),
    Summary(String),
}

impl Extracted {
    pub fn apply_to(self, record: &mut ResumeRecord) {
        let info = &mut record.personal_info;
        match self {
            Extracted::Email(v) => info.email = v,
            Extracted::Phone(v) => info.phone = v,
            Extracted::Name(v) => info.name = v,
            Extracted::Address(v) => info.address = v,
            Extracted::Linkedin(v) => info.linkedin = v,
            Extracted::Website(v) => info.website = v,
            Extracted::Skills(v) => record.skills = v,
            Extracted::Experience(entry) => record.experience.push(entry),
            Extracted::Education(entry) => record.education.push(entry),
            Extracted::Summary(v) => record.summary = v,
        }
    }
}

pub type RuleFn = fn(&SourceText<'_>) -> Option<Extracted>;

pub struct ExtractionRule {
    pub name: &'static str,
    pub run: RuleFn,
}

const fn rule(name: &'static str, run: RuleFn) -> ExtractionRule {
    ExtractionRule { name, run }
}

pub const RULES: &[ExtractionRule] = &[
    rule("email", extract_email),
    rule("phone", extract_phone),
    rule("name", extract_name),
    rule("address", extract_address),
    rule("linkedin", extract_linkedin),
    rule("website", extract_website),
    rule("skills", extract_skills),
    rule("experience", extract_experience),
    rule("education", extract_education),
    rule("summary", extract_summary),
];

pub fn extract_email(source: &SourceText<'_>) -> Option<Extracted> {
    EMAIL
        .find(source.full)
        .map(|m| Extracted::Email(m.as_str().to_string()))
}

pub fn extract_phone(source: &SourceText<'_>) -> Option<Extracted> {
    PHONE
        .find(source.full)
        .map(|m| Extracted::Phone(m.as_str().to_string()))
}

pub fn extract_name(source: &SourceText<'_>) -> Option<Extracted> {
    source
        .lines
        .iter()
        .take(NAME_SCAN_LINES)
        .map(|line| line.trim())
        .find(|line| {
            let len = line.chars().count();
            (3..50).contains(&len) && NAME_LINE.is_match(line) && !line.contains('@')
        })
        .map(|line| Extracted::Name(line.to_string()))
}

pub fn extract_address(source: &SourceText<'_>) -> Option<Extracted> {
    STREET_ADDRESS
        .find(source.full)
        .map(|m| Extracted::Address(m.as_str().to_string()))
}

pub fn extract_linkedin(source: &SourceText<'_>) -> Option<Extracted> {
    LINKEDIN
        .find(source.full)
        .map(|m| Extracted::Linkedin(m.as_str().to_string()))
}

pub fn extract_website(source: &SourceText<'_>) -> Option<Extracted> {
    WEB_URL
        .find_iter(source.full)
        .map(|m| m.as_str())
        .find(|url| !EXCLUDED_WEBSITE_MARKERS.iter().any(|marker| url.contains(marker)))
        .map(|url| Extracted::Website(url.to_string()))
}

pub fn extract_skills(source: &SourceText<'_>) -> Option<Extracted> {
    let skills: Vec<String> = SKILL_VOCABULARY
        .iter()
        .filter(|skill| source.lower.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect();

    (!skills.is_empty()).then_some(Extracted::Skills(skills))
}

pub fn extract_experience(source: &SourceText<'_>) -> Option<Extracted> {
    let anchor = source.find_anchor(EXPERIENCE_HEADERS)?;
    let line = source
        .window(anchor + 1, anchor + EXPERIENCE_WINDOW_END)
        .iter()
        .find(|line| contains_any(line, JOB_TITLE_KEYWORDS))?;

    Some(Extracted::Experience(ExperienceEntry {
        id: generate_id("exp"),
        company: EXPERIENCE_PLACEHOLDER_COMPANY.to_string(),
        position: line.trim().to_string(),
        start_date: EXPERIENCE_START_DATE.to_string(),
        end_date: EXPERIENCE_END_DATE.to_string(),
        description: format!("Experience details extracted from {}", source.file_name),
    }))
}

pub fn extract_education(source: &SourceText<'_>) -> Option<Extracted> {
    let anchor = source.find_anchor(EDUCATION_HEADERS)?;
    let line = source
        .window(anchor, anchor + EDUCATION_WINDOW_END)
        .iter()
        .find(|line| contains_any(line, DEGREE_KEYWORDS))?;

    Some(Extracted::Education(EducationEntry {
        id: generate_id("edu"),
        institution: EDUCATION_PLACEHOLDER_INSTITUTION.to_string(),
        degree: line.trim().to_string(),
        start_date: EDUCATION_START_DATE.to_string(),
        end_date: EDUCATION_END_DATE.to_string(),
        gpa: String::new(),
    }))
}

/// Every summary anchor is tried in document order; the first one followed by
/// at least one substantial line wins.
pub fn extract_summary(source: &SourceText<'_>) -> Option<Extracted> {
    source
        .lines
        .iter()
        .enumerate()
        .filter(|(_, line)| contains_any(line, SUMMARY_HEADERS))
        .find_map(|(i, _)| {
            let picked: Vec<&str> = source
                .window(i + 1, i + 1 + SUMMARY_LOOKAHEAD)
                .iter()
                .copied()
                .filter(|line| line.trim().chars().count() > SUMMARY_MIN_LINE_CHARS)
                .collect();
            (!picked.is_empty()).then(|| picked.join(" ").trim().to_string())
        })
        .map(Extracted::Summary)
}
