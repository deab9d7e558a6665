//! Patterns and keyword vocabularies used by the extraction rules.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Word boundaries are ASCII-only, so a local part is cut at the last
    /// non-ASCII letter instead of being dropped.
    pub static ref EMAIL: Regex = Regex::new(
        r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)"
    )
    .expect("email pattern");

    /// Loose North-American shape: optional country code, optional parens
    /// around the area code, space/dot/dash separators.
    pub static ref PHONE: Regex =
        Regex::new(r"(\+?[0-9]{1,3}[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
            .expect("phone pattern");

    pub static ref NAME_LINE: Regex = Regex::new(r"^[A-Za-z\s.]+$").expect("name pattern");

    pub static ref STREET_ADDRESS: Regex = Regex::new(
        r"(?i)[0-9]+\s+[A-Za-z\s,]+(?:Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Lane|Ln|Boulevard|Blvd)"
    )
    .expect("address pattern");

    pub static ref LINKEDIN: Regex =
        Regex::new(r"(?i)linkedin\.com/(?:in|pub)/[A-Za-z0-9_-]+").expect("linkedin pattern");

    pub static ref WEB_URL: Regex = Regex::new(
        r"https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}(?-u:\b)([-a-zA-Z0-9()@:%_+.~#?&/=]*)"
    )
    .expect("url pattern");
}

/// URLs containing any of these are never taken as the personal website.
pub const EXCLUDED_WEBSITE_MARKERS: &[&str] = &["linkedin.com", "mailto:"];

/// Canonical skill spellings. Output follows this order, not document order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "JavaScript",
    "Python",
    "React",
    "Node.js",
    "HTML",
    "CSS",
    "Java",
    "C++",
    "SQL",
    "Git",
    "Docker",
    "AWS",
    "TypeScript",
    "Angular",
    "Vue",
    "MongoDB",
    "PostgreSQL",
    "PHP",
    "C#",
    "Kubernetes",
    "Jenkins",
    "Linux",
    "Windows",
    "MacOS",
    "Agile",
    "Scrum",
    "REST",
    "API",
    "GraphQL",
    "Redux",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "Laravel",
    "Ruby",
    "Go",
];

pub const EXPERIENCE_HEADERS: &[&str] = &["experience", "work history", "employment", "career"];

pub const JOB_TITLE_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "manager",
    "analyst",
    "designer",
    "consultant",
    "specialist",
    "coordinator",
    "director",
    "lead",
];

pub const EDUCATION_HEADERS: &[&str] = &[
    "education",
    "degree",
    "university",
    "college",
    "bachelor",
    "master",
    "phd",
    "diploma",
];

pub const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "associate",
    "diploma",
    "certificate",
];

pub const SUMMARY_HEADERS: &[&str] = &["summary", "objective", "profile", "about"];

/// Returns true when `text` (any case) contains one of the lowercase `keywords`.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
