use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a list-keying id such as `exp_3f2a…`. Ids carry no meaning beyond
/// uniqueness within their list.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl ExperienceEntry {
    pub fn blank() -> Self {
        Self {
            id: generate_id("exp"),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
}

impl EducationEntry {
    pub fn blank() -> Self {
        Self {
            id: generate_id("edu"),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
}

impl ProjectEntry {
    pub fn blank() -> Self {
        Self {
            id: generate_id("proj"),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
}

impl CertificationEntry {
    pub fn blank() -> Self {
        Self {
            id: generate_id("cert"),
            ..Default::default()
        }
    }
}

/// The structured résumé. Absent data is always an empty string or an empty
/// list, never null, so every consumer can rely on the full key set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: String,
    pub file_name: String,
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub last_modified: DateTime<Utc>,
}

impl ResumeRecord {
    /// A record with a fresh id and every field at its empty default.
    pub fn empty(file_name: &str) -> Self {
        Self {
            id: generate_id("resume"),
            file_name: file_name.to_string(),
            last_modified: Utc::now(),
            ..Default::default()
        }
    }

    /// Returns the record with `last_modified` moved to now. Called on every
    /// edit; reads never touch the timestamp.
    pub fn touched(mut self) -> Self {
        self.last_modified = Utc::now();
        self
    }

    /// Fills in ids the caller left blank, e.g. entries posted by a client
    /// that does not generate its own keys. An id repeated within one list
    /// counts as blank after its first use.
    pub fn with_ids_assigned(mut self) -> Self {
        if self.id.trim().is_empty() {
            self.id = generate_id("resume");
        }
        assign_unique_ids(&mut self.experience, "exp");
        assign_unique_ids(&mut self.education, "edu");
        assign_unique_ids(&mut self.projects, "proj");
        assign_unique_ids(&mut self.certifications, "cert");
        self
    }
}

/// List entries keyed by a per-list id.
trait KeyedEntry {
    fn id_mut(&mut self) -> &mut String;
}

impl KeyedEntry for ExperienceEntry {
    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

impl KeyedEntry for EducationEntry {
    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

impl KeyedEntry for ProjectEntry {
    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

impl KeyedEntry for CertificationEntry {
    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

fn assign_unique_ids<T: KeyedEntry>(entries: &mut [T], prefix: &str) {
    let mut seen = HashSet::new();
    for entry in entries {
        let id = entry.id_mut();
        if id.trim().is_empty() || seen.contains(id.as_str()) {
            *id = generate_id(prefix);
        }
        seen.insert(id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_has_id_and_defaults() {
        let record = ResumeRecord::empty("cv.txt");
        assert!(record.id.starts_with("resume_"));
        assert_eq!(record.file_name, "cv.txt");
        assert_eq!(record.personal_info, PersonalInfo::default());
        assert!(record.skills.is_empty());
        assert!(record.projects.is_empty());
    }

    #[test]
    fn test_serializes_camel_case_keys_without_nulls() {
        let record = ResumeRecord::empty("cv.txt");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert!(json.get("lastModified").is_some());
        assert!(json.get("fileName").is_some());
        assert_eq!(json["personalInfo"]["linkedin"], "");
        assert_eq!(json["certifications"], serde_json::json!([]));

        let entry = serde_json::to_value(ExperienceEntry::blank()).unwrap();
        assert!(entry.get("startDate").is_some());
        assert!(entry.get("endDate").is_some());
    }

    #[test]
    fn test_missing_optional_lists_default_to_empty() {
        let json = r#"{
            "id": "resume_1",
            "personalInfo": {"name": "Ada", "email": "", "phone": "", "address": ""},
            "summary": "",
            "skills": ["Rust"],
            "experience": [],
            "education": [],
            "lastModified": "2024-01-01T00:00:00Z"
        }"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.personal_info.website, "");
        assert!(record.projects.is_empty());
        assert!(record.certifications.is_empty());
        assert_eq!(record.file_name, "");
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let mut record = ResumeRecord::empty("cv.txt");
        record.personal_info.name = "Ada Lovelace".to_string();
        record.skills = vec!["Rust".to_string(), "SQL".to_string()];
        record.projects.push(ProjectEntry {
            technologies: vec!["Go".to_string()],
            ..ProjectEntry::blank()
        });
        let text = serde_json::to_string(&record).unwrap();
        let back: ResumeRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_touched_moves_timestamp_forward() {
        let mut record = ResumeRecord::empty("");
        record.last_modified = DateTime::<Utc>::default();
        let record = record.touched();
        assert!(record.last_modified > DateTime::<Utc>::default());
    }

    #[test]
    fn test_with_ids_assigned_only_fills_blanks() {
        let mut record = ResumeRecord::default();
        record.experience.push(ExperienceEntry::default());
        record.education.push(EducationEntry {
            id: "edu_keep".to_string(),
            ..Default::default()
        });
        let record = record.with_ids_assigned();
        assert!(record.id.starts_with("resume_"));
        assert!(record.experience[0].id.starts_with("exp_"));
        assert_eq!(record.education[0].id, "edu_keep");
    }

    #[test]
    fn test_with_ids_assigned_replaces_repeated_ids() {
        let dup = ExperienceEntry {
            id: "exp_dup".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        };
        let mut record = ResumeRecord::default();
        record.experience = vec![dup.clone(), dup];
        record.certifications = vec![
            CertificationEntry {
                id: "cert_a".to_string(),
                ..Default::default()
            },
            CertificationEntry {
                id: "cert_a".to_string(),
                ..Default::default()
            },
            CertificationEntry {
                id: "cert_b".to_string(),
                ..Default::default()
            },
        ];

        let record = record.with_ids_assigned();
        assert_eq!(record.experience[0].id, "exp_dup");
        assert_ne!(record.experience[1].id, "exp_dup");
        assert!(record.experience[1].id.starts_with("exp_"));
        assert_eq!(record.experience[1].company, "Acme");
        assert_eq!(record.certifications[0].id, "cert_a");
        assert!(record.certifications[1].id.starts_with("cert_"));
        assert_ne!(record.certifications[1].id, "cert_a");
        assert_eq!(record.certifications[2].id, "cert_b");
    }
}
