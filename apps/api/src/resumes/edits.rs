//! Editor operations sent by the client as a batch in `PATCH /resumes/:id`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeRecord,
};

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("{section} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        section: &'static str,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalInfoField {
    Name,
    Email,
    Phone,
    Address,
    Linkedin,
    Website,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Company,
    Position,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    Institution,
    Degree,
    StartDate,
    EndDate,
    Gpa,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectField {
    Name,
    Description,
    /// Comma-separated; stored as a list.
    Technologies,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CertificationField {
    Name,
    Issuer,
    Date,
}

/// A single editor operation, e.g. `{"op": "update_experience", "index": 0,
/// "field": "startDate", "value": "2020-01-01"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ResumeEdit {
    SetPersonalInfo {
        field: PersonalInfoField,
        value: String,
    },
    SetSummary {
        value: String,
    },
    /// Comma-separated skill list.
    SetSkills {
        value: String,
    },
    AddExperience,
    UpdateExperience {
        index: usize,
        field: ExperienceField,
        value: String,
    },
    RemoveExperience {
        index: usize,
    },
    AddEducation,
    UpdateEducation {
        index: usize,
        field: EducationField,
        value: String,
    },
    RemoveEducation {
        index: usize,
    },
    AddProject,
    UpdateProject {
        index: usize,
        field: ProjectField,
        value: String,
    },
    RemoveProject {
        index: usize,
    },
    AddCertification,
    UpdateCertification {
        index: usize,
        field: CertificationField,
        value: String,
    },
    RemoveCertification {
        index: usize,
    },
}

/// Applies `edits` in order to a copy of `record`. Either every edit applies
/// or the original is left as it was.
pub fn apply_edits(record: &ResumeRecord, edits: &[ResumeEdit]) -> Result<ResumeRecord, EditError> {
    let mut next = record.clone();
    for edit in edits {
        apply_edit(&mut next, edit.clone())?;
    }
    Ok(next.touched())
}

fn apply_edit(record: &mut ResumeRecord, edit: ResumeEdit) -> Result<(), EditError> {
    match edit {
        ResumeEdit::SetPersonalInfo { field, value } => {
            set_personal_info(&mut record.personal_info, field, value);
        }
        ResumeEdit::SetSummary { value } => record.summary = value,
        ResumeEdit::SetSkills { value } => record.skills = split_csv(&value),

        ResumeEdit::AddExperience => record.experience.push(ExperienceEntry::blank()),
        ResumeEdit::UpdateExperience {
            index,
            field,
            value,
        } => {
            let entry = entry_mut(&mut record.experience, "experience", index)?;
            match field {
                ExperienceField::Company => entry.company = value,
                ExperienceField::Position => entry.position = value,
                ExperienceField::StartDate => entry.start_date = value,
                ExperienceField::EndDate => entry.end_date = value,
                ExperienceField::Description => entry.description = value,
            }
        }
        ResumeEdit::RemoveExperience { index } => {
            remove_entry(&mut record.experience, "experience", index)?;
        }

        ResumeEdit::AddEducation => record.education.push(EducationEntry::blank()),
        ResumeEdit::UpdateEducation {
            index,
            field,
            value,
        } => {
            let entry = entry_mut(&mut record.education, "education", index)?;
            match field {
                EducationField::Institution => entry.institution = value,
                EducationField::Degree => entry.degree = value,
                EducationField::StartDate => entry.start_date = value,
                EducationField::EndDate => entry.end_date = value,
                EducationField::Gpa => entry.gpa = value,
            }
        }
        ResumeEdit::RemoveEducation { index } => {
            remove_entry(&mut record.education, "education", index)?;
        }

        ResumeEdit::AddProject => record.projects.push(ProjectEntry::blank()),
        ResumeEdit::UpdateProject {
            index,
            field,
            value,
        } => {
            let entry = entry_mut(&mut record.projects, "projects", index)?;
            match field {
                ProjectField::Name => entry.name = value,
                ProjectField::Description => entry.description = value,
                ProjectField::Technologies => entry.technologies = split_csv(&value),
                ProjectField::Link => entry.link = value,
            }
        }
        ResumeEdit::RemoveProject { index } => {
            remove_entry(&mut record.projects, "projects", index)?;
        }

        ResumeEdit::AddCertification => record.certifications.push(CertificationEntry::blank()),
        ResumeEdit::UpdateCertification {
            index,
            field,
            value,
        } => {
            let entry = entry_mut(&mut record.certifications, "certifications", index)?;
            match field {
                CertificationField::Name => entry.name = value,
                CertificationField::Issuer => entry.issuer = value,
                CertificationField::Date => entry.date = value,
            }
        }
        ResumeEdit::RemoveCertification { index } => {
            remove_entry(&mut record.certifications, "certifications", index)?;
        }
    }
    Ok(())
}

fn set_personal_info(info: &mut PersonalInfo, field: PersonalInfoField, value: String) {
    match field {
        PersonalInfoField::Name => info.name = value,
        PersonalInfoField::Email => info.email = value,
        PersonalInfoField::Phone => info.phone = value,
        PersonalInfoField::Address => info.address = value,
        PersonalInfoField::Linkedin => info.linkedin = value,
        PersonalInfoField::Website => info.website = value,
    }
}

fn entry_mut<'a, T>(
    list: &'a mut [T],
    section: &'static str,
    index: usize,
) -> Result<&'a mut T, EditError> {
    let len = list.len();
    list.get_mut(index).ok_or(EditError::IndexOutOfRange {
        section,
        index,
        len,
    })
}

fn remove_entry<T>(list: &mut Vec<T>, section: &'static str, index: usize) -> Result<T, EditError> {
    if index >= list.len() {
        return Err(EditError::IndexOutOfRange {
            section,
            index,
            len: list.len(),
        });
    }
    Ok(list.remove(index))
}

/// `"Rust, , Go "` → `["Rust", "Go"]`.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
