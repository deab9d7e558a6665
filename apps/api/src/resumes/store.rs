//! In-memory résumé collection. Records are values: callers hand in a new
//! record and get back what was stored, never a mutable reference.

use thiserror::Error;

use crate::models::resume::ResumeRecord;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Resume {0} not found")]
    NotFound(String),

    #[error("Resume {0} already exists")]
    DuplicateId(String),

    #[error("Resume id '{0}' may only contain letters, digits, '_' and '-'")]
    InvalidId(String),
}

/// Ids double as file stems for the on-disk store.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// `id → record`, kept in insertion order.
#[derive(Debug, Default)]
pub struct ResumeStore {
    records: Vec<ResumeRecord>,
}

impl ResumeStore {
    /// Builds a store from previously saved records, dropping later duplicates.
    pub fn from_records(records: Vec<ResumeRecord>) -> Self {
        let mut store = Self::default();
        for record in records {
            if let Err(err) = store.add(record) {
                tracing::warn!("Skipping saved resume: {err}");
            }
        }
        store
    }

    pub fn add(&mut self, record: ResumeRecord) -> Result<ResumeRecord, StoreError> {
        if !is_valid_id(&record.id) {
            return Err(StoreError::InvalidId(record.id));
        }
        if self.position(&record.id).is_some() {
            return Err(StoreError::DuplicateId(record.id));
        }
        self.records.push(record.clone());
        Ok(record)
    }

    /// Replaces the record with the same id and stamps it as modified.
    pub fn update(&mut self, record: ResumeRecord) -> Result<ResumeRecord, StoreError> {
        let index = self
            .position(&record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;
        let record = record.touched();
        self.records[index] = record.clone();
        Ok(record)
    }

    pub fn remove(&mut self, id: &str) -> Result<ResumeRecord, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.records.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&ResumeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn list(&self) -> &[ResumeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}
