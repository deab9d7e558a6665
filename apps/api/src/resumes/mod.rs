//! Saved résumés: the in-memory store plus its on-disk mirror.

pub mod edits;
pub mod handlers;
pub mod persistence;
pub mod store;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::suggestions::{apply_suggestions, SuggestionProvider};
use edits::{apply_edits, ResumeEdit};
use persistence::{PersistenceError, ResumePersistence};
use store::{ResumeStore, StoreError};

/// A stored record plus whether the disk write went through.
#[derive(Debug, Clone, Serialize)]
pub struct SavedResume {
    pub resume: ResumeRecord,
    pub persisted: bool,
}

/// Outcome of applying chosen suggestions to a stored record.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsApplied {
    pub resume: ResumeRecord,
    pub applied: Vec<String>,
    /// False only when a changed record could not be written to disk.
    pub persisted: bool,
}

/// Owns the store and persists after every successful mutation. The write
/// lock is held across the save so files land in mutation order.
pub struct ResumeService {
    store: RwLock<ResumeStore>,
    persistence: Arc<dyn ResumePersistence>,
}

impl ResumeService {
    pub fn new(store: ResumeStore, persistence: Arc<dyn ResumePersistence>) -> Self {
        Self {
            store: RwLock::new(store),
            persistence,
        }
    }

    /// Loads whatever the backend has saved and builds a service around it.
    pub async fn load(persistence: Arc<dyn ResumePersistence>) -> Result<Self, PersistenceError> {
        let records = persistence.load_all().await?;
        let store = ResumeStore::from_records(records);
        info!("Loaded {} saved resume(s)", store.len());
        Ok(Self::new(store, persistence))
    }

    pub async fn list(&self) -> Vec<ResumeRecord> {
        self.store.read().await.list().to_vec()
    }

    pub async fn get(&self, id: &str) -> Result<ResumeRecord, StoreError> {
        self.store
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub async fn add(&self, record: ResumeRecord) -> Result<SavedResume, StoreError> {
        let mut store = self.store.write().await;
        let resume = store.add(record.with_ids_assigned())?;
        let persisted = self.save(&resume).await;
        Ok(SavedResume { resume, persisted })
    }

    pub async fn update(&self, record: ResumeRecord) -> Result<SavedResume, StoreError> {
        let mut store = self.store.write().await;
        let resume = store.update(record.with_ids_assigned())?;
        let persisted = self.save(&resume).await;
        Ok(SavedResume { resume, persisted })
    }

    /// Applies an editor batch atomically against the current value.
    pub async fn edit(&self, id: &str, batch: &[ResumeEdit]) -> Result<SavedResume, EditFailure> {
        let mut store = self.store.write().await;
        let current = store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let next = apply_edits(current, batch)?;
        let resume = store.update(next)?;
        let persisted = self.save(&resume).await;
        Ok(SavedResume { resume, persisted })
    }

    /// Regenerates suggestions for the current value and applies the chosen
    /// ones. The write lock is held throughout so a concurrent edit is never
    /// overwritten by a stale copy.
    pub async fn apply_suggestions(
        &self,
        id: &str,
        suggester: &dyn SuggestionProvider,
        chosen: &[String],
    ) -> Result<SuggestionsApplied, AppError> {
        let mut store = self.store.write().await;
        let current = store
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let suggestions = suggester.suggest(&current).await?;
        let (next, applied) = apply_suggestions(&current, &suggestions, chosen);

        if applied.is_empty() {
            return Ok(SuggestionsApplied {
                resume: current,
                applied,
                persisted: true,
            });
        }

        let resume = store.update(next)?;
        let persisted = self.save(&resume).await;
        Ok(SuggestionsApplied {
            resume,
            applied,
            persisted,
        })
    }

    pub async fn remove(&self, id: &str) -> Result<SavedResume, StoreError> {
        let mut store = self.store.write().await;
        let resume = store.remove(id)?;
        let persisted = match self.persistence.delete(id).await {
            Ok(()) => true,
            Err(err) => {
                warn!(id, "Failed to delete saved resume: {err}");
                false
            }
        };
        Ok(SavedResume { resume, persisted })
    }

    async fn save(&self, record: &ResumeRecord) -> bool {
        match self.persistence.save(record).await {
            Ok(()) => true,
            Err(err) => {
                warn!(id = %record.id, "Failed to save resume: {err}");
                false
            }
        }
    }
}

/// Either half of an edit can fail: the lookup or the batch itself.
#[derive(Debug, thiserror::Error)]
pub enum EditFailure {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Edit(#[from] edits::EditError),
}
