//! Saving résumés to disk.
//!
//! Persistence is best-effort: the in-memory store stays authoritative and a
//! failed write is reported to the caller instead of rolling anything back.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::ResumeRecord;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize resume {id}: {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Storage backend for saved résumés. Carried by `ResumeService` as
/// `Arc<dyn ResumePersistence>`.
#[async_trait]
pub trait ResumePersistence: Send + Sync {
    async fn save(&self, record: &ResumeRecord) -> Result<(), PersistenceError>;

    /// Removing a record that was never saved is not an error.
    async fn delete(&self, id: &str) -> Result<(), PersistenceError>;

    /// All readable records, oldest modification first.
    async fn load_all(&self) -> Result<Vec<ResumeRecord>, PersistenceError>;
}

// ────────────────────────────────────────────────────────────────────────────
// JsonDirPersistence
// ────────────────────────────────────────────────────────────────────────────

/// One pretty-printed `<id>.json` file per record inside `dir`.
#[derive(Debug, Clone)]
pub struct JsonDirPersistence {
    dir: PathBuf,
}

impl JsonDirPersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the storage directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), PersistenceError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| io_error(&self.dir, source))
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl ResumePersistence for JsonDirPersistence {
    async fn save(&self, record: &ResumeRecord) -> Result<(), PersistenceError> {
        let body =
            serde_json::to_vec_pretty(record).map_err(|source| PersistenceError::Serialize {
                id: record.id.clone(),
                source,
            })?;

        self.ensure_dir().await?;

        // Write to a sibling file first so a crash never leaves half a record.
        let path = self.path_for(&record.id);
        let tmp = self.dir.join(format!(".{}.json.tmp", record.id));
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|source| io_error(&tmp, source))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| io_error(&path, source))?;

        debug!(id = %record.id, path = %path.display(), "resume saved");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(io_error(&path, source)),
        }
    }

    async fn load_all(&self) -> Result<Vec<ResumeRecord>, PersistenceError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(io_error(&self.dir, source)),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| io_error(&self.dir, source))?
        {
            let path = entry.path();
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            let is_hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            if !is_json || is_hidden {
                continue;
            }

            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(path = %path.display(), "Skipping unreadable resume file: {err}");
                    continue;
                }
            };
            match serde_json::from_slice::<ResumeRecord>(&bytes) {
                Ok(record) if record.id.trim().is_empty() => {
                    warn!(path = %path.display(), "Skipping resume file without an id");
                }
                Ok(record) => records.push(record.with_ids_assigned()),
                Err(err) => {
                    warn!(path = %path.display(), "Skipping malformed resume file: {err}");
                }
            }
        }

        records.sort_by(|a, b| {
            a.last_modified
                .cmp(&b.last_modified)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(records)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}
