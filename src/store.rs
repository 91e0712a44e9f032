//! Durable review index: per-file review records and per-function history
//!
//! The index owns two maps — the current review set per file and an
//! append-only history log per function name — and persists both to a
//! single JSON file, rewritten in full after every mutation. Single-writer:
//! the design assumes one process mutating one store file.

use crate::error::StoreError;
use crate::types::ReviewRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk shape of the review store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    reviews: HashMap<String, Vec<ReviewRecord>>,
    #[serde(default)]
    history: HashMap<String, Vec<String>>,
}

/// Borrowing view for serialization, so flushing never clones the maps
#[derive(Serialize)]
struct StoreFileRef<'a> {
    reviews: &'a HashMap<String, Vec<ReviewRecord>>,
    history: &'a HashMap<String, Vec<String>>,
}

/// In-memory review index with synchronous full-file persistence
#[derive(Debug)]
pub struct ReviewIndex {
    path: PathBuf,
    reviews: HashMap<String, Vec<ReviewRecord>>,
    history: HashMap<String, Vec<String>>,
}

impl ReviewIndex {
    /// Open an index backed by `path`, loading any persisted state
    ///
    /// A missing, unreadable, or malformed store file leaves the index
    /// empty; startup is never blocked on persistence.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (reviews, history) = match Self::load(&path) {
            Ok(store) => {
                tracing::debug!(
                    "Loaded review store with {} files and {} function histories",
                    store.reviews.len(),
                    store.history.len()
                );
                (store.reviews, store.history)
            }
            Err(err) => {
                tracing::warn!("Failed to load review store, starting empty: {err}");
                (HashMap::new(), HashMap::new())
            }
        };
        Self {
            path,
            reviews,
            history,
        }
    }

    fn load(path: &Path) -> Result<StoreFile, StoreError> {
        if !path.exists() {
            tracing::debug!("Review store not found at {:?}, starting empty", path);
            return Ok(StoreFile::default());
        }

        let content = fs::read_to_string(path).map_err(|err| StoreError::LoadFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|err| StoreError::ParseFailed(err.to_string()))
    }

    /// Replace the review list for `file_path` wholesale and append each
    /// record's `"{stars} {review}"` line to its function's history, then
    /// persist
    pub fn set_reviews(&mut self, file_path: &str, records: Vec<ReviewRecord>) {
        for record in &records {
            self.history
                .entry(record.function.clone())
                .or_default()
                .push(format!("{} {}", record.stars, record.review));
        }
        self.reviews.insert(file_path.to_string(), records);
        self.flush();
    }

    /// Current review list for a file, in generation order
    pub fn get_reviews(&self, file_path: &str) -> &[ReviewRecord] {
        self.reviews
            .get(file_path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Remove a file's review entry entirely; history is untouched
    pub fn clear_reviews(&mut self, file_path: &str) {
        if self.reviews.remove(file_path).is_some() {
            self.flush();
        }
    }

    /// History for a function name, oldest first
    ///
    /// Keyed purely by name: a renamed or moved function's history
    /// transfers only if the name is unchanged.
    pub fn history(&self, function_name: &str) -> &[String] {
        self.history
            .get(function_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Path of the backing store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize both maps in full
    ///
    /// A write failure is logged, not raised; the in-memory index stays
    /// authoritative for the session and a later successful flush
    /// overwrites whatever is on disk.
    fn flush(&self) {
        if let Err(err) = self.save() {
            tracing::warn!("Failed to persist review store: {err}");
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::SaveFailed {
                path: self.path.display().to_string(),
                reason: err.to_string(),
            })?;
        }

        let store = StoreFileRef {
            reviews: &self.reviews,
            history: &self.history,
        };
        let content = serde_json::to_string_pretty(&store)
            .map_err(|err| StoreError::ParseFailed(err.to_string()))?;

        fs::write(&self.path, content).map_err(|err| StoreError::SaveFailed {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        })?;

        tracing::debug!("Saved review store to {:?}", self.path);
        Ok(())
    }
}
