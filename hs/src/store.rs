//! Core HistoryLog implementation

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A value that can be kept in a history log
///
/// `prepare_for_storage` runs on every record before it is appended, so a
/// record type can drop fields that should never be persisted.
pub trait Record: Serialize + DeserializeOwned + Clone {
    fn prepare_for_storage(&mut self) {}
}

impl Record for serde_json::Value {}

/// One stored entry: generated id, append time, and the record itself
///
/// The record's fields are flattened next to `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry<T> {
    /// Unique entry ID
    pub id: String,
    /// Append timestamp (unix ms)
    pub timestamp: i64,
    #[serde(flatten)]
    pub record: T,
}

/// Errors from the underlying file
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Bounded, newest-first history log backed by one JSON file
#[derive(Debug, Clone)]
pub struct HistoryLog<T> {
    path: PathBuf,
    capacity: usize,
    _record: PhantomData<T>,
}

impl<T: Record> HistoryLog<T> {
    /// Open or create a history log in `dir`, stored as `dir/file_name`
    ///
    /// Only the directory is created here; the file appears on first append.
    pub fn open(dir: impl AsRef<Path>, file_name: &str) -> Result<Self, HistoryError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        debug!(?path, "Opened history log");
        Ok(Self {
            path,
            capacity: crate::DEFAULT_CAPACITY,
            _record: PhantomData,
        })
    }

    /// Override the number of retained entries (minimum 1)
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All entries, newest first
    ///
    /// A missing file is an empty log. An unreadable or corrupt file is
    /// logged and also reads as empty.
    pub fn list(&self) -> Vec<HistoryEntry<T>> {
        match self.read() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read history, treating as empty");
                Vec::new()
            }
        }
    }

    /// Look up a single entry by id
    pub fn get(&self, id: &str) -> Option<HistoryEntry<T>> {
        self.list().into_iter().find(|entry| entry.id == id)
    }

    /// Prepend a record and truncate to capacity
    ///
    /// Returns the updated log. The returned view reflects the update even
    /// when writing it to disk failed.
    pub fn append(&self, mut record: T) -> Vec<HistoryEntry<T>> {
        record.prepare_for_storage();
        let entry = HistoryEntry {
            id: Uuid::now_v7().to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            record,
        };
        debug!(id = %entry.id, "append: called");

        let mut entries = Vec::with_capacity(self.capacity);
        entries.push(entry);
        entries.extend(self.list());
        entries.truncate(self.capacity);

        if let Err(e) = self.write(&entries) {
            warn!(path = %self.path.display(), error = %e, "Failed to save history");
        }
        entries
    }

    /// Remove every entry
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "Cleared history"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to clear history"),
        }
    }

    fn read(&self) -> Result<Vec<HistoryEntry<T>>, HistoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, entries: &[HistoryEntry<T>]) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
