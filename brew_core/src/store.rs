//! Persisted cup-log text with file locking.
//!
//! The entire log is one opaque text value under a fixed storage key. The
//! store is injected into callers rather than read as ambient global state,
//! so tests substitute [`MemoryStore`] for the file-backed default.
//!
//! Reads degrade to the empty-log literal on missing or unreadable files;
//! writes go through a locked temp file that is atomically renamed over the
//! target.

use crate::{Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Fixed storage identifier for the daily cup log
pub const STORAGE_KEY: &str = "daily_cup_timestamps";

/// The stored text for a log with no cups
pub const EMPTY_LOG: &str = "[]";

/// Key-value storage for the persisted cup-log text
pub trait CupStore {
    /// Current stored text. Implementations degrade to [`EMPTY_LOG`] rather
    /// than failing; a missing value reads as an empty log.
    fn get(&self) -> String;

    /// Replace the stored text.
    fn set(&mut self, raw: &str) -> Result<()>;
}

/// File-backed store holding the log text at `<data_dir>/daily_cup_timestamps.json`
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CupStore for FileStore {
    fn get(&self) -> String {
        if !self.path.exists() {
            tracing::debug!("No cup log at {:?}, reading as empty", self.path);
            return EMPTY_LOG.into();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open cup log {:?}: {}. Reading as empty.",
                    self.path,
                    e
                );
                return EMPTY_LOG.into();
            }
        };

        // Shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock cup log {:?}: {}. Reading as empty.",
                self.path,
                e
            );
            return EMPTY_LOG.into();
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read cup log {:?}: {}. Reading as empty.",
                self.path,
                e
            );
            return EMPTY_LOG.into();
        }

        let _ = file.unlock();
        contents
    }

    /// Atomically replaces the stored text by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn set(&mut self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "cup log path missing parent")
        })?)?;

        // Exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(raw.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved cup log to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store for tests and previews
#[derive(Clone, Debug)]
pub struct MemoryStore {
    raw: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            raw: EMPTY_LOG.into(),
        }
    }

    /// A store seeded with existing text
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CupStore for MemoryStore {
    fn get(&self) -> String {
        self.raw.clone()
    }

    fn set(&mut self, raw: &str) -> Result<()> {
        self.raw = raw.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert_eq!(store.get(), EMPTY_LOG);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("[1715000000.0]").unwrap();
        assert_eq!(store.get(), "[1715000000.0]");
    }

    #[test]
    fn test_set_creates_data_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("nested/dir"));

        store.set(EMPTY_LOG).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_set_leaves_no_stray_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("[1.0]").unwrap();
        store.set("[1.0,2.0]").unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "daily_cup_timestamps.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only the cup log, found extras: {:?}",
            extras
        );
    }

    #[test]
    fn test_memory_store_defaults_to_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.get(), EMPTY_LOG);
    }

    #[test]
    fn test_memory_store_set_get() {
        let mut store = MemoryStore::new();
        store.set("[42.5]").unwrap();
        assert_eq!(store.get(), "[42.5]");
    }
}
