//! # Key-Value Storage
//!
//! The only shared mutable resource the core touches. Two lifetimes exist:
//!
//! ```text
//! session scope     MemoryStore   cleared when the process exits
//! persistent scope  FileStore     ~/.villa/storage.json, survives restarts
//! ```
//!
//! Components receive a `&dyn KeyValueStore` (or an `Arc`) instead of reaching
//! for a global, so tests can hand them a double.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};

/// Errors surfaced by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// The host disabled storage (or the lock was poisoned).
    Unavailable,
    /// Reading or writing the backing file failed.
    Io(io::Error),
    /// The backing file exists but is not a JSON object of strings.
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Corrupt(msg) => write!(f, "storage file corrupt: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// ============================================================================
// Session scope
// ============================================================================

/// In-memory store. Lives as long as the process, which is the terminal
/// equivalent of a browser tab session.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// Persistent scope
// ============================================================================

/// File-backed store: a single JSON object of string values.
///
/// Every write rewrites the whole file via `.tmp` + `rename()`, so a crash
/// mid-write leaves the previous contents intact.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Opens `<dir>/storage.json`, creating `dir` if needed.
    pub fn in_dir(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir).map_err(StorageError::Io)?;
        Ok(Self::new(dir.join("storage.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let json = fs::read_to_string(&self.path).map_err(StorageError::Io)?;
        if json.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&json).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        fs::write(&tmp_path, json).map_err(StorageError::Io)?;
        fs::rename(&tmp_path, &self.path).map_err(StorageError::Io)?;
        debug!("Storage written: {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Unavailable)?;
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Corrupt(msg)) => {
                warn!("Discarding corrupt storage file {}: {}", self.path.display(), msg);
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Unavailable)?;
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
