//! Durable key-value stores for session data
//!
//! A [`SessionStore`] plays the role of browser local storage: a small
//! string-to-string map that survives restarts. Multi-key writes and removals
//! are applied as one unit.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur in a session store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file is not a JSON string map
    #[error("Corrupt session file {path:?}: {error}")]
    Corrupt { path: PathBuf, error: String },

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Lock poisoned by a panicking writer
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable string key-value storage
pub trait SessionStore: Send + Sync {
    /// Read a single key
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write several keys in one step
    fn set_items(&self, items: &[(&str, &str)]) -> StoreResult<()>;

    /// Remove several keys in one step; missing keys are ignored
    fn remove_items(&self, keys: &[&str]) -> StoreResult<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set_items(&self, items: &[(&str, &str)]) -> StoreResult<()> {
        (**self).set_items(items)
    }

    fn remove_items(&self, keys: &[&str]) -> StoreResult<()> {
        (**self).remove_items(keys)
    }
}

/// Session store backed by a JSON file
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

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_map(&self) -> StoreResult<BTreeMap<String, String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            error: e.to_string(),
        })
    }

    /// Write the map to a sibling temp file, then rename it into place
    fn write_map(&self, map: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let raw = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = ?self.path, keys = map.len(), "Session file written");
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> StoreResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        // A corrupt file is replaced rather than blocking every later write
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StoreError::Corrupt { path, error }) => {
                tracing::warn!(?path, %error, "Discarding corrupt session file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };

        f(&mut map);
        self.write_map(&map)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(self.read_map()?.remove(key))
    }

    fn set_items(&self, items: &[(&str, &str)]) -> StoreResult<()> {
        self.update(|map| {
            for (key, value) in items {
                map.insert(key.to_string(), value.to_string());
            }
        })
    }

    fn remove_items(&self, keys: &[&str]) -> StoreResult<()> {
        self.update(|map| {
            for key in keys {
                map.remove(*key);
            }
        })
    }
}

/// Process-local session store
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_items(&self, items: &[(&str, &str)]) -> StoreResult<()> {
        let mut stored = self
            .items
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        for (key, value) in items {
            stored.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> StoreResult<()> {
        let mut stored = self
            .items
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        for key in keys {
            stored.remove(*key);
        }
        Ok(())
    }
}
