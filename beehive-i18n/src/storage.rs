//! Persisted locale preference.
//!
//! Failures here are never fatal: callers log and carry on.

use crate::{I18nError, Result};
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Single-value key/value storage (the browser's local storage).
pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn store(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store. A disabled store fails every access.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    disabled: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects all reads and writes.
    pub fn disabled() -> Self {
        Self {
            values: RwLock::default(),
            disabled: true,
        }
    }

    /// Store pre-seeded with one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.values.write().insert(key.to_string(), value.to_string());
        store
    }

    fn check(&self) -> Result<()> {
        if self.disabled {
            return Err(I18nError::StorageAccess("storage is disabled".to_string()));
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.values.read().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object file on disk. A missing file reads as empty.
///
/// Reads and writes are blocking `std::fs` calls on the calling thread, so
/// inside the async `I18n::set_active_locale` each switch blocks the executor
/// for one read and one write of a small file. Keep the file on local disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(I18nError::StorageAccess(e.to_string())),
        };

        match serde_json::from_str(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(I18nError::StorageAccess(format!(
                "{} does not hold an object",
                self.path.display()
            ))),
            Err(e) => Err(I18nError::StorageAccess(e.to_string())),
        }
    }
}

impl PreferenceStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), Value::String(value.to_string()));

        let raw = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| I18nError::StorageAccess(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| I18nError::StorageAccess(e.to_string()))
    }
}
