// Layered configuration for the Beehive site runtime

pub mod config_service;
pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use config_service::{ConfigService, ConfigServiceBuilder};
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Configuration tree with dotted-path access.
///
/// Later layers override earlier ones key by key; objects are merged
/// recursively, everything else is replaced.
///
/// Environment values take the type of the value they replace. Values with
/// nothing typed underneath stay strings and are decoded as JSON scalars only
/// if the target type rejects the string.
#[derive(Clone, Default)]
pub struct ConfigManager {
    root: Arc<RwLock<Map<String, Value>>>,
    env_prefix: Option<String>,
    untyped: Arc<RwLock<HashSet<String>>>,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            env_prefix: Some(prefix.into()),
            ..Self::default()
        }
    }

    /// Seed the tree from a serializable defaults value
    pub fn load_defaults<T: Serialize>(&self, defaults: &T) -> Result<()> {
        let value = serde_json::to_value(defaults)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        self.merge_value(value);
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        self.apply_env(loader.load()?);
        Ok(())
    }

    /// Layer already collected `(dotted path, raw value)` pairs.
    pub(crate) fn apply_env(&self, vars: impl IntoIterator<Item = (String, String)>) {
        let mut root = self.root.write();
        let mut untyped = self.untyped.write();
        for (path, raw) in vars {
            let value = match lookup_in(&root, &path) {
                Some(Value::Bool(_) | Value::Number(_) | Value::Array(_)) => {
                    untyped.remove(&path);
                    scalar_from_str(&raw)
                }
                Some(Value::String(_)) => {
                    untyped.remove(&path);
                    Value::String(raw)
                }
                _ => {
                    untyped.insert(path.clone());
                    Value::String(raw)
                }
            };
            insert_path(&mut root, &path, value);
        }
    }

    /// Load a .env file into the process environment, then the environment
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path)
                    .map_err(|e| ConfigError::load(path.display().to_string(), e))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        self.load_env()
    }

    /// Load configuration from file
    pub fn load_file(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let data = ConfigLoader::new(format).load_file(path)?;
        self.merge_value(data);
        Ok(())
    }

    /// Deep-merge a value into the tree
    pub fn merge_value(&self, value: Value) {
        if let Value::Object(map) = value {
            let mut root = self.root.write();
            merge_maps(&mut root, map);
        }
    }

    /// Set a value at a dotted path
    pub fn set<T: Serialize>(&self, path: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        insert_path(&mut self.root.write(), path, json_value);
        self.untyped.write().remove(path);
        Ok(())
    }

    /// Get a value at a dotted path
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self
            .lookup(path)
            .ok_or_else(|| ConfigError::KeyNotFound(path.to_string()))?;

        let retry = match &value {
            Value::String(raw) => Some(scalar_from_str(raw)),
            _ => None,
        };
        serde_json::from_value(value).or_else(|e| {
            retry
                .and_then(|decoded| serde_json::from_value(decoded).ok())
                .ok_or_else(|| ConfigError::DeserializationError {
                    key: path.to_string(),
                    message: e.to_string(),
                })
        })
    }

    /// Get a value with default
    pub fn get_or<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        self.get(path).unwrap_or(default)
    }

    /// Check if a path exists
    pub fn has(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// Top-level keys
    pub fn keys(&self) -> Vec<String> {
        self.root.read().keys().cloned().collect()
    }

    /// Merge another manager's tree into this one
    pub fn merge(&self, other: &ConfigManager) {
        let snapshot = other.root.read().clone();
        merge_maps(&mut self.root.write(), snapshot);
    }

    /// Deserialize the whole tree and validate it
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let tree = self.root.read().clone();

        let config: T = match serde_json::from_value(Value::Object(tree.clone())) {
            Ok(config) => config,
            Err(e) => self
                .decode_untyped(tree)
                .and_then(|decoded| serde_json::from_value(Value::Object(decoded)).ok())
                .ok_or_else(|| ConfigError::DeserializationError {
                    key: "<root>".to_string(),
                    message: e.to_string(),
                })?,
        };

        config.validate()?;

        Ok(config)
    }

    fn lookup(&self, path: &str) -> Option<Value> {
        lookup_in(&self.root.read(), path).cloned()
    }

    /// `tree` with every untyped environment string decoded, or `None` when
    /// there is nothing to decode.
    fn decode_untyped(&self, mut tree: Map<String, Value>) -> Option<Map<String, Value>> {
        let untyped = self.untyped.read();
        let mut changed = false;
        for path in untyped.iter() {
            let decoded = match lookup_in(&tree, path) {
                Some(Value::String(raw)) => scalar_from_str(raw),
                _ => continue,
            };
            if !decoded.is_string() {
                insert_path(&mut tree, path, decoded);
                changed = true;
            }
        }
        changed.then_some(tree)
    }
}

fn lookup_in<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = root.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Insert `value` at a dotted path, creating intermediate objects.
pub(crate) fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut parts: Vec<&str> = path.split('.').filter(|p| !p.is_empty()).collect();
    let Some(last) = parts.pop() else {
        return;
    };

    let mut current = root;
    for part in parts {
        let entry = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = match entry {
            Value::Object(map) => map,
            _ => return,
        };
    }

    current.insert(last.to_string(), value);
}

/// Decode a raw environment string as a JSON scalar or array. Anything else
/// stays a string.
pub(crate) fn scalar_from_str(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Null)) => value,
        _ => Value::String(raw.to_string()),
    }
}

fn merge_maps(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_maps(existing, incoming);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}
