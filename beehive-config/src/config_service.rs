// ConfigService - high-level configuration service

use crate::{ConfigManager, FileFormat, Result, Validate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// High-level configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    manager: ConfigManager,
}

impl ConfigService {
    /// Create an empty configuration service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an existing manager
    pub fn from_manager(manager: ConfigManager) -> Self {
        Self { manager }
    }

    /// Builder for creating a layered service
    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::new()
    }

    /// Get a value at a dotted path
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.manager.get(path)
    }

    /// Get a value with default
    pub fn get_or<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        self.manager.get_or(path, default)
    }

    /// Check if a path exists
    pub fn has(&self, path: &str) -> bool {
        self.manager.has(path)
    }

    /// Deserialize and validate the whole tree as `T`
    pub fn load<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        self.manager.load_validated()
    }

    /// Get underlying manager
    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }
}

/// Builder for [`ConfigService`].
///
/// Layers apply in this order: defaults, files (in the order added),
/// `.env`, then the process environment.
pub struct ConfigServiceBuilder {
    manager: ConfigManager,
    defaults: Option<serde_json::Value>,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<PathBuf>,
    config_files: Vec<(PathBuf, FileFormat, bool)>,
}

impl ConfigServiceBuilder {
    pub fn new() -> Self {
        Self {
            manager: ConfigManager::new(),
            defaults: None,
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            config_files: Vec::new(),
        }
    }

    /// Set environment variable prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.manager = ConfigManager::with_prefix(prefix);
        self
    }

    /// Seed with serialized defaults
    pub fn with_defaults<T: Serialize>(mut self, defaults: &T) -> Result<Self> {
        let value = serde_json::to_value(defaults)
            .map_err(|e| crate::ConfigError::SerializationError(e.to_string()))?;
        self.defaults = Some(value);
        Ok(self)
    }

    /// Enable loading from environment variables
    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Enable loading from a .env file
    pub fn load_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path;
        self
    }

    /// Add a configuration file that must exist
    pub fn add_file(mut self, path: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.config_files.push((path.into(), format, true));
        self
    }

    /// Add a configuration file that is skipped when missing
    pub fn add_optional_file(mut self, path: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.config_files.push((path.into(), format, false));
        self
    }

    /// Build the configuration service
    pub fn build(self) -> Result<ConfigService> {
        if let Some(defaults) = self.defaults {
            self.manager.merge_value(defaults);
        }

        for (path, format, required) in self.config_files {
            if !required && !path.exists() {
                continue;
            }
            self.manager.load_file(&path, format)?;
        }

        if self.load_dotenv {
            // A missing .env is not an error
            let _ = self.manager.load_dotenv(self.dotenv_path.as_deref());
        }

        if self.load_env {
            self.manager.load_env()?;
        }

        Ok(ConfigService::from_manager(self.manager))
    }
}

impl Default for ConfigServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_defaults_then_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"page": {{"hero_interval_ms": 3000}}}}"#).unwrap();

        let service = ConfigService::builder()
            .with_defaults(&json!({"page": {"hero_interval_ms": 5500, "nav_offset": 120}}))
            .unwrap()
            .add_file(file.path(), FileFormat::Json)
            .build()
            .unwrap();

        assert_eq!(service.get::<u64>("page.hero_interval_ms").unwrap(), 3000);
        assert_eq!(service.get::<u64>("page.nav_offset").unwrap(), 120);
    }

    #[test]
    fn test_missing_optional_file_is_skipped() {
        let service = ConfigService::builder()
            .add_optional_file("/definitely/not/here.toml", FileFormat::Toml)
            .build()
            .unwrap();
        assert!(!service.has("page"));
    }

    #[test]
    fn test_missing_required_file_fails() {
        let result = ConfigService::builder()
            .add_file("/definitely/not/here.toml", FileFormat::Toml)
            .build();
        assert!(result.is_err());
    }
}
