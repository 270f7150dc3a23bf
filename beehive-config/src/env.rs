// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::BTreeMap;
use std::env;

/// Separator that nests an environment key: `BEEHIVE_I18N__STORAGE_KEY`
/// becomes the config path `i18n.storage_key`.
pub const NESTING_SEPARATOR: &str = "__";

/// Environment variable loader
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load every matching variable as `(dotted_path, raw_value)`.
    ///
    /// With a prefix only `PREFIX_*` variables are taken and the prefix is
    /// stripped. Keys are lower-cased.
    pub fn load(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.collect(env::vars()))
    }

    fn collect(&self, vars: impl Iterator<Item = (String, String)>) -> BTreeMap<String, String> {
        let mut config = BTreeMap::new();

        for (key, value) in vars {
            let bare = match self.prefix {
                Some(ref prefix) => match key.strip_prefix(prefix.as_str()) {
                    Some(rest) if rest.starts_with('_') => rest.trim_start_matches('_'),
                    _ => continue,
                },
                None => key.as_str(),
            };

            if bare.is_empty() {
                continue;
            }

            config.insert(Self::to_path(bare), value);
        }

        config
    }

    /// `I18N__URL_LAYOUT__MODE` -> `i18n.url_layout.mode`
    pub fn to_path(key: &str) -> String {
        key.split(NESTING_SEPARATOR)
            .map(|part| part.to_lowercase())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        };

        env::var(&full_key).map_err(ConfigError::EnvError)
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
