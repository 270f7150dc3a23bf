//! Runtime settings for locale resolution and dictionary loading.

use crate::{Locale, UrlLayout};
use serde::{Deserialize, Serialize};

/// Key under which the chosen locale is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "beehive_lang";

/// Dictionary resource pattern, relative to the site base.
pub const DEFAULT_DICTIONARY_PATH: &str = "data/{locale}.json";

/// Placeholder substituted with the locale code.
pub const LOCALE_PLACEHOLDER: &str = "{locale}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    pub storage_key: String,
    pub dictionary_path: String,
    /// Base URL for the HTTP dictionary source.
    pub base_url: Option<String>,
    pub url_layout: UrlLayout,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            dictionary_path: DEFAULT_DICTIONARY_PATH.to_string(),
            base_url: None,
            url_layout: UrlLayout::default(),
        }
    }
}

impl I18nConfig {
    pub fn with_layout(mut self, layout: UrlLayout) -> Self {
        self.url_layout = layout;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Relative resource path for `locale` (`data/ar.json`).
    pub fn dictionary_path_for(&self, locale: Locale) -> String {
        resource_path(&self.dictionary_path, locale)
    }
}

/// Substitute the locale into a path pattern, dropping a leading `./` or `/`.
pub(crate) fn resource_path(pattern: &str, locale: Locale) -> String {
    let pattern = pattern.trim_start_matches("./").trim_start_matches('/');
    pattern.replace(LOCALE_PLACEHOLDER, locale.code())
}
