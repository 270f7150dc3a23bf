//! Where dictionaries come from.

use crate::config::resource_path;
use crate::{Dictionary, I18nError, Locale, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Fetches the raw dictionary for a locale. One call is one fetch; caching
/// is the loader's job.
#[async_trait]
pub trait DictionarySource: Send + Sync {
    async fn fetch(&self, locale: Locale) -> Result<Dictionary>;

    /// Human-readable resource name for diagnostics.
    fn describe(&self, locale: Locale) -> String;
}

fn parse(locale: Locale, raw: &str) -> Result<Dictionary> {
    Dictionary::from_json(raw).map_err(|source| I18nError::DictionaryParse { locale, source })
}

/// Dictionaries held in memory.
#[derive(Debug, Default, Clone)]
pub struct StaticDictionarySource {
    entries: HashMap<Locale, Value>,
}

impl StaticDictionarySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locale: Locale, dictionary: Value) -> Self {
        self.entries.insert(locale, dictionary);
        self
    }
}

#[async_trait]
impl DictionarySource for StaticDictionarySource {
    async fn fetch(&self, locale: Locale) -> Result<Dictionary> {
        self.entries
            .get(&locale)
            .cloned()
            .map(Dictionary::new)
            .ok_or_else(|| I18nError::DictionaryLoad {
                locale,
                resource: self.describe(locale),
                status: Some(404),
                reason: "no dictionary registered".to_string(),
            })
    }

    fn describe(&self, locale: Locale) -> String {
        format!("memory:{}", locale)
    }
}

/// Dictionaries read from a directory (`{dir}/{locale}.json` by default).
#[derive(Debug, Clone)]
pub struct FsDictionarySource {
    dir: PathBuf,
    pattern: String,
}

impl FsDictionarySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pattern: "{locale}.json".to_string(),
        }
    }

    /// Use a pattern relative to the directory (`data/{locale}.json`).
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    fn path_for(&self, locale: Locale) -> PathBuf {
        self.dir.join(resource_path(&self.pattern, locale))
    }
}

#[async_trait]
impl DictionarySource for FsDictionarySource {
    async fn fetch(&self, locale: Locale) -> Result<Dictionary> {
        let path = self.path_for(locale);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| I18nError::DictionaryLoad {
                locale,
                resource: path.display().to_string(),
                status: (e.kind() == ErrorKind::NotFound).then_some(404),
                reason: e.to_string(),
            })?;

        parse(locale, &raw)
    }

    fn describe(&self, locale: Locale) -> String {
        self.path_for(locale).display().to_string()
    }
}

/// Dictionaries fetched over HTTP, bypassing intermediary caches.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpDictionarySource {
    client: reqwest::Client,
    base: url::Url,
    pattern: String,
}

#[cfg(feature = "http")]
impl HttpDictionarySource {
    /// `base_url` is the site root; dictionaries resolve under it.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = url::Url::parse(&base)
            .map_err(|e| I18nError::Config(format!("invalid base URL {}: {}", base_url, e)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base,
            pattern: crate::DEFAULT_DICTIONARY_PATH.to_string(),
        })
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Send every fetch through `client`, with its timeouts and default headers.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn url_for(&self, locale: Locale) -> Result<url::Url> {
        self.base
            .join(&resource_path(&self.pattern, locale))
            .map_err(|e| I18nError::Config(e.to_string()))
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl DictionarySource for HttpDictionarySource {
    async fn fetch(&self, locale: Locale) -> Result<Dictionary> {
        let url = self.url_for(locale)?;
        let load_error = |status: Option<u16>, reason: String| I18nError::DictionaryLoad {
            locale,
            resource: url.to_string(),
            status,
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| load_error(None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(load_error(
                Some(status.as_u16()),
                format!("unexpected status {}", status),
            ));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| load_error(Some(status.as_u16()), e.to_string()))?;

        parse(locale, &raw)
    }

    fn describe(&self, locale: Locale) -> String {
        self.url_for(locale)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| resource_path(&self.pattern, locale))
    }
}
