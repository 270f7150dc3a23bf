//! Memoized dictionary loading.

use crate::{Dictionary, DictionarySource, Locale, Result};
use beehive_log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Process-wide dictionary registry.
///
/// Created with the runtime and emptied only by [`DictionaryCache::clear`]
/// (the equivalent of a full page reload). Entries are written once per
/// locale with the same content, so concurrent writers need no coordination
/// beyond the lock.
#[derive(Debug, Default)]
pub struct DictionaryCache {
    entries: RwLock<HashMap<Locale, Arc<Dictionary>>>,
}

impl DictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locale: Locale) -> Option<Arc<Dictionary>> {
        self.entries.read().get(&locale).cloned()
    }

    /// Insert unless already present; returns the cached entry.
    pub fn insert(&self, locale: Locale, dictionary: Arc<Dictionary>) -> Arc<Dictionary> {
        self.entries
            .write()
            .entry(locale)
            .or_insert(dictionary)
            .clone()
    }

    pub fn contains(&self, locale: Locale) -> bool {
        self.entries.read().contains_key(&locale)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Loads dictionaries through a [`DictionarySource`], at most one fetch per
/// locale once a load has succeeded.
pub struct DictionaryLoader {
    source: Arc<dyn DictionarySource>,
    cache: DictionaryCache,
    fetches: AtomicUsize,
}

impl DictionaryLoader {
    pub fn new(source: Arc<dyn DictionarySource>) -> Self {
        Self {
            source,
            cache: DictionaryCache::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Cached dictionary, or a single fetch that populates the cache.
    ///
    /// Fetch and parse failures are returned as-is: nothing is cached and
    /// nothing is retried.
    pub async fn load(&self, locale: Locale) -> Result<Arc<Dictionary>> {
        if let Some(dictionary) = self.cache.get(locale) {
            debug!(target: "beehive::i18n", "dictionary cache hit for {}", locale);
            return Ok(dictionary);
        }

        debug!(
            target: "beehive::i18n",
            "fetching dictionary {}",
            self.source.describe(locale)
        );
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let dictionary = Arc::new(self.source.fetch(locale).await?);

        Ok(self.cache.insert(locale, dictionary))
    }

    /// Number of fetches issued to the source so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn cache(&self) -> &DictionaryCache {
        &self.cache
    }
}

impl std::fmt::Debug for DictionaryLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryLoader")
            .field("cache", &self.cache)
            .field("fetches", &self.fetch_count())
            .finish_non_exhaustive()
    }
}
