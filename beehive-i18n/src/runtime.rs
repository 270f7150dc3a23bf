//! The i18n context: active locale, dictionary cache and subscribers.

use crate::host::{MemoryHost, PageHost, TextBinder};
use crate::loader::DictionaryLoader;
use crate::source::DictionarySource;
use crate::storage::{MemoryStore, PreferenceStore};
use crate::subscribers::{LocaleChange, SubscriberList, Subscription};
use crate::{Dictionary, I18nConfig, I18nError, Locale, Result};
use beehive_log::{debug, info, warn};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
struct ActiveState {
    locale: Locale,
    dictionary: Option<Arc<Dictionary>>,
    committed: Option<Locale>,
}

struct Inner {
    config: I18nConfig,
    host: Arc<dyn PageHost>,
    store: Arc<dyn PreferenceStore>,
    loader: DictionaryLoader,
    state: RwLock<ActiveState>,
    binder: RwLock<Option<Arc<dyn TextBinder>>>,
    subscribers: Arc<SubscriberList>,
}

/// Locale resolver and dictionary registry.
///
/// Cloning is cheap and every clone shares the same state.
///
/// # Examples
///
/// ```
/// use beehive_i18n::{I18n, Locale, MemoryHost, StaticDictionarySource};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let i18n = I18n::builder()
///     .host(Arc::new(MemoryHost::new("/ar")))
///     .source(StaticDictionarySource::new().with(Locale::Ar, json!({"hero": {"title": "مرحبا"}})))
///     .build()
///     .unwrap();
///
/// let dictionary = i18n.init().await.unwrap();
/// assert_eq!(i18n.active_locale(), Locale::Ar);
/// assert_eq!(dictionary.lookup_str("hero.title"), Some("مرحبا"));
/// # });
/// ```
#[derive(Clone)]
pub struct I18n {
    inner: Arc<Inner>,
}

impl I18n {
    pub fn builder() -> I18nBuilder {
        I18nBuilder::default()
    }

    /// Locale from the location path, then the stored preference, then the
    /// fallback.
    pub fn resolve_initial_locale(&self) -> Locale {
        let path = self.inner.host.pathname();
        if let Some(locale) = self.inner.config.url_layout.locale_in(&path) {
            return locale;
        }

        match self.inner.store.load(&self.inner.config.storage_key) {
            Ok(Some(stored)) if !stored.is_empty() => Locale::normalize(&stored),
            Ok(_) => Locale::FALLBACK,
            Err(e) => {
                debug!(target: "beehive::i18n", "ignoring stored preference: {}", e);
                Locale::FALLBACK
            }
        }
    }

    /// Switch to `candidate` (normalized), load its dictionary, apply text
    /// bindings and notify subscribers.
    ///
    /// Path rewriting and persistence are best effort. A dictionary failure
    /// is returned, and in that case bindings and subscribers are untouched.
    /// Unless a newer switch has started meanwhile, the failed switch is
    /// rolled back to the last committed locale: state, root attributes,
    /// path and stored preference.
    pub async fn set_active_locale(&self, candidate: &str) -> Result<Arc<Dictionary>> {
        let locale = Locale::normalize(candidate);

        self.inner.state.write().locale = locale;
        self.apply_direction(locale);
        self.sync_path(locale);
        self.persist(locale);

        let dictionary = match self.inner.loader.load(locale).await {
            Ok(dictionary) => dictionary,
            Err(e) => {
                self.roll_back(locale);
                return Err(e);
            }
        };

        // Whoever finishes loading last owns the final state.
        {
            let mut state = self.inner.state.write();
            state.locale = locale;
            state.dictionary = Some(dictionary.clone());
            state.committed = Some(locale);
        }
        self.apply_direction(locale);

        let binder = self.inner.binder.read().clone();
        if let Some(binder) = binder {
            binder.apply(&dictionary);
        }

        self.inner.subscribers.notify(&LocaleChange {
            locale,
            dictionary: dictionary.clone(),
        });

        info!(target: "beehive::i18n", "active locale is now {}", locale);
        Ok(dictionary)
    }

    /// Cached dictionary for `locale`, fetching it at most once.
    pub async fn load_dictionary(&self, locale: Locale) -> Result<Arc<Dictionary>> {
        self.inner.loader.load(locale).await
    }

    /// Register `callback` for every successful locale change.
    pub fn on_locale_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LocaleChange) + Send + Sync + 'static,
    {
        self.inner.subscribers.add(Arc::new(callback))
    }

    /// Install the hook that applies dictionary text to the page.
    pub fn set_binder(&self, binder: Arc<dyn TextBinder>) {
        *self.inner.binder.write() = Some(binder);
    }

    /// Resolve the initial locale and activate it.
    pub async fn init(&self) -> Result<Arc<Dictionary>> {
        let initial = self.resolve_initial_locale();
        debug!(target: "beehive::i18n", "initial locale {}", initial);
        self.set_active_locale(initial.code()).await
    }

    pub fn active_locale(&self) -> Locale {
        self.inner.state.read().locale
    }

    /// Dictionary of the last completed locale change.
    pub fn dictionary(&self) -> Option<Arc<Dictionary>> {
        self.inner.state.read().dictionary.clone()
    }

    /// Forget every cached dictionary.
    pub fn clear_cache(&self) {
        self.inner.loader.cache().clear();
    }

    pub fn loader(&self) -> &DictionaryLoader {
        &self.inner.loader
    }

    pub fn config(&self) -> &I18nConfig {
        &self.inner.config
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    fn roll_back(&self, failed: Locale) {
        let previous = {
            let mut state = self.inner.state.write();
            let committed = state.committed;
            match committed {
                Some(previous) if state.locale == failed && previous != failed => {
                    state.locale = previous;
                    previous
                }
                _ => return,
            }
        };

        warn!(target: "beehive::i18n", "switch to {} failed, back to {}", failed, previous);
        self.apply_direction(previous);
        self.sync_path(previous);
        self.persist(previous);
    }

    fn apply_direction(&self, locale: Locale) {
        let host = &self.inner.host;
        host.set_root_attribute("dir", locale.direction().as_str());
        host.set_root_attribute("lang", locale.code());
    }

    fn sync_path(&self, locale: Locale) {
        let host = &self.inner.host;
        let current = host.pathname();
        let Some(next) = self.inner.config.url_layout.rewrite(&current, locale) else {
            return;
        };
        if next == current {
            return;
        }
        if let Err(e) = host.replace_path(&next) {
            warn!(target: "beehive::i18n", "could not rewrite {} to {}: {}", current, next, e);
        }
    }

    fn persist(&self, locale: Locale) {
        if let Err(e) = self
            .inner
            .store
            .store(&self.inner.config.storage_key, locale.code())
        {
            debug!(target: "beehive::i18n", "locale preference not saved: {}", e);
        }
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("config", &self.inner.config)
            .field("state", &*self.inner.state.read())
            .field("loader", &self.inner.loader)
            .field("subscribers", &self.inner.subscribers)
            .finish_non_exhaustive()
    }
}

/// Assembles an [`I18n`].
///
/// Host and store default to in-memory implementations. Without an explicit
/// source, an HTTP source is built from `base_url` when the `http` feature is
/// enabled.
#[derive(Default)]
pub struct I18nBuilder {
    config: I18nConfig,
    host: Option<Arc<dyn PageHost>>,
    store: Option<Arc<dyn PreferenceStore>>,
    source: Option<Arc<dyn DictionarySource>>,
    binder: Option<Arc<dyn TextBinder>>,
}

impl I18nBuilder {
    pub fn config(mut self, config: I18nConfig) -> Self {
        self.config = config;
        self
    }

    pub fn host(mut self, host: Arc<dyn PageHost>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn source(mut self, source: impl DictionarySource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn shared_source(mut self, source: Arc<dyn DictionarySource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn binder(mut self, binder: Arc<dyn TextBinder>) -> Self {
        self.binder = Some(binder);
        self
    }

    pub fn build(self) -> Result<I18n> {
        let source = match self.source {
            Some(source) => source,
            None => default_source(&self.config)?,
        };

        Ok(I18n {
            inner: Arc::new(Inner {
                config: self.config,
                host: self.host.unwrap_or_else(|| Arc::new(MemoryHost::default())),
                store: self.store.unwrap_or_else(|| Arc::new(MemoryStore::new())),
                loader: DictionaryLoader::new(source),
                state: RwLock::default(),
                binder: RwLock::new(self.binder),
                subscribers: Arc::default(),
            }),
        })
    }
}

#[cfg(feature = "http")]
fn default_source(config: &I18nConfig) -> Result<Arc<dyn DictionarySource>> {
    let base_url = config.base_url.as_deref().ok_or_else(|| {
        I18nError::Config("no dictionary source and no base_url configured".to_string())
    })?;
    let source = crate::HttpDictionarySource::new(base_url)?
        .with_pattern(config.dictionary_path.clone());
    Ok(Arc::new(source))
}

#[cfg(not(feature = "http"))]
fn default_source(_config: &I18nConfig) -> Result<Arc<dyn DictionarySource>> {
    Err(I18nError::Config(
        "no dictionary source configured".to_string(),
    ))
}
