//! Locale resolution and dictionary loading for Beehive sites
//!
//! Provides:
//!
//! - **Locale Resolution**: from the location path, a persisted preference or
//!   the fallback (`fr`)
//! - **Dictionary Loading**: one JSON dictionary per locale, fetched once and
//!   cached for the lifetime of the runtime
//! - **Change Notification**: subscribers called after every successful switch
//! - **Document Direction**: `dir`/`lang` on the document root
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use beehive_i18n::{I18n, I18nConfig, FsDictionarySource, MemoryHost};
//! use std::sync::Arc;
//!
//! let i18n = I18n::builder()
//!     .config(I18nConfig::default())
//!     .host(Arc::new(MemoryHost::new("/ar")))
//!     .source(FsDictionarySource::new("data"))
//!     .build()?;
//!
//! let dictionary = i18n.init().await?;
//! dictionary.lookup_str("hero.title");
//!
//! i18n.on_locale_change(|change| println!("now {}", change.locale));
//! i18n.set_active_locale("en").await?;
//! ```
//!
//! # URL Layouts
//!
//! ```rust,ignore
//! use beehive_i18n::{Locale, UrlLayout};
//!
//! let layout = UrlLayout::Nested { folder: "beehive".into() };
//! layout.locale_in("/beehive/ar/index.html");  // Some(Locale::Ar)
//! ```

mod config;
mod dictionary;
mod error;
mod host;
mod layout;
mod loader;
mod locale;
mod runtime;
mod source;
mod storage;
mod subscribers;

pub use config::{DEFAULT_DICTIONARY_PATH, DEFAULT_STORAGE_KEY, I18nConfig, LOCALE_PLACEHOLDER};
pub use dictionary::{Dictionary, lookup_path};
pub use error::I18nError;
pub use host::{MemoryHost, PageHost, TextBinder};
pub use layout::UrlLayout;
pub use loader::{DictionaryCache, DictionaryLoader};
pub use locale::{Direction, Locale, normalize};
pub use runtime::{I18n, I18nBuilder};
#[cfg(feature = "http")]
pub use source::HttpDictionarySource;
pub use source::{DictionarySource, FsDictionarySource, StaticDictionarySource};
pub use storage::{FileStore, MemoryStore, PreferenceStore};
pub use subscribers::{LocaleChange, Subscription};

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Dictionary, Direction, I18n, I18nConfig, I18nError, Locale, LocaleChange, PageHost,
        PreferenceStore, Result, Subscription, TextBinder, UrlLayout,
    };
}
