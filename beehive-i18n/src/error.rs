//! Error types for i18n operations

use crate::Locale;
use thiserror::Error;

/// Errors that can occur during i18n operations.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The dictionary resource could not be fetched (transport failure or non-2xx).
    #[error("Failed to load dictionary for {locale} from {resource}: {reason}")]
    DictionaryLoad {
        locale: Locale,
        resource: String,
        /// HTTP-like status when the source produced one
        status: Option<u16>,
        reason: String,
    },

    /// The dictionary resource was fetched but is not valid JSON.
    #[error("Dictionary for {locale} is not valid JSON: {source}")]
    DictionaryParse {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },

    /// Preference storage could not be read or written.
    #[error("Preference storage unavailable: {0}")]
    StorageAccess(String),

    /// The visible location could not be rewritten.
    #[error("Cannot update location: {0}")]
    Navigation(String),

    /// Strict parse of a locale tag outside the supported set.
    #[error("Unsupported locale: {0}")]
    InvalidLocale(String),

    /// The runtime was assembled with missing or invalid parts.
    #[error("Invalid i18n configuration: {0}")]
    Config(String),
}

impl I18nError {
    /// Status reported by the dictionary source, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            I18nError::DictionaryLoad { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether this is a dictionary fetch/parse failure.
    pub fn is_dictionary_error(&self) -> bool {
        matches!(
            self,
            I18nError::DictionaryLoad { .. } | I18nError::DictionaryParse { .. }
        )
    }
}
