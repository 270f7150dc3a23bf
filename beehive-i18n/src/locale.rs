//! Supported locales and normalization.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the site's supported languages.
///
/// # Examples
///
/// ```
/// use beehive_i18n::{Direction, Locale};
///
/// assert_eq!(Locale::normalize("AR"), Locale::Ar);
/// assert_eq!(Locale::normalize("de"), Locale::Fr);
/// assert_eq!(Locale::Ar.direction(), Direction::Rtl);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
    Ar,
}

impl Locale {
    /// Every supported locale, in switcher order.
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Fr, Locale::Ar];

    /// Locale used whenever input cannot be resolved.
    pub const FALLBACK: Locale = Locale::Fr;

    /// Two-letter code, as used in paths, storage and dictionary file names.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Ar => "ar",
        }
    }

    /// Text direction of the language.
    pub fn direction(&self) -> Direction {
        match self {
            Locale::Ar => Direction::Rtl,
            Locale::En | Locale::Fr => Direction::Ltr,
        }
    }

    /// Strict parse of an exact, already lower-case code.
    pub fn parse(code: &str) -> Result<Self> {
        match code {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            "ar" => Ok(Locale::Ar),
            other => Err(I18nError::InvalidLocale(other.to_string())),
        }
    }

    /// Whether `code` is exactly one of the supported codes.
    pub fn is_supported(code: &str) -> bool {
        Self::parse(code).is_ok()
    }

    /// Lower-case and validate; anything unsupported (including empty input)
    /// becomes [`Locale::FALLBACK`].
    pub fn normalize(input: &str) -> Self {
        Self::parse(&input.to_lowercase()).unwrap_or(Self::FALLBACK)
    }
}

/// Free-function form of [`Locale::normalize`] accepting absent input.
pub fn normalize(input: Option<&str>) -> Locale {
    Locale::normalize(input.unwrap_or_default())
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(&s.to_lowercase())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Document text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value for the document `dir` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
