//! Where the locale lives in the URL path.

use crate::Locale;
use serde::{Deserialize, Serialize};

/// Deployment layout of the locale segment.
///
/// ```
/// use beehive_i18n::{Locale, UrlLayout};
///
/// let flat = UrlLayout::Flat;
/// assert_eq!(flat.locale_in("/site/ar"), Some(Locale::Ar));
/// assert_eq!(flat.rewrite("/site/ar", Locale::En).as_deref(), Some("/site/en"));
///
/// let nested = UrlLayout::Nested { folder: "beehive".into() };
/// assert_eq!(nested.locale_in("/beehive/en/index.html"), Some(Locale::En));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum UrlLayout {
    /// Locale is the final path segment.
    Flat,
    /// Locale is the segment right after `folder`.
    Nested { folder: String },
    /// Nested when a folder is given and the path contains it, flat otherwise.
    Detect {
        #[serde(default)]
        folder: Option<String>,
    },
}

impl Default for UrlLayout {
    fn default() -> Self {
        UrlLayout::Detect { folder: None }
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn flat_slot(segments: &[&str]) -> Option<usize> {
    let last = segments.len().checked_sub(1)?;
    Locale::is_supported(segments[last]).then_some(last)
}

fn nested_slot(segments: &[&str], folder: &str) -> Option<usize> {
    let folder = folder.trim_matches('/');
    let at = segments.iter().position(|s| *s == folder)? + 1;
    segments
        .get(at)
        .filter(|s| Locale::is_supported(s))
        .map(|_| at)
}

impl UrlLayout {
    /// Index of the segment holding a supported locale, if any.
    fn slot(&self, segments: &[&str]) -> Option<usize> {
        match self {
            UrlLayout::Flat => flat_slot(segments),
            UrlLayout::Nested { folder } => nested_slot(segments, folder),
            UrlLayout::Detect { folder } => folder
                .as_deref()
                .and_then(|f| nested_slot(segments, f))
                .or_else(|| flat_slot(segments)),
        }
    }

    /// Locale carried by `path` under this layout.
    pub fn locale_in(&self, path: &str) -> Option<Locale> {
        let segments = segments(path);
        let slot = self.slot(&segments)?;
        Locale::parse(segments[slot]).ok()
    }

    /// `path` with its locale segment replaced by `locale`.
    ///
    /// `None` when the path has no locale segment to replace.
    pub fn rewrite(&self, path: &str, locale: Locale) -> Option<String> {
        let mut segments = segments(path);
        let slot = self.slot(&segments)?;
        segments[slot] = locale.code();

        let mut next = format!("/{}", segments.join("/"));
        if path.ends_with('/') {
            next.push('/');
        }
        Some(next)
    }
}
