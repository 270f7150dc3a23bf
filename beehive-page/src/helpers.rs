//! Built-in Handlebars helpers

use handlebars::{Handlebars, handlebars_helper};

const ICON_CONSTRUCTION: &str = r#"<svg viewBox="0 0 24 24" width="20" height="20" fill="currentColor" aria-hidden="true" data-icon="construction"><path d="M3 21V8l6-4 6 4v13H3Zm8-2h2v-3h-2v3ZM5 19h4v-3H5v3Zm0-5h4v-3H5v3Zm0-5h4V6.6L5 8.9V9Zm10 10h6V3h-7v2h5v14h-4v2Zm0-5h2v-3h-2v3Zm0-5h2V6h-2v3Z"/></svg>"#;
const ICON_CONSULTING: &str = r#"<svg viewBox="0 0 24 24" width="20" height="20" fill="currentColor" aria-hidden="true" data-icon="consulting"><path d="M3 4h18v12H7l-4 4V4Zm2 2v9.17L6.17 14H19V6H5Zm4 1h6v2H9V7Zm0 4h10v2H9v-2Z"/></svg>"#;
const ICON_SOFTWARE: &str = r#"<svg viewBox="0 0 24 24" width="20" height="20" fill="currentColor" aria-hidden="true" data-icon="software"><path d="M9 3h6v2h2a2 2 0 0 1 2 2v2h2v2h-2v2h2v2h-2v2a2 2 0 0 1-2 2h-2v2H9v-2H7a2 2 0 0 1-2-2v-2H3v-2h2v-2H3v-2h2V7a2 2 0 0 1 2-2h2V3Zm-2 4v10h10V7H7Z"/></svg>"#;
const ICON_GENERIC: &str = r#"<svg viewBox="0 0 24 24" width="20" height="20" fill="currentColor" aria-hidden="true" data-icon="generic"><path d="M4 6h16v12H4V6Zm2 2v8h12V8H6Zm1 9h10v2H7v-2Z"/></svg>"#;

/// Icon family of a service card, picked from its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceIcon {
    Construction,
    Consulting,
    Software,
    Generic,
}

impl ServiceIcon {
    /// Case-insensitive keyword match; the first match wins.
    pub fn for_title(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("construct") {
            ServiceIcon::Construction
        } else if title.contains("consult") {
            ServiceIcon::Consulting
        } else if title.contains("logiciel") || title.contains("software") {
            ServiceIcon::Software
        } else {
            ServiceIcon::Generic
        }
    }

    pub fn svg(&self) -> &'static str {
        match self {
            ServiceIcon::Construction => ICON_CONSTRUCTION,
            ServiceIcon::Consulting => ICON_CONSULTING,
            ServiceIcon::Software => ICON_SOFTWARE,
            ServiceIcon::Generic => ICON_GENERIC,
        }
    }
}

/// Register all built-in helpers
pub fn register_builtin_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("service_icon", Box::new(service_icon_helper));
}

// {{{service_icon title}}}
handlebars_helper!(service_icon_helper: |title: Json| {
    ServiceIcon::for_title(title.as_str().unwrap_or_default()).svg()
});
