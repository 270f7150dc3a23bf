//! Error types for page rendering

use beehive_i18n::I18nError;
use thiserror::Error;

/// Result type for page operations
pub type Result<T> = std::result::Result<T, PageError>;

/// Errors that can occur while rendering or binding a page
#[derive(Error, Debug)]
pub enum PageError {
    /// Template could not be parsed or registered
    #[error("Template error: {0}")]
    Template(String),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// A required element is absent from the document
    #[error("Element not found: #{0}")]
    MissingElement(String),

    /// Locale or dictionary failure
    #[error(transparent)]
    I18n(#[from] I18nError),

    /// IO error when loading template overrides
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<handlebars::RenderError> for PageError {
    fn from(err: handlebars::RenderError) -> Self {
        PageError::Render(err.to_string())
    }
}

impl From<handlebars::TemplateError> for PageError {
    fn from(err: handlebars::TemplateError) -> Self {
        PageError::Template(err.to_string())
    }
}
