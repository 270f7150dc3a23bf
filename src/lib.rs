// Beehive - runtime for a multilingual marketing site
//
// Resolves the visitor's locale, loads the matching dictionary and fills the
// page from it: text bindings, asset attributes and repeated content blocks.

pub mod site;

pub use site::{BootstrapReport, Site, SiteBuilder, SiteConfig, SiteError, StepFailure};

// Re-export the member crates
pub use beehive_config;
pub use beehive_i18n;
pub use beehive_log;
pub use beehive_page;

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{BootstrapReport, Site, SiteConfig, SiteError};
    pub use beehive_config::{ConfigService, Validate};
    pub use beehive_i18n::prelude::*;
    pub use beehive_page::prelude::{
        Block, ContactForm, Document, Fragment, MemoryDocument, Page, PageConfig, PageError, Step,
    };
}
