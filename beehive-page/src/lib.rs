//! Page binding for Beehive sites
//!
//! Fills a document from the active locale's dictionary:
//!
//! - **Text Bindings**: `data-i18n`, `data-i18n-content`, `data-i18n-placeholder`
//! - **Content Blocks**: services, companies, team, client logos, partners
//!   marquee and about list, rendered with Handlebars
//! - **Assets**: logos, favicon, contact links, map, social links, video
//! - **Behaviors**: hero carousel, active navigation, contact form
//!   validation, back-to-top, mobile menu, language switcher
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use beehive_page::{Block, MemoryDocument, Page, PageConfig};
//! use std::sync::Arc;
//!
//! let doc = Arc::new(MemoryDocument::new("/fr"));
//! let page = Page::new(doc.clone(), PageConfig::default())?;
//!
//! page.apply_bindings(&dictionary);
//! page.render_block(Block::Services, &dictionary)?;
//! ```
//!
//! A [`Page`] is also an i18n [`TextBinder`](beehive_i18n::TextBinder), so
//! it can be handed to the i18n builder to rebind text on every switch.

mod assets;
mod bindings;
mod blocks;
mod carousel;
mod chrome;
mod config;
mod contact;
mod dom;
mod error;
mod fragment;
mod helpers;
mod nav;
mod page;
mod template;

pub use assets::{
    apply_about_video, apply_brand_assets, apply_contact_hrefs, apply_map, apply_social_links,
};
pub use bindings::{BindingKind, BindingReport, apply_bindings};
pub use blocks::{Block, BlockRenderer};
pub use carousel::{Carousel, HERO_ELEMENT_IDS, HeroSlider, Transition};
pub use chrome::{BackToTop, LanguageSwitcher, MobileMenu, follow_anchor, hide_loader};
pub use config::{
    DEFAULT_HERO_IMAGES, DEFAULT_HERO_INTERVAL_MS, HeroConfig, PageConfig, TemplateConfig,
};
pub use contact::{ContactForm, ContactFormView, Field, FieldError, Submission, is_valid_email};
pub use dom::{Document, MemoryDocument, NodeId};
pub use error::{PageError, Result};
pub use fragment::{Fragment, render_block, try_render_block};
pub use helpers::ServiceIcon;
pub use nav::{ACTIVE_CLASS, ActiveNav, HOME_SECTION, SectionView};
pub use page::{Page, Step};
pub use template::{BUILTIN_TEMPLATES, TemplateEngine};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Block, ContactForm, Document, Fragment, MemoryDocument, Page, PageConfig, PageError,
        Result, Step, apply_bindings, render_block,
    };
}
