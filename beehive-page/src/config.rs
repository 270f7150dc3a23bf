//! Page settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Images shown by the hero carousel, in order.
pub const DEFAULT_HERO_IMAGES: [&str; 3] = [
    "./img/Slider/492004038_10236469651261921_261716896888020327_n.jpg",
    "./img/Slider/Slider1.jpg",
    "./img/Slider/Slider2.jpg",
];

/// Autoplay period of the hero carousel.
pub const DEFAULT_HERO_INTERVAL_MS: u64 = 5500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub hero: HeroConfig,

    /// Client logos whose `src` or `alt` contains any of these
    /// (case-insensitive) are not rendered.
    pub client_logo_exclusions: Vec<String>,

    /// Scroll offset past which the back-to-top button shows.
    pub back_to_top_threshold: f64,

    /// Distance from the viewport top used by the scroll fallback of the
    /// active navigation.
    pub nav_offset: f64,

    pub templates: TemplateConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            hero: HeroConfig::default(),
            client_logo_exclusions: vec!["alhadhba".to_string()],
            back_to_top_threshold: 500.0,
            nav_offset: 120.0,
            templates: TemplateConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub images: Vec<String>,
    pub interval_ms: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            images: DEFAULT_HERO_IMAGES.iter().map(|s| s.to_string()).collect(),
            interval_ms: DEFAULT_HERO_INTERVAL_MS,
        }
    }
}

/// Configuration for the block template engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory whose `.hbs` files override the built-in block templates
    pub dir: Option<PathBuf>,

    /// Template file extension (default: ".hbs")
    pub extension: String,

    /// Error on missing variables
    pub strict_mode: bool,

    /// HTML-escape interpolated values (default: true)
    pub escape_html: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: ".hbs".to_string(),
            strict_mode: false,
            escape_html: true,
        }
    }
}

impl TemplateConfig {
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_strict_mode(mut self, enable: bool) -> Self {
        self.strict_mode = enable;
        self
    }

    pub fn with_escape_html(mut self, enable: bool) -> Self {
        self.escape_html = enable;
        self
    }
}
