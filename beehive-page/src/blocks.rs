//! Content blocks rendered from dictionary arrays.

use crate::fragment::{Fragment, try_render_block};
use crate::{Document, PageConfig, Result, TemplateEngine};
use beehive_i18n::Dictionary;
use serde_json::{Value, json};

/// Label of the partners marquee when the dictionary has none.
const DEFAULT_MARQUEE_LABEL: &str = "Nos clients carousel";

/// A repeated block of the page and where it is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    AboutList,
    ClientLogos,
    Partners,
    Services,
    Companies,
    Team,
}

impl Block {
    /// Render order used by the bootstrap.
    pub const ALL: [Block; 6] = [
        Block::AboutList,
        Block::ClientLogos,
        Block::Partners,
        Block::Services,
        Block::Companies,
        Block::Team,
    ];

    /// Dictionary path of the item array.
    pub fn path(&self) -> &'static str {
        match self {
            Block::AboutList => "about.list",
            Block::ClientLogos => "clients.logos",
            Block::Partners => "partners.logos",
            Block::Services => "services.items",
            Block::Companies => "companies.items",
            Block::Team => "team.members",
        }
    }

    /// Candidate container ids; the first one present is used.
    pub fn container_ids(&self) -> &'static [&'static str] {
        match self {
            Block::AboutList => &["aboutList"],
            Block::ClientLogos => &["clientLogos"],
            Block::Partners => &["partnersGrid"],
            Block::Services => &["servicesGrid"],
            Block::Companies => &["companiesGrid"],
            Block::Team => &["foundersGrid", "teamGrid"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Block::AboutList => "render_about_list",
            Block::ClientLogos => "render_client_logos",
            Block::Partners => "render_partners",
            Block::Services => "render_services",
            Block::Companies => "render_companies",
            Block::Team => "render_team",
        }
    }

    /// First container of this block found in `doc`.
    pub fn container(&self, doc: &dyn Document) -> Option<crate::NodeId> {
        self.container_ids()
            .iter()
            .find_map(|id| doc.element_by_id(id))
    }
}

/// Turns dictionary content into block fragments.
#[derive(Debug, Clone)]
pub struct BlockRenderer {
    engine: TemplateEngine,
    exclusions: Vec<String>,
}

impl BlockRenderer {
    pub fn new(engine: TemplateEngine, config: &PageConfig) -> Self {
        Self {
            engine,
            exclusions: config
                .client_logo_exclusions
                .iter()
                .map(|needle| needle.to_lowercase())
                .collect(),
        }
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    pub fn render(&self, block: Block, dictionary: &Dictionary) -> Result<Fragment> {
        match block {
            Block::AboutList => self.render_about_list(dictionary),
            Block::ClientLogos => self.render_client_logos(dictionary),
            Block::Partners => self.render_partners(dictionary),
            Block::Services => self.render_services(dictionary),
            Block::Companies => self.render_companies(dictionary),
            Block::Team => self.render_team(dictionary),
        }
    }

    /// One card per `services.items` entry, iconed by title.
    pub fn render_services(&self, dictionary: &Dictionary) -> Result<Fragment> {
        self.each(dictionary, Block::Services, "service_card")
    }

    pub fn render_companies(&self, dictionary: &Dictionary) -> Result<Fragment> {
        self.each(dictionary, Block::Companies, "company_card")
    }

    pub fn render_team(&self, dictionary: &Dictionary) -> Result<Fragment> {
        self.each(dictionary, Block::Team, "team_card")
    }

    pub fn render_about_list(&self, dictionary: &Dictionary) -> Result<Fragment> {
        self.each(dictionary, Block::AboutList, "about_item")
    }

    /// Client logos minus the configured exclusions.
    pub fn render_client_logos(&self, dictionary: &Dictionary) -> Result<Fragment> {
        let Some(logos) = dictionary.lookup_array(Block::ClientLogos.path()) else {
            return Ok(Fragment::new());
        };

        logos
            .iter()
            .filter(|logo| !self.is_excluded(logo))
            .map(|logo| self.engine.render("client_logo", logo))
            .collect()
    }

    /// Partner logos as a looping marquee: entries without a non-empty `src`
    /// are dropped and the rest repeated once. Empty when nothing remains.
    pub fn render_partners(&self, dictionary: &Dictionary) -> Result<Fragment> {
        let logos: Vec<Value> = dictionary
            .lookup_array(Block::Partners.path())
            .unwrap_or_default()
            .iter()
            .filter_map(|logo| {
                let src = logo.get("src").and_then(Value::as_str)?;
                if src.is_empty() {
                    return None;
                }
                let alt = logo.get("alt").and_then(Value::as_str).unwrap_or_default();
                Some(json!({ "src": src, "alt": alt }))
            })
            .collect();

        if logos.is_empty() {
            return Ok(Fragment::new());
        }

        let looped: Vec<&Value> = logos.iter().chain(logos.iter()).collect();
        let label = dictionary
            .lookup_non_empty_str("partners.marqueeLabel")
            .unwrap_or(DEFAULT_MARQUEE_LABEL);

        let marquee = self
            .engine
            .render("partners_marquee", &json!({ "label": label, "logos": looped }))?;

        Ok(std::iter::once(marquee).collect())
    }

    fn each(&self, dictionary: &Dictionary, block: Block, template: &str) -> Result<Fragment> {
        try_render_block(dictionary, block.path(), |item| self.engine.render(template, item))
    }

    fn is_excluded(&self, logo: &Value) -> bool {
        let field = |name: &str| {
            logo.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_lowercase()
        };
        let (src, alt) = (field("src"), field("alt"));

        self.exclusions
            .iter()
            .any(|needle| src.contains(needle.as_str()) || alt.contains(needle.as_str()))
    }
}
