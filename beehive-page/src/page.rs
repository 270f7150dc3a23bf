//! A document plus everything needed to fill it from a dictionary.

use crate::assets;
use crate::bindings::{BindingReport, apply_bindings};
use crate::blocks::{Block, BlockRenderer};
use crate::{Document, Fragment, PageConfig, PageError, Result, TemplateEngine};
use beehive_i18n::{Dictionary, TextBinder};
use beehive_log::debug;
use std::sync::Arc;

/// One dictionary-driven update of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    ApplyBrandAssets,
    ApplyContactHrefs,
    ApplyMap,
    ApplySocialLinks,
    ApplyAboutVideo,
    Render(Block),
}

impl Step {
    /// Every step, in the order they are applied after a locale change.
    pub const ALL: [Step; 11] = [
        Step::ApplyBrandAssets,
        Step::ApplyContactHrefs,
        Step::ApplyMap,
        Step::ApplySocialLinks,
        Step::ApplyAboutVideo,
        Step::Render(Block::AboutList),
        Step::Render(Block::ClientLogos),
        Step::Render(Block::Partners),
        Step::Render(Block::Services),
        Step::Render(Block::Companies),
        Step::Render(Block::Team),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Step::ApplyBrandAssets => "apply_brand_assets",
            Step::ApplyContactHrefs => "apply_contact_hrefs",
            Step::ApplyMap => "apply_map",
            Step::ApplySocialLinks => "apply_social_links",
            Step::ApplyAboutVideo => "apply_about_video",
            Step::Render(block) => block.label(),
        }
    }
}

/// Page binder over a shared [`Document`].
#[derive(Clone)]
pub struct Page {
    doc: Arc<dyn Document>,
    renderer: BlockRenderer,
    config: PageConfig,
}

impl Page {
    pub fn new(doc: Arc<dyn Document>, config: PageConfig) -> Result<Self> {
        let engine = TemplateEngine::new(config.templates.clone())?;
        let renderer = BlockRenderer::new(engine, &config);
        Ok(Self {
            doc,
            renderer,
            config,
        })
    }

    pub fn document(&self) -> &dyn Document {
        self.doc.as_ref()
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn engine(&self) -> &TemplateEngine {
        self.renderer.engine()
    }

    pub fn renderer(&self) -> &BlockRenderer {
        &self.renderer
    }

    pub fn apply_bindings(&self, dictionary: &Dictionary) -> BindingReport {
        apply_bindings(self.document(), dictionary)
    }

    /// Render `block` into its container, replacing what was there.
    ///
    /// `Ok(None)` when the page has no container for the block.
    pub fn render_block(&self, block: Block, dictionary: &Dictionary) -> Result<Option<usize>> {
        let Some(container) = block.container(self.document()) else {
            debug!(target: "beehive::page", "no container for {}", block.label());
            return Ok(None);
        };
        let fragment = self.renderer.render(block, dictionary)?;
        fragment.mount(self.document(), container);
        Ok(Some(fragment.len()))
    }

    /// Mount `fragment` into the element with `id`.
    pub fn mount(&self, id: &str, fragment: &Fragment) -> Result<()> {
        let container = self
            .doc
            .element_by_id(id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))?;
        fragment.mount(self.document(), container);
        Ok(())
    }

    pub fn run_step(&self, step: Step, dictionary: &Dictionary) -> Result<()> {
        let doc = self.document();
        match step {
            Step::ApplyBrandAssets => {
                assets::apply_brand_assets(doc, dictionary);
            }
            Step::ApplyContactHrefs => {
                assets::apply_contact_hrefs(doc, dictionary);
            }
            Step::ApplyMap => {
                assets::apply_map(doc, dictionary);
            }
            Step::ApplySocialLinks => {
                assets::apply_social_links(doc, dictionary);
            }
            Step::ApplyAboutVideo => {
                assets::apply_about_video(doc, dictionary);
            }
            Step::Render(block) => {
                self.render_block(block, dictionary)?;
            }
        }
        Ok(())
    }
}

impl TextBinder for Page {
    fn apply(&self, dictionary: &Dictionary) {
        let report = self.apply_bindings(dictionary);
        debug!(
            target: "beehive::page",
            "bindings applied={} skipped={}",
            report.applied,
            report.skipped
        );
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("renderer", &self.renderer)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
