//! Site configuration and bootstrap.
//!
//! [`Site`] wires a [`Document`] to an [`I18n`] context: it sets up the page
//! chrome, resolves the initial locale, fills the page and re-fills it on
//! every later locale change.

use crate::Result;
use beehive_config::{ConfigError, ConfigService, ConfigValidator, FileFormat, Validate};
use beehive_i18n::{
    Dictionary, DictionarySource, I18n, I18nConfig, I18nError, LOCALE_PLACEHOLDER, Locale,
    PageHost, PreferenceStore, Subscription, UrlLayout,
};
use beehive_log::{debug, error, info};
use beehive_page::{
    ActiveNav, BackToTop, ContactForm, ContactFormView, Document, HeroSlider, LanguageSwitcher,
    MobileMenu, NodeId, Page, PageConfig, PageError, SectionView, Step, Submission, hide_loader,
};
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Prefix of the environment variables read by [`SiteConfig::load`].
pub const ENV_PREFIX: &str = "BEEHIVE";

const TARGET: &str = "beehive::site";

/// Everything the site runtime can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub i18n: I18nConfig,
    pub page: PageConfig,
}

impl SiteConfig {
    /// Defaults, then `file` (JSON, TOML or .env by extension), then
    /// `BEEHIVE_*` environment variables, validated.
    ///
    /// Nested keys use a double underscore:
    /// `BEEHIVE_PAGE__HERO__INTERVAL_MS=3000`.
    pub fn load(file: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        let mut builder = ConfigService::builder()
            .with_prefix(ENV_PREFIX)
            .with_defaults(&SiteConfig::default())?;

        if let Some(path) = file {
            let format = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(FileFormat::from_extension)
                .ok_or_else(|| ConfigError::ValidationError {
                    field: "file".to_string(),
                    message: format!("unsupported config file {}", path.display()),
                })?;
            builder = builder.add_file(path, format);
        }

        builder.load_env().build()?.load()
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> beehive_config::Result<()> {
        ConfigValidator::not_empty(&self.i18n.storage_key, "i18n.storage_key")?;
        ConfigValidator::contains_placeholder(
            &self.i18n.dictionary_path,
            LOCALE_PLACEHOLDER,
            "i18n.dictionary_path",
        )?;
        if let UrlLayout::Nested { folder } = &self.i18n.url_layout {
            ConfigValidator::not_empty(folder, "i18n.url_layout.folder")?;
        }
        if let Some(base_url) = &self.i18n.base_url {
            ConfigValidator::is_url(base_url, "i18n.base_url")?;
        }
        ConfigValidator::positive(self.page.hero.interval_ms, "page.hero.interval_ms")?;
        ConfigValidator::non_empty_list(&self.page.hero.images, "page.hero.images")?;
        Ok(())
    }
}

/// Site runtime errors
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    I18n(#[from] I18nError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("site needs a document")]
    MissingDocument,
}

/// A page update that failed while the others went on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub label: &'static str,
    pub message: String,
}

/// Outcome of the latest full page update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub locale: Locale,
    pub completed: Vec<&'static str>,
    pub failed: Vec<StepFailure>,
}

impl BootstrapReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_labels(&self) -> Vec<&'static str> {
        self.failed.iter().map(|f| f.label).collect()
    }
}

/// Run every page step; a failing step is logged and recorded, the rest
/// still run.
fn run_steps(page: &Page, locale: Locale, dictionary: &Dictionary) -> BootstrapReport {
    let mut report = BootstrapReport {
        locale,
        ..Default::default()
    };

    for step in Step::ALL {
        match page.run_step(step, dictionary) {
            Ok(()) => report.completed.push(step.label()),
            Err(e) => {
                error!(target: TARGET, "{} failed: {}", step.label(), e);
                report.failed.push(StepFailure {
                    label: step.label(),
                    message: e.to_string(),
                });
            }
        }
    }

    report
}

/// Builder for [`Site`].
#[derive(Default)]
pub struct SiteBuilder {
    config: SiteConfig,
    document: Option<(Arc<dyn Document>, Arc<dyn PageHost>)>,
    source: Option<Arc<dyn DictionarySource>>,
    store: Option<Arc<dyn PreferenceStore>>,
    hash: Option<String>,
}

impl SiteBuilder {
    pub fn config(mut self, config: SiteConfig) -> Self {
        self.config = config;
        self
    }

    /// The page, which is also the host for location and root attributes.
    pub fn document<D>(mut self, doc: Arc<D>) -> Self
    where
        D: Document + PageHost + 'static,
    {
        let document: Arc<dyn Document> = doc.clone();
        let host: Arc<dyn PageHost> = doc;
        self.document = Some((document, host));
        self
    }

    pub fn source(mut self, source: impl DictionarySource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn shared_source(mut self, source: Arc<dyn DictionarySource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Location hash at load time, without the `#`.
    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Set up the page and load the initial locale.
    ///
    /// Fails only when the page cannot be built or the initial dictionary
    /// cannot be loaded. Individual page steps that fail are reported in
    /// [`Site::report`].
    pub async fn bootstrap(self) -> Result<Site> {
        beehive_log::init();

        let (doc, host) = self.document.ok_or(SiteError::MissingDocument)?;
        let page_config = self.config.page.clone();
        let page = Arc::new(Page::new(doc.clone(), page_config.clone())?);

        let mut builder = I18n::builder()
            .config(self.config.i18n.clone())
            .host(host)
            .binder(page.clone());
        if let Some(source) = self.source {
            builder = builder.shared_source(source);
        }
        if let Some(store) = self.store {
            builder = builder.store(store);
        }
        let i18n = builder.build()?;

        hide_loader(doc.as_ref());
        let back_to_top = BackToTop::attach(doc.as_ref(), page_config.back_to_top_threshold);
        let menu = MobileMenu::attach(doc.as_ref());

        let mut subscriptions = Vec::new();
        let switcher = Arc::new(LanguageSwitcher::attach(doc.as_ref()));
        {
            let doc = doc.clone();
            let switcher = switcher.clone();
            subscriptions.push(
                i18n.on_locale_change(move |change| switcher.reflect(doc.as_ref(), change.locale)),
            );
        }

        let mut nav = ActiveNav::discover(doc.as_ref(), page_config.nav_offset);
        if let Some(nav) = nav.as_mut() {
            nav.select_initial(doc.as_ref(), self.hash.as_deref());
        }

        let mut early_failures = Vec::new();
        let hero = match HeroSlider::mount(doc.as_ref(), page.engine(), &page_config.hero) {
            Ok(hero) => hero,
            Err(e) => {
                error!(target: TARGET, "init_hero_slider failed: {}", e);
                early_failures.push(StepFailure {
                    label: "init_hero_slider",
                    message: e.to_string(),
                });
                None
            }
        };

        let dictionary = match i18n.init().await {
            Ok(dictionary) => dictionary,
            Err(e) => {
                error!(target: TARGET, "i18n init failed: {}", e);
                return Err(e.into());
            }
        };

        let mut report = run_steps(&page, i18n.active_locale(), &dictionary);
        early_failures.append(&mut report.failed);
        report.failed = early_failures;

        let contact = match ContactFormView::attach(doc.as_ref()) {
            Ok(view) => Some(view),
            Err(e) => {
                debug!(target: TARGET, "contact form disabled: {}", e);
                None
            }
        };

        info!(
            target: TARGET,
            "site ready in {} ({} steps, {} failed)",
            report.locale,
            report.completed.len(),
            report.failed.len()
        );

        let report = Arc::new(Mutex::new(report));
        {
            let page = page.clone();
            let report = report.clone();
            subscriptions.push(i18n.on_locale_change(move |change| {
                *report.lock() = run_steps(&page, change.locale, &change.dictionary);
            }));
        }

        Ok(Site {
            doc,
            page,
            i18n,
            switcher,
            nav: Mutex::new(nav),
            hero: Mutex::new(hero),
            back_to_top,
            menu,
            contact,
            report,
            subscriptions,
        })
    }
}

/// A bootstrapped page and its i18n context.
pub struct Site {
    doc: Arc<dyn Document>,
    page: Arc<Page>,
    i18n: I18n,
    switcher: Arc<LanguageSwitcher>,
    nav: Mutex<Option<ActiveNav>>,
    hero: Mutex<Option<HeroSlider>>,
    back_to_top: Option<BackToTop>,
    menu: Option<MobileMenu>,
    contact: Option<ContactFormView>,
    report: Arc<Mutex<BootstrapReport>>,
    subscriptions: Vec<Subscription>,
}

impl Site {
    pub fn builder() -> SiteBuilder {
        SiteBuilder::default()
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn document(&self) -> &dyn Document {
        self.doc.as_ref()
    }

    /// Report of the most recent full page update.
    pub fn report(&self) -> BootstrapReport {
        self.report.lock().clone()
    }

    pub async fn switch_locale(&self, candidate: &str) -> Result<Arc<Dictionary>> {
        Ok(self.i18n.set_active_locale(candidate).await?)
    }

    /// Click on a `.lang-btn` or `.lang-option`. `Ok(None)` when the element
    /// names no language.
    pub async fn choose_language(&self, node: NodeId) -> Result<Option<Arc<Dictionary>>> {
        let Some(lang) = LanguageSwitcher::requested_locale(self.document(), node) else {
            return Ok(None);
        };
        self.switch_locale(&lang).await.map(Some)
    }

    pub fn toggle_language_menu(&self) {
        self.switcher.toggle_menu(self.document());
    }

    /// Returns whether the menu is open afterwards.
    pub fn toggle_menu(&self) -> bool {
        self.menu
            .as_ref()
            .is_some_and(|menu| menu.toggle(self.document()))
    }

    pub fn follow_anchor(&self, href: &str) -> Option<NodeId> {
        beehive_page::follow_anchor(self.document(), href)
    }

    /// Scroll position and the current top of each section, relative to
    /// the viewport.
    pub fn on_scroll(&self, scroll_y: f64, section_tops: &[(&str, f64)]) {
        if let Some(button) = &self.back_to_top {
            button.on_scroll(self.document(), scroll_y);
        }
        if let Some(nav) = self.nav.lock().as_mut() {
            nav.on_scroll(self.document(), section_tops);
        }
    }

    pub fn on_intersections(&self, entries: &[SectionView]) {
        if let Some(nav) = self.nav.lock().as_mut() {
            nav.on_intersections(self.document(), entries);
        }
    }

    pub fn on_hash_change(&self, hash: &str) {
        if let Some(nav) = self.nav.lock().as_mut() {
            nav.on_hash_change(self.document(), hash);
        }
    }

    pub fn active_section(&self) -> Option<String> {
        self.nav
            .lock()
            .as_ref()
            .and_then(|nav| nav.active().map(str::to_string))
    }

    pub fn hero(&self) -> MutexGuard<'_, Option<HeroSlider>> {
        self.hero.lock()
    }

    /// End of the slide animation: commit the index and redraw.
    pub fn finish_hero_transition(&self) -> Result<Option<usize>> {
        let mut hero = self.hero.lock();
        let Some(slider) = hero.as_mut() else {
            return Ok(None);
        };
        Ok(slider.finish_transition(self.document(), self.page.engine())?)
    }

    /// Validate and acknowledge the contact form with the active
    /// dictionary's messages. `None` when the page has no form.
    pub fn submit_contact(&self, form: &ContactForm) -> Option<Submission> {
        let view = self.contact?;
        let dictionary = self.i18n.dictionary();
        Some(view.submit(self.document(), form, dictionary.as_deref()))
    }

    /// Stop reacting to locale changes.
    pub fn detach(self) -> usize {
        self.subscriptions
            .into_iter()
            .map(Subscription::unsubscribe)
            .filter(|removed| *removed)
            .count()
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("i18n", &self.i18n)
            .field("report", &*self.report.lock())
            .finish_non_exhaustive()
    }
}
