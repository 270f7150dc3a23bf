//! Integration tests for common Beehive workflows.
//!
//! These tests bootstrap a whole site against an in-memory document and
//! the dictionaries shipped in `data/`.

use async_trait::async_trait;
use beehive::prelude::*;
use beehive_config::ConfigError;
use beehive_i18n::{DictionarySource, FsDictionarySource, MemoryStore, StaticDictionarySource};
use beehive_log::{Level, MemorySink};
use beehive_page::{NodeId, Submission};
use serde_json::json;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::Notify;

fn data_source() -> FsDictionarySource {
    FsDictionarySource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

struct Fixture {
    doc: Arc<MemoryDocument>,
    title: NodeId,
    ar_button: NodeId,
}

/// A page carrying every element the runtime knows about.
fn full_page(path: &str) -> Fixture {
    let doc = Arc::new(MemoryDocument::new(path));

    doc.insert_with_id("div", "pageLoader");
    doc.insert("button", &[("id", "backToTop"), ("class", "hidden")]);
    doc.insert_with_id("button", "menuBtn");
    doc.insert("nav", &[("id", "mobileNav"), ("hidden", "")]);

    doc.insert("button", &[("class", "lang-btn"), ("data-lang", "fr")]);
    doc.insert("button", &[("class", "lang-btn"), ("data-lang", "en")]);
    let ar_button = doc.insert("button", &[("class", "lang-btn"), ("data-lang", "ar")]);
    doc.insert_with_id("select", "langSelect");
    doc.insert_with_id("span", "langBtnLabel");
    doc.insert("button", &[("id", "langBtn"), ("aria-expanded", "false")]);
    doc.insert("div", &[("id", "langMenu"), ("class", "hidden")]);

    for section in ["home", "about", "services", "contact"] {
        let href = format!("#{}", section);
        doc.insert("a", &[("class", "nav-link"), ("href", href.as_str())]);
        doc.insert_with_id("section", section);
    }

    for id in ["heroSlider", "heroSlides", "heroDots", "heroPrev", "heroNext"] {
        doc.insert_with_id("div", id);
    }

    let title = doc.insert("h1", &[("data-i18n", "hero.title")]);
    doc.insert("input", &[("data-i18n-placeholder", "contact.form.email")]);

    for id in [
        "aboutList",
        "clientLogos",
        "partnersGrid",
        "servicesGrid",
        "companiesGrid",
        "foundersGrid",
    ] {
        doc.insert_with_id("div", id);
    }

    for id in ["siteLogo", "footerLogo", "mapFrame", "aboutVideo"] {
        doc.insert_with_id("img", id);
    }
    for id in ["contactEmail", "contactPhone", "socialLinkedIn"] {
        doc.insert_with_id("a", id);
    }

    doc.insert_with_id("form", "contactForm");
    for field in ["name", "email", "phone", "subject", "message"] {
        let id = format!("error-{}", field);
        doc.insert("p", &[("id", id.as_str()), ("hidden", "")]);
    }
    doc.insert("p", &[("id", "formSuccess"), ("hidden", "")]);

    Fixture {
        doc,
        title,
        ar_button,
    }
}

fn by_id(doc: &MemoryDocument, id: &str) -> NodeId {
    doc.element_by_id(id).unwrap()
}

// =============================================================================
// Bootstrap Tests
// =============================================================================

#[tokio::test]
async fn test_arabic_path_bootstraps_rtl() {
    let fixture = full_page("/ar");
    let doc = fixture.doc.clone();

    let site = Site::builder()
        .document(doc.clone())
        .source(data_source())
        .bootstrap()
        .await
        .unwrap();

    assert_eq!(site.i18n().active_locale(), Locale::Ar);
    assert_eq!(site.i18n().loader().fetch_count(), 1);
    assert_eq!(doc.root_attribute("dir").as_deref(), Some("rtl"));
    assert_eq!(doc.root_attribute("lang").as_deref(), Some("ar"));
    assert_eq!(doc.text(fixture.title), "نبني ما يدوم");
    assert!(doc.replaced_paths().is_empty());

    let report = site.report();
    assert!(report.is_clean(), "{:?}", report.failed);
    assert_eq!(report.locale, Locale::Ar);
    assert_eq!(report.completed.len(), Step::ALL.len());
}

#[tokio::test]
async fn test_bootstrap_fills_the_page() {
    let fixture = full_page("/en");
    let doc = fixture.doc.clone();

    let site = Site::builder()
        .document(doc.clone())
        .source(data_source())
        .hash("services")
        .bootstrap()
        .await
        .unwrap();

    assert_eq!(doc.attribute(by_id(&doc, "pageLoader"), "style").as_deref(), Some("display: none"));
    assert_eq!(doc.root_attribute("dir").as_deref(), Some("ltr"));
    assert_eq!(doc.text(fixture.title), "Building what lasts");

    assert_eq!(doc.inner_html(by_id(&doc, "servicesGrid")).matches("<article").count(), 3);
    assert_eq!(doc.inner_html(by_id(&doc, "aboutList")).matches("<li").count(), 3);
    assert_eq!(doc.inner_html(by_id(&doc, "foundersGrid")).matches("<article").count(), 2);

    let companies = doc.inner_html(by_id(&doc, "companiesGrid"));
    assert_eq!(companies.matches("company-logo").count(), 1);
    assert_eq!(companies.matches("company-cta").count(), 1);

    let clients = doc.inner_html(by_id(&doc, "clientLogos"));
    assert_eq!(clients.matches("<img").count(), 2);
    assert!(!clients.contains("Alhadhba"));

    let partners = doc.inner_html(by_id(&doc, "partnersGrid"));
    assert!(partners.contains("Our partners carousel"));
    assert_eq!(partners.matches("partners-marquee__item").count(), 4);

    assert_eq!(doc.attribute(by_id(&doc, "siteLogo"), "src").as_deref(), Some("./img/logo.svg"));
    assert_eq!(
        doc.attribute(by_id(&doc, "contactPhone"), "href").as_deref(),
        Some("tel:+21321000000")
    );
    assert_eq!(
        doc.attribute(by_id(&doc, "aboutVideo"), "src").as_deref(),
        Some("./video/about.mp4")
    );

    assert_eq!(doc.text(by_id(&doc, "langBtnLabel")), "EN");
    assert_eq!(site.active_section().as_deref(), Some("services"));

    let hero = site.hero();
    let slider = hero.as_ref().unwrap();
    assert_eq!(slider.carousel().len(), 3);
    assert!(slider.carousel().is_running());
    assert_eq!(doc.inner_html(by_id(&doc, "heroDots")).matches("<button").count(), 3);
}

#[tokio::test]
async fn test_empty_block_renders_nothing() {
    let fixture = full_page("/fr");
    let doc = fixture.doc.clone();
    let grid = by_id(&doc, "servicesGrid");
    doc.set_inner_html(grid, "<p>stale</p>");

    let site = Site::builder()
        .document(doc.clone())
        .source(StaticDictionarySource::new().with(
            Locale::Fr,
            json!({"hero": {"title": "Bonjour"}, "services": {"items": []}}),
        ))
        .bootstrap()
        .await
        .unwrap();

    assert_eq!(doc.inner_html(grid), "");
    assert_eq!(doc.text(fixture.title), "Bonjour");
    assert!(site.report().is_clean());
}

#[tokio::test]
async fn test_missing_dictionary_aborts_bootstrap() {
    let fixture = full_page("/ar");

    let err = Site::builder()
        .document(fixture.doc.clone())
        .source(StaticDictionarySource::new())
        .bootstrap()
        .await
        .unwrap_err();

    assert!(matches!(err, SiteError::I18n(I18nError::DictionaryLoad { .. })));
}

#[tokio::test]
async fn test_failing_step_is_isolated() {
    let templates = tempfile::tempdir().unwrap();
    std::fs::write(
        templates.path().join("service_card.hbs"),
        "<article>{{missing_helper title}}</article>",
    )
    .unwrap();

    let mut config = SiteConfig::default();
    config.page.templates.dir = Some(templates.path().to_path_buf());

    let sink = Arc::new(MemorySink::new());
    let previous = beehive_log::set_sink(sink.clone());

    let fixture = full_page("/en");
    let doc = fixture.doc.clone();
    let site = Site::builder()
        .config(config)
        .document(doc.clone())
        .source(data_source())
        .bootstrap()
        .await;
    beehive_log::set_sink(previous);
    let site = site.unwrap();

    assert!(sink.contains(Level::Error, "render_services failed"));
    let report = site.report();
    assert_eq!(report.failed_labels(), vec!["render_services"]);
    assert_eq!(report.completed.len(), Step::ALL.len() - 1);
    assert_eq!(doc.inner_html(by_id(&doc, "foundersGrid")).matches("<article").count(), 2);
    assert_eq!(doc.text(fixture.title), "Building what lasts");
}

// =============================================================================
// Locale Switching Tests
// =============================================================================

#[tokio::test]
async fn test_language_button_switches_and_rerenders() {
    let fixture = full_page("/site/fr/");
    let doc = fixture.doc.clone();
    let store = Arc::new(MemoryStore::new());

    let site = Site::builder()
        .document(doc.clone())
        .source(data_source())
        .store(store.clone())
        .bootstrap()
        .await
        .unwrap();
    assert_eq!(doc.text(fixture.title), "Bâtir ce qui dure");

    site.toggle_language_menu();
    site.choose_language(fixture.ar_button).await.unwrap().unwrap();

    assert_eq!(site.i18n().active_locale(), Locale::Ar);
    assert_eq!(doc.root_attribute("dir").as_deref(), Some("rtl"));
    assert_eq!(doc.pathname(), "/site/ar/");
    assert_eq!(store.load("beehive_lang").unwrap().as_deref(), Some("ar"));

    assert_eq!(doc.text(by_id(&doc, "langBtnLabel")), "AR");
    assert_eq!(doc.attribute(fixture.ar_button, "aria-pressed").as_deref(), Some("true"));
    assert!(doc.has_class(by_id(&doc, "langMenu"), "hidden"));

    let report = site.report();
    assert_eq!(report.locale, Locale::Ar);
    assert!(doc.inner_html(by_id(&doc, "servicesGrid")).contains("البناء"));
}

struct GatedSource {
    inner: FsDictionarySource,
    gates: HashMap<Locale, Arc<Notify>>,
}

#[async_trait]
impl DictionarySource for GatedSource {
    async fn fetch(&self, locale: Locale) -> beehive_i18n::Result<Dictionary> {
        if let Some(gate) = self.gates.get(&locale) {
            gate.notified().await;
        }
        self.inner.fetch(locale).await
    }

    fn describe(&self, locale: Locale) -> String {
        self.inner.describe(locale)
    }
}

#[tokio::test]
async fn test_last_completed_switch_wins() {
    let gate = Arc::new(Notify::new());
    let fixture = full_page("/ar");
    let doc = fixture.doc.clone();

    let site = Site::builder()
        .document(doc.clone())
        .source(GatedSource {
            inner: data_source(),
            gates: HashMap::from([(Locale::En, gate.clone())]),
        })
        .bootstrap()
        .await
        .unwrap();

    let slow = {
        let i18n = site.i18n().clone();
        tokio::spawn(async move { i18n.set_active_locale("en").await })
    };
    tokio::task::yield_now().await;

    site.switch_locale("fr").await.unwrap();
    assert_eq!(doc.text(fixture.title), "Bâtir ce qui dure");

    gate.notify_one();
    slow.await.unwrap().unwrap();

    assert_eq!(site.i18n().active_locale(), Locale::En);
    assert_eq!(doc.text(fixture.title), "Building what lasts");
    assert_eq!(doc.root_attribute("dir").as_deref(), Some("ltr"));
    assert_eq!(site.report().locale, Locale::En);
}

// =============================================================================
// Page Behavior Tests
// =============================================================================

#[tokio::test]
async fn test_contact_form_uses_active_dictionary() {
    let fixture = full_page("/fr");
    let doc = fixture.doc.clone();
    let site = Site::builder()
        .document(doc.clone())
        .source(data_source())
        .bootstrap()
        .await
        .unwrap();

    let rejected = site
        .submit_contact(&ContactForm {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            subject: "Devis".to_string(),
            message: "Bonjour, je souhaite un devis.".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert!(!rejected.is_accepted());
    assert_eq!(doc.text(by_id(&doc, "error-name")), "Veuillez saisir votre nom.");
    assert!(!doc.has_attribute(by_id(&doc, "error-email"), "hidden"));
    assert!(doc.has_attribute(by_id(&doc, "formSuccess"), "hidden"));

    let accepted = site
        .submit_contact(&ContactForm {
            name: "Amira".to_string(),
            email: "amira@example.com".to_string(),
            subject: "Devis".to_string(),
            message: "Bonjour, je souhaite un devis.".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(accepted, Submission::Accepted);
    assert!(!doc.has_attribute(by_id(&doc, "formSuccess"), "hidden"));
    assert!(doc.has_attribute(by_id(&doc, "error-name"), "hidden"));
}

#[tokio::test]
async fn test_scroll_and_menu() {
    let fixture = full_page("/en");
    let doc = fixture.doc.clone();
    let site = Site::builder()
        .document(doc.clone())
        .source(data_source())
        .bootstrap()
        .await
        .unwrap();

    assert_eq!(site.active_section().as_deref(), Some("home"));

    site.on_scroll(800.0, &[("home", -700.0), ("about", 90.0), ("services", 600.0)]);
    assert_eq!(site.active_section().as_deref(), Some("about"));
    assert!(!doc.has_class(by_id(&doc, "backToTop"), "hidden"));

    site.on_scroll(100.0, &[("home", 0.0)]);
    assert!(doc.has_class(by_id(&doc, "backToTop"), "hidden"));

    assert!(site.toggle_menu());
    assert!(site.follow_anchor("#contact").is_some());
    assert!(doc.has_attribute(by_id(&doc, "mobileNav"), "hidden"));

    site.on_hash_change("contact");
    assert_eq!(site.active_section().as_deref(), Some("contact"));
}

#[tokio::test]
async fn test_detach_stops_rerendering() {
    let fixture = full_page("/en");
    let doc = fixture.doc.clone();
    let site = Site::builder()
        .document(doc.clone())
        .source(data_source())
        .bootstrap()
        .await
        .unwrap();
    let i18n = site.i18n().clone();

    assert_eq!(site.detach(), 2);
    assert_eq!(i18n.subscriber_count(), 0);

    i18n.set_active_locale("fr").await.unwrap();
    assert_eq!(doc.text(by_id(&doc, "langBtnLabel")), "EN");
    // Text bindings belong to the i18n context and still follow.
    assert_eq!(doc.text(fixture.title), "Bâtir ce qui dure");
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_layers() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"i18n": {{"storage_key": "site_lang", "url_layout": {{"mode": "nested", "folder": "beehive"}}}}}}"#
    )
    .unwrap();

    // SAFETY: no other test in this binary reads or writes BEEHIVE_ variables.
    unsafe {
        std::env::set_var("BEEHIVE_PAGE__HERO__INTERVAL_MS", "3000");
        std::env::set_var("BEEHIVE_I18N__URL_LAYOUT__FOLDER", "2024");
    }
    let config = SiteConfig::load(Some(file.path()));
    unsafe {
        std::env::remove_var("BEEHIVE_PAGE__HERO__INTERVAL_MS");
        std::env::remove_var("BEEHIVE_I18N__URL_LAYOUT__FOLDER");
    }
    let config = config.unwrap();

    assert_eq!(config.i18n.storage_key, "site_lang");
    assert_eq!(
        config.i18n.url_layout,
        UrlLayout::Nested {
            folder: "2024".to_string()
        }
    );
    assert_eq!(config.i18n.dictionary_path, "data/{locale}.json");
    assert_eq!(config.page.hero.interval_ms, 3000);
    assert_eq!(config.page.hero.images.len(), 3);
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"i18n": {{"dictionary_path": "data/site.json"}}}}"#).unwrap();

    let err = SiteConfig::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}
