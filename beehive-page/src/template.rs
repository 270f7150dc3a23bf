//! Handlebars engine holding the block templates

use crate::{PageError, Result, TemplateConfig, helpers};
use beehive_log::debug;
use handlebars::Handlebars;
use parking_lot::RwLock;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Templates compiled into the crate, by name.
pub const BUILTIN_TEMPLATES: [(&str, &str); 8] = [
    ("about_item", include_str!("../templates/about_item.hbs")),
    ("client_logo", include_str!("../templates/client_logo.hbs")),
    ("company_card", include_str!("../templates/company_card.hbs")),
    ("hero_dot", include_str!("../templates/hero_dot.hbs")),
    ("hero_slide", include_str!("../templates/hero_slide.hbs")),
    ("partners_marquee", include_str!("../templates/partners_marquee.hbs")),
    ("service_card", include_str!("../templates/service_card.hbs")),
    ("team_card", include_str!("../templates/team_card.hbs")),
];

/// Handlebars template engine
#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Arc<RwLock<Handlebars<'static>>>,
    config: TemplateConfig,
}

impl TemplateEngine {
    /// Create an engine with the built-in templates, then any overrides
    /// found in the configured directory.
    pub fn new(config: TemplateConfig) -> Result<Self> {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(config.strict_mode);

        if !config.escape_html {
            handlebars.register_escape_fn(handlebars::no_escape);
        }

        helpers::register_builtin_helpers(&mut handlebars);

        for (name, source) in BUILTIN_TEMPLATES {
            handlebars.register_template_string(name, source)?;
        }

        let engine = Self {
            handlebars: Arc::new(RwLock::new(handlebars)),
            config,
        };

        engine.load_overrides()?;

        Ok(engine)
    }

    fn load_overrides(&self) -> Result<()> {
        let Some(dir) = self.config.dir.clone() else {
            return Ok(());
        };

        if !dir.exists() {
            return Err(PageError::Template(format!(
                "Template directory not found: {:?}",
                dir
            )));
        }

        self.load_templates_from_dir(&dir, &dir)
    }

    /// Load templates from a directory recursively
    fn load_templates_from_dir(&self, root: &Path, dir: &Path) -> Result<()> {
        use std::fs;

        let extension = self.config.extension.trim_start_matches('.');

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                self.load_templates_from_dir(root, &path)?;
            } else if path.extension().is_some_and(|ext| ext == extension) {
                let name = path
                    .strip_prefix(root)
                    .unwrap_or(&path)
                    .with_extension("")
                    .to_string_lossy()
                    .replace('\\', "/");

                let source = fs::read_to_string(&path)?;
                debug!(target: "beehive::page", "template override {}", name);
                self.handlebars.write().register_template_string(&name, source)?;
            }
        }

        Ok(())
    }

    /// Render a registered template with data
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .read()
            .render(template, data)
            .map_err(PageError::from)
    }

    /// Render a template string (not registered)
    pub fn render_template<T: Serialize>(&self, template_str: &str, data: &T) -> Result<String> {
        self.handlebars
            .read()
            .render_template(template_str, data)
            .map_err(PageError::from)
    }

    /// Register or replace a template
    pub fn register_template(&self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .write()
            .register_template_string(name, template)
            .map_err(PageError::from)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.read().has_template(name)
    }

    /// Registered template names, sorted
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlebars.read().get_templates().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("config", &self.config)
            .field("templates", &self.template_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_templates_registered() {
        let engine = TemplateEngine::new(TemplateConfig::default()).unwrap();
        for (name, _) in BUILTIN_TEMPLATES {
            assert!(engine.has_template(name), "missing {}", name);
        }
        assert_eq!(engine.template_names().len(), BUILTIN_TEMPLATES.len());
    }

    #[test]
    fn test_values_are_escaped() {
        let engine = TemplateEngine::new(TemplateConfig::default()).unwrap();
        let html = engine
            .render("about_item", &json!("<script>x</script>"))
            .unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_escape_can_be_disabled() {
        let engine = TemplateEngine::new(TemplateConfig::default().with_escape_html(false)).unwrap();
        let html = engine.render_template("{{v}}", &json!({"v": "<b>x</b>"})).unwrap();
        assert_eq!(html, "<b>x</b>");
    }

    #[test]
    fn test_directory_overrides() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("about_item.hbs"), "<li>{{this}}</li>").unwrap();
        fs::create_dir(temp_dir.path().join("extra")).unwrap();
        fs::write(temp_dir.path().join("extra").join("badge.hbs"), "[{{this}}]").unwrap();

        let engine =
            TemplateEngine::new(TemplateConfig::default().with_dir(temp_dir.path())).unwrap();

        assert_eq!(engine.render("about_item", &json!("ok")).unwrap(), "<li>ok</li>");
        assert_eq!(engine.render("extra/badge", &json!("x")).unwrap(), "[x]");
    }

    #[test]
    fn test_missing_override_dir() {
        let err = TemplateEngine::new(TemplateConfig::default().with_dir("/nonexistent/beehive"))
            .unwrap_err();
        assert!(matches!(err, PageError::Template(_)));
    }

    #[test]
    fn test_strict_mode_rejects_missing_fields() {
        let engine = TemplateEngine::new(TemplateConfig::default().with_strict_mode(true)).unwrap();
        assert!(matches!(
            engine.render_template("{{missing}}", &json!({})),
            Err(PageError::Render(_))
        ));
    }

    #[test]
    fn test_register_template() {
        let engine = TemplateEngine::new(TemplateConfig::default()).unwrap();
        engine.register_template("greeting", "Hi {{name}}").unwrap();
        assert_eq!(
            engine.render("greeting", &json!({"name": "Beehive"})).unwrap(),
            "Hi Beehive"
        );
        assert!(matches!(
            engine.register_template("broken", "{{#if open}}never closed"),
            Err(PageError::Template(_))
        ));
    }
}
