//! Page chrome: loader, back-to-top button, mobile menu, language switcher.

use crate::{Document, NodeId};
use beehive_i18n::Locale;

/// Hide the `pageLoader` overlay. Returns whether it was present.
pub fn hide_loader(doc: &dyn Document) -> bool {
    let Some(loader) = doc.element_by_id("pageLoader") else {
        return false;
    };
    doc.set_attribute(loader, "style", "display: none");
    true
}

/// `backToTop` button shown once the page is scrolled past a threshold.
#[derive(Debug, Clone, Copy)]
pub struct BackToTop {
    button: NodeId,
    threshold: f64,
}

impl BackToTop {
    pub fn attach(doc: &dyn Document, threshold: f64) -> Option<Self> {
        let button = doc.element_by_id("backToTop")?;
        Some(Self { button, threshold })
    }

    /// Returns whether the button is now visible.
    pub fn on_scroll(&self, doc: &dyn Document, scroll_y: f64) -> bool {
        let visible = scroll_y > self.threshold;
        doc.toggle_class(self.button, "hidden", !visible);
        doc.toggle_class(self.button, "flex", visible);
        visible
    }

    pub fn is_visible(&self, doc: &dyn Document) -> bool {
        !doc.has_class(self.button, "hidden")
    }
}

/// `menuBtn` toggling the `mobileNav` panel.
#[derive(Debug, Clone, Copy)]
pub struct MobileMenu {
    button: NodeId,
    panel: NodeId,
}

impl MobileMenu {
    pub fn attach(doc: &dyn Document) -> Option<Self> {
        Some(Self {
            button: doc.element_by_id("menuBtn")?,
            panel: doc.element_by_id("mobileNav")?,
        })
    }

    pub fn is_open(&self, doc: &dyn Document) -> bool {
        !doc.has_attribute(self.panel, "hidden")
    }

    /// Returns whether the menu is open afterwards.
    pub fn toggle(&self, doc: &dyn Document) -> bool {
        if self.is_open(doc) {
            self.close(doc);
            false
        } else {
            doc.remove_attribute(self.panel, "hidden");
            doc.set_attribute(self.button, "aria-expanded", "true");
            true
        }
    }

    pub fn close(&self, doc: &dyn Document) {
        doc.set_attribute(self.panel, "hidden", "");
        doc.set_attribute(self.button, "aria-expanded", "false");
    }
}

/// Follow an in-page anchor (`#services`): closes the mobile menu and
/// returns the target section, or `None` for an empty or unknown anchor.
pub fn follow_anchor(doc: &dyn Document, href: &str) -> Option<NodeId> {
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    let target = doc.element_by_id(id)?;
    if let Some(menu) = MobileMenu::attach(doc)
        && menu.is_open(doc)
    {
        menu.close(doc);
    }
    Some(target)
}

/// Language buttons, select and dropdown.
#[derive(Debug, Clone, Default)]
pub struct LanguageSwitcher {
    buttons: Vec<NodeId>,
    select: Option<NodeId>,
    label: Option<NodeId>,
    toggle: Option<NodeId>,
    menu: Option<NodeId>,
}

impl LanguageSwitcher {
    pub fn attach(doc: &dyn Document) -> Self {
        Self {
            buttons: doc.elements_with_class("lang-btn"),
            select: doc.element_by_id("langSelect"),
            label: doc.element_by_id("langBtnLabel"),
            toggle: doc.element_by_id("langBtn"),
            menu: doc.element_by_id("langMenu"),
        }
    }

    /// Locale requested by a `.lang-btn` or `.lang-option` element.
    pub fn requested_locale(doc: &dyn Document, node: NodeId) -> Option<String> {
        doc.attribute(node, "data-lang").filter(|lang| !lang.is_empty())
    }

    pub fn is_menu_open(&self, doc: &dyn Document) -> bool {
        self.toggle
            .and_then(|t| doc.attribute(t, "aria-expanded"))
            .is_some_and(|v| v == "true")
    }

    pub fn toggle_menu(&self, doc: &dyn Document) {
        if self.is_menu_open(doc) {
            self.close_menu(doc);
        } else if let (Some(toggle), Some(menu)) = (self.toggle, self.menu) {
            doc.toggle_class(menu, "hidden", false);
            doc.set_attribute(toggle, "aria-expanded", "true");
        }
    }

    pub fn close_menu(&self, doc: &dyn Document) {
        if let (Some(toggle), Some(menu)) = (self.toggle, self.menu) {
            doc.toggle_class(menu, "hidden", true);
            doc.set_attribute(toggle, "aria-expanded", "false");
        }
    }

    /// Show `locale` as the active language everywhere and close the menu.
    pub fn reflect(&self, doc: &dyn Document, locale: Locale) {
        for button in &self.buttons {
            let active = doc.attribute(*button, "data-lang").as_deref() == Some(locale.code());
            doc.toggle_class(*button, "bg-black/5", active);
            doc.toggle_class(*button, "text-ink-900", active);
            doc.toggle_class(*button, "text-ink-900/70", !active);
            doc.set_attribute(*button, "aria-pressed", if active { "true" } else { "false" });
        }

        if let Some(select) = self.select
            && doc.attribute(select, "value").as_deref() != Some(locale.code())
        {
            doc.set_attribute(select, "value", locale.code());
        }

        if let Some(label) = self.label {
            doc.set_text(label, &locale.code().to_uppercase());
        }

        self.close_menu(doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDocument;

    #[test]
    fn test_loader() {
        let doc = MemoryDocument::default();
        assert!(!hide_loader(&doc));
        let loader = doc.insert_with_id("div", "pageLoader");
        assert!(hide_loader(&doc));
        assert_eq!(doc.attribute(loader, "style").as_deref(), Some("display: none"));
    }

    #[test]
    fn test_back_to_top() {
        let doc = MemoryDocument::default();
        doc.insert("button", &[("id", "backToTop"), ("class", "hidden")]);
        let button = BackToTop::attach(&doc, 500.0).unwrap();

        assert!(!button.on_scroll(&doc, 500.0));
        assert!(!button.is_visible(&doc));
        assert!(button.on_scroll(&doc, 501.0));
        assert!(button.is_visible(&doc));
        assert!(!button.on_scroll(&doc, 0.0));
    }

    #[test]
    fn test_mobile_menu() {
        let doc = MemoryDocument::default();
        let btn = doc.insert("button", &[("id", "menuBtn"), ("aria-expanded", "false")]);
        doc.insert("nav", &[("id", "mobileNav"), ("hidden", "")]);
        doc.insert_with_id("section", "services");
        let menu = MobileMenu::attach(&doc).unwrap();

        assert!(menu.toggle(&doc));
        assert_eq!(doc.attribute(btn, "aria-expanded").as_deref(), Some("true"));

        assert!(follow_anchor(&doc, "#services").is_some());
        assert!(!menu.is_open(&doc));
        assert_eq!(doc.attribute(btn, "aria-expanded").as_deref(), Some("false"));

        assert!(follow_anchor(&doc, "#").is_none());
        assert!(follow_anchor(&doc, "#nowhere").is_none());
    }

    #[test]
    fn test_language_switcher_reflects_locale() {
        let doc = MemoryDocument::default();
        let en = doc.insert("button", &[("class", "lang-btn"), ("data-lang", "en")]);
        let ar = doc.insert("button", &[("class", "lang-btn bg-black/5"), ("data-lang", "ar")]);
        let select = doc.insert("select", &[("id", "langSelect"), ("value", "fr")]);
        let label = doc.insert_with_id("span", "langBtnLabel");
        let toggle = doc.insert("button", &[("id", "langBtn"), ("aria-expanded", "false")]);
        let menu = doc.insert("div", &[("id", "langMenu"), ("class", "hidden")]);

        let switcher = LanguageSwitcher::attach(&doc);
        switcher.toggle_menu(&doc);
        assert!(!doc.has_class(menu, "hidden"));
        assert!(switcher.is_menu_open(&doc));

        switcher.reflect(&doc, Locale::En);

        assert!(doc.has_class(en, "bg-black/5"));
        assert_eq!(doc.attribute(en, "aria-pressed").as_deref(), Some("true"));
        assert!(!doc.has_class(ar, "bg-black/5"));
        assert!(doc.has_class(ar, "text-ink-900/70"));
        assert_eq!(doc.attribute(ar, "aria-pressed").as_deref(), Some("false"));
        assert_eq!(doc.attribute(select, "value").as_deref(), Some("en"));
        assert_eq!(doc.text(label), "EN");
        assert!(doc.has_class(menu, "hidden"));
        assert_eq!(doc.attribute(toggle, "aria-expanded").as_deref(), Some("false"));
        assert_eq!(LanguageSwitcher::requested_locale(&doc, ar).as_deref(), Some("ar"));
    }

    #[test]
    fn test_language_switcher_without_elements() {
        let doc = MemoryDocument::default();
        let switcher = LanguageSwitcher::attach(&doc);
        switcher.reflect(&doc, Locale::Ar);
        switcher.toggle_menu(&doc);
        assert!(!switcher.is_menu_open(&doc));
    }
}
