//! Highlighting the navigation link of the section in view.

use crate::{Document, NodeId};

/// Class put on the active `a.nav-link`.
pub const ACTIVE_CLASS: &str = "is-active";

/// Section selected when nothing else applies.
pub const HOME_SECTION: &str = "home";

/// Visibility of one section as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub id: String,
    pub intersecting: bool,
    /// Visible share of the section, `0.0..=1.0`.
    pub ratio: f64,
}

impl SectionView {
    pub fn new(id: impl Into<String>, intersecting: bool, ratio: f64) -> Self {
        Self {
            id: id.into(),
            intersecting,
            ratio,
        }
    }
}

/// In-page navigation links (`a.nav-link` with `href="#section"`).
#[derive(Debug, Clone)]
pub struct ActiveNav {
    links: Vec<(NodeId, String)>,
    sections: Vec<String>,
    active: Option<String>,
    offset: f64,
}

impl ActiveNav {
    /// Collect the links and the sections they point at. `None` without
    /// links.
    pub fn discover(doc: &dyn Document, offset: f64) -> Option<Self> {
        let links: Vec<(NodeId, String)> = doc
            .elements_with_class("nav-link")
            .into_iter()
            .filter(|node| doc.tag_name(*node).as_deref() == Some("a"))
            .filter_map(|node| {
                let href = doc.attribute(node, "href")?;
                let id = href.strip_prefix('#')?.to_string();
                Some((node, id))
            })
            .collect();

        if links.is_empty() {
            return None;
        }

        let mut sections: Vec<String> = Vec::new();
        for (_, id) in &links {
            if !id.is_empty() && doc.element_by_id(id).is_some() && !sections.contains(id) {
                sections.push(id.clone());
            }
        }

        Some(Self {
            links,
            sections,
            active: None,
            offset,
        })
    }

    /// Section ids the links point at that exist in the document.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Mark the links pointing at `id` and clear the others.
    pub fn set_active(&mut self, doc: &dyn Document, id: &str) {
        for (node, target) in &self.links {
            doc.toggle_class(*node, ACTIVE_CLASS, target == id);
        }
        self.active = Some(id.to_string());
    }

    /// Select from the location hash, or the home section.
    pub fn select_initial(&mut self, doc: &dyn Document, hash: Option<&str>) {
        let id = hash
            .map(|h| h.trim_start_matches('#'))
            .filter(|h| !h.is_empty())
            .unwrap_or(HOME_SECTION)
            .to_string();
        self.set_active(doc, &id);
    }

    /// Hash change: select directly, ignoring an empty hash.
    pub fn on_hash_change(&mut self, doc: &dyn Document, hash: &str) {
        let id = hash.trim_start_matches('#');
        if !id.is_empty() {
            self.set_active(doc, id);
        }
    }

    /// Pick the most visible intersecting section that has a link.
    pub fn on_intersections(
        &mut self,
        doc: &dyn Document,
        entries: &[SectionView],
    ) -> Option<&str> {
        let best = entries
            .iter()
            .filter(|e| e.intersecting)
            .max_by(|a, b| a.ratio.total_cmp(&b.ratio))?;

        if !self.links.iter().any(|(_, id)| *id == best.id) {
            return None;
        }
        let id = best.id.clone();
        self.set_active(doc, &id);
        self.active()
    }

    /// Scroll fallback: the section whose top is closest to the offset,
    /// `home` when no section is measured.
    pub fn on_scroll(&mut self, doc: &dyn Document, tops: &[(&str, f64)]) -> &str {
        let mut active = HOME_SECTION;
        let mut best = f64::INFINITY;
        for (id, top) in tops {
            let distance = (top - self.offset).abs();
            if distance < best {
                best = distance;
                active = *id;
            }
        }
        let active = active.to_string();
        self.set_active(doc, &active);
        self.active().unwrap_or(HOME_SECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDocument;

    fn page() -> (MemoryDocument, Vec<NodeId>) {
        let doc = MemoryDocument::default();
        let links = ["home", "services", "contact"]
            .iter()
            .map(|id| {
                doc.insert_with_id("section", id);
                let href = format!("#{}", id);
                doc.insert("a", &[("class", "nav-link"), ("href", href.as_str())])
            })
            .collect();
        doc.insert("a", &[("class", "nav-link"), ("href", "/en")]);
        doc.insert("span", &[("class", "nav-link"), ("href", "#home")]);
        (doc, links)
    }

    fn active_links(doc: &MemoryDocument, links: &[NodeId]) -> Vec<bool> {
        links.iter().map(|n| doc.has_class(*n, ACTIVE_CLASS)).collect()
    }

    #[test]
    fn test_discover() {
        let (doc, _) = page();
        let nav = ActiveNav::discover(&doc, 120.0).unwrap();
        assert_eq!(nav.sections(), ["home", "services", "contact"]);

        assert!(ActiveNav::discover(&MemoryDocument::default(), 120.0).is_none());
    }

    #[test]
    fn test_initial_selection() {
        let (doc, links) = page();
        let mut nav = ActiveNav::discover(&doc, 120.0).unwrap();

        nav.select_initial(&doc, None);
        assert_eq!(active_links(&doc, &links), vec![true, false, false]);

        nav.select_initial(&doc, Some("#contact"));
        assert_eq!(active_links(&doc, &links), vec![false, false, true]);
    }

    #[test]
    fn test_highest_ratio_wins() {
        let (doc, links) = page();
        let mut nav = ActiveNav::discover(&doc, 120.0).unwrap();

        let active = nav.on_intersections(
            &doc,
            &[
                SectionView::new("home", true, 0.2),
                SectionView::new("services", true, 0.45),
                SectionView::new("contact", false, 0.9),
            ],
        );
        assert_eq!(active, Some("services"));
        assert_eq!(active_links(&doc, &links), vec![false, true, false]);

        assert_eq!(nav.on_intersections(&doc, &[SectionView::new("services", false, 1.0)]), None);
        assert_eq!(nav.on_intersections(&doc, &[SectionView::new("footer", true, 1.0)]), None);
        assert_eq!(nav.active(), Some("services"));
    }

    #[test]
    fn test_hash_change() {
        let (doc, links) = page();
        let mut nav = ActiveNav::discover(&doc, 120.0).unwrap();
        nav.on_hash_change(&doc, "#contact");
        nav.on_hash_change(&doc, "#");
        assert_eq!(active_links(&doc, &links), vec![false, false, true]);
    }

    #[test]
    fn test_scroll_fallback() {
        let (doc, links) = page();
        let mut nav = ActiveNav::discover(&doc, 120.0).unwrap();

        let active = nav.on_scroll(&doc, &[("home", -900.0), ("services", 140.0), ("contact", 700.0)]);
        assert_eq!(active, "services");
        assert_eq!(active_links(&doc, &links), vec![false, true, false]);

        assert_eq!(nav.on_scroll(&doc, &[]), "home");
    }
}
