//! The document the page binder writes to.
//!
//! [`Document`] is the seam between page logic and whatever owns the real
//! markup. [`MemoryDocument`] is a flat element table used headlessly and in
//! tests; it also acts as the i18n [`PageHost`].

use beehive_i18n::{I18nError, PageHost};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Handle to an element of a [`Document`].
pub type NodeId = usize;

/// Element queries and mutations needed by the page behaviors.
pub trait Document: Send + Sync {
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Every element carrying `name`, in document order.
    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId>;

    fn tag_name(&self, node: NodeId) -> Option<String>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&self, node: NodeId, name: &str, value: &str);

    fn remove_attribute(&self, node: NodeId, name: &str);

    fn text(&self, node: NodeId) -> String;

    fn set_text(&self, node: NodeId, text: &str);

    fn inner_html(&self, node: NodeId) -> String;

    /// Replace every child of `node` with `html`.
    fn set_inner_html(&self, node: NodeId, html: &str);

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.elements_with_attribute("class")
            .into_iter()
            .filter(|node| self.has_class(*node, class))
            .collect()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Add `class` when `on`, remove it otherwise.
    fn toggle_class(&self, node: NodeId, class: &str, on: bool) {
        let current = self.attribute(node, "class").unwrap_or_default();
        let mut classes: Vec<&str> = current
            .split_whitespace()
            .filter(|c| *c != class)
            .collect();
        if on {
            classes.push(class);
        }
        self.set_attribute(node, "class", &classes.join(" "));
    }
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    inner_html: String,
}

/// In-memory [`Document`] and [`PageHost`].
///
/// Node 0 is the `html` root element.
///
/// ```
/// use beehive_page::{Document, MemoryDocument};
///
/// let doc = MemoryDocument::new("/fr");
/// let title = doc.insert("h1", &[("data-i18n", "hero.title")]);
/// doc.set_text(title, "Bonjour");
/// assert_eq!(doc.text(title), "Bonjour");
/// ```
#[derive(Debug)]
pub struct MemoryDocument {
    elements: RwLock<Vec<Element>>,
    path: RwLock<String>,
    replaced: Mutex<Vec<String>>,
    history_blocked: AtomicBool,
}

impl MemoryDocument {
    pub const ROOT: NodeId = 0;

    pub fn new(path: impl Into<String>) -> Self {
        let root = Element {
            tag: "html".to_string(),
            ..Element::default()
        };
        Self {
            elements: RwLock::new(vec![root]),
            path: RwLock::new(path.into()),
            replaced: Mutex::default(),
            history_blocked: AtomicBool::new(false),
        }
    }

    /// Append an element with the given attributes.
    pub fn insert(&self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let element = Element {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Element::default()
        };
        let mut elements = self.elements.write();
        elements.push(element);
        elements.len() - 1
    }

    /// Append an element with an `id`.
    pub fn insert_with_id(&self, tag: &str, id: &str) -> NodeId {
        self.insert(tag, &[("id", id)])
    }

    pub fn len(&self) -> usize {
        self.elements.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every `replace_path` fail.
    pub fn block_history(&self, blocked: bool) {
        self.history_blocked.store(blocked, Ordering::SeqCst);
    }

    pub fn replaced_paths(&self) -> Vec<String> {
        self.replaced.lock().clone()
    }

    /// Attribute of the root element.
    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.attribute(Self::ROOT, name)
    }

    fn with_element<R>(&self, node: NodeId, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        self.elements.write().get_mut(node).map(f)
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Document for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .read()
            .iter()
            .position(|e| e.attributes.get("id").is_some_and(|v| v == id))
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.elements
            .read()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.attributes.contains_key(name))
            .map(|(node, _)| node)
            .collect()
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.elements.read().get(node).map(|e| e.tag.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.elements
            .read()
            .get(node)
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.with_element(node, |e| {
            e.attributes.insert(name.to_string(), value.to_string())
        });
    }

    fn remove_attribute(&self, node: NodeId, name: &str) {
        self.with_element(node, |e| e.attributes.remove(name));
    }

    fn text(&self, node: NodeId) -> String {
        self.elements
            .read()
            .get(node)
            .map(|e| e.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&self, node: NodeId, text: &str) {
        self.with_element(node, |e| {
            e.text = text.to_string();
            e.inner_html.clear();
        });
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.elements
            .read()
            .get(node)
            .map(|e| e.inner_html.clone())
            .unwrap_or_default()
    }

    fn set_inner_html(&self, node: NodeId, html: &str) {
        self.with_element(node, |e| {
            e.inner_html = html.to_string();
            e.text.clear();
        });
    }
}

impl PageHost for MemoryDocument {
    fn pathname(&self) -> String {
        self.path.read().clone()
    }

    fn replace_path(&self, path: &str) -> beehive_i18n::Result<()> {
        if self.history_blocked.load(Ordering::SeqCst) {
            return Err(I18nError::Navigation(format!(
                "history is not writable (wanted {})",
                path
            )));
        }
        *self.path.write() = path.to_string();
        self.replaced.lock().push(path.to_string());
        Ok(())
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        self.set_attribute(Self::ROOT, name, value);
    }
}
