//! Rendered markup for a block, and mounting it into a container.

use crate::{Document, NodeId};
use beehive_i18n::Dictionary;
use serde_json::Value;

/// Ordered rendered nodes of one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    nodes: Vec<String>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: impl Into<String>) {
        self.nodes.push(node.into());
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn to_html(&self) -> String {
        self.nodes.concat()
    }

    /// Replace the children of `container` with this fragment.
    pub fn mount(&self, doc: &dyn Document, container: NodeId) {
        doc.set_inner_html(container, &self.to_html());
    }
}

impl FromIterator<String> for Fragment {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Fragment {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Render each item of the array at `path`, in order.
///
/// A missing path or a non-array value gives an empty fragment.
///
/// ```
/// use beehive_i18n::Dictionary;
/// use beehive_page::render_block;
/// use serde_json::json;
///
/// let dictionary = Dictionary::new(json!({"about": {"list": ["a", "b"]}}));
/// let fragment = render_block(&dictionary, "about.list", |item| {
///     format!("<li>{}</li>", item.as_str().unwrap_or_default())
/// });
/// assert_eq!(fragment.to_html(), "<li>a</li><li>b</li>");
/// ```
pub fn render_block<F>(dictionary: &Dictionary, path: &str, mut template_fn: F) -> Fragment
where
    F: FnMut(&Value) -> String,
{
    dictionary
        .lookup_array(path)
        .map(|items| items.iter().map(&mut template_fn).collect())
        .unwrap_or_default()
}

/// [`render_block`] with a fallible template; the first error aborts.
pub fn try_render_block<F, E>(
    dictionary: &Dictionary,
    path: &str,
    template_fn: F,
) -> Result<Fragment, E>
where
    F: FnMut(&Value) -> Result<String, E>,
{
    match dictionary.lookup_array(path) {
        Some(items) => items.iter().map(template_fn).collect(),
        None => Ok(Fragment::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDocument;
    use serde_json::json;

    fn title(item: &Value) -> String {
        item.get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_renders_in_order() {
        let dictionary = Dictionary::new(json!({
            "services": {"items": [{"title": "A"}, {"title": "B"}, {"title": "C"}]}
        }));
        let fragment = render_block(&dictionary, "services.items", title);
        assert_eq!(fragment.nodes(), ["A", "B", "C"]);
    }

    #[test]
    fn test_absent_or_not_array_is_empty() {
        let dictionary = Dictionary::new(json!({"services": {"items": {"title": "A"}}}));
        assert!(render_block(&dictionary, "services.items", title).is_empty());
        assert!(render_block(&dictionary, "companies.items", title).is_empty());
        assert!(render_block(&Dictionary::default(), "services.items", title).is_empty());
    }

    #[test]
    fn test_try_render_stops_on_error() {
        let dictionary = Dictionary::new(json!({"list": [1, "two", 3]}));
        let result: Result<Fragment, String> = try_render_block(&dictionary, "list", |item| {
            item.as_i64()
                .map(|n| n.to_string())
                .ok_or_else(|| format!("bad item {}", item))
        });
        assert_eq!(result.unwrap_err(), "bad item \"two\"");
    }

    #[test]
    fn test_mount_replaces_children() {
        let doc = MemoryDocument::default();
        let grid = doc.insert_with_id("div", "servicesGrid");
        let dictionary = Dictionary::new(json!({"services": {"items": [{"title": "A"}]}}));

        let fragment = render_block(&dictionary, "services.items", title);
        fragment.mount(&doc, grid);
        fragment.mount(&doc, grid);

        assert_eq!(doc.inner_html(grid), "A");
    }
}
