//! Translated content tree for one locale.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The full translated-content tree for one locale.
///
/// Loaded verbatim from JSON and never mutated afterwards. Lookups use
/// dot-separated paths (`hero.kicker`, `services.items`); a numeric segment
/// indexes into an array (`team.members.0.name`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(Value);

impl Dictionary {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a dictionary document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json).map(Self)
    }

    /// The raw tree.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Resolve a dotted path to any value.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        lookup_path(&self.0, path)
    }

    /// Resolve a dotted path to a string leaf.
    pub fn lookup_str(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// Resolve a dotted path to a string leaf that is not empty.
    pub fn lookup_non_empty_str(&self, path: &str) -> Option<&str> {
        self.lookup_str(path).filter(|s| !s.is_empty())
    }

    /// Resolve a dotted path to an array.
    pub fn lookup_array(&self, path: &str) -> Option<&[Value]> {
        self.lookup(path).and_then(Value::as_array).map(Vec::as_slice)
    }
}

impl From<Value> for Dictionary {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Walk `path` segment by segment from `root`.
///
/// Returns `None` as soon as a segment is missing, a container is `null`,
/// or the current value is a leaf.
pub fn lookup_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
