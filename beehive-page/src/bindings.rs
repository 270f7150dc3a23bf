//! Text substitution through marker attributes.

use crate::Document;
use beehive_i18n::Dictionary;

/// Marker attribute kinds and where their value lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `data-i18n`: element text.
    Text,
    /// `data-i18n-content`: `content` attribute.
    Content,
    /// `data-i18n-placeholder`: `placeholder` attribute.
    Placeholder,
}

impl BindingKind {
    pub const ALL: [BindingKind; 3] = [
        BindingKind::Text,
        BindingKind::Content,
        BindingKind::Placeholder,
    ];

    pub fn marker(&self) -> &'static str {
        match self {
            BindingKind::Text => "data-i18n",
            BindingKind::Content => "data-i18n-content",
            BindingKind::Placeholder => "data-i18n-placeholder",
        }
    }

    fn write(&self, doc: &dyn Document, node: crate::NodeId, value: &str) {
        match self {
            BindingKind::Text => doc.set_text(node, value),
            BindingKind::Content => doc.set_attribute(node, "content", value),
            BindingKind::Placeholder => doc.set_attribute(node, "placeholder", value),
        }
    }
}

/// Outcome of one [`apply_bindings`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingReport {
    /// Targets whose path resolved to a string and were overwritten.
    pub applied: usize,
    /// Targets left as they were.
    pub skipped: usize,
}

impl BindingReport {
    pub fn total(&self) -> usize {
        self.applied + self.skipped
    }
}

/// Overwrite every marked element whose path resolves to a string.
///
/// Missing keys, non-string leaves and malformed trees are skipped; this
/// never fails.
pub fn apply_bindings(doc: &dyn Document, dictionary: &Dictionary) -> BindingReport {
    let mut report = BindingReport::default();

    for kind in BindingKind::ALL {
        for node in doc.elements_with_attribute(kind.marker()) {
            let value = doc
                .attribute(node, kind.marker())
                .and_then(|path| dictionary.lookup_str(&path).map(str::to_string));

            match value {
                Some(value) => {
                    kind.write(doc, node, &value);
                    report.applied += 1;
                }
                None => report.skipped += 1,
            }
        }
    }

    report
}
