//! Collaborators standing in for the browser document and location.

use crate::{Dictionary, I18nError, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Document root and visible location.
pub trait PageHost: Send + Sync {
    /// Current location path (`/site/ar`).
    fn pathname(&self) -> String;

    /// Replace the visible path without adding a history entry.
    fn replace_path(&self, path: &str) -> Result<()>;

    /// Set an attribute on the document root element (`dir`, `lang`).
    fn set_root_attribute(&self, name: &str, value: &str);
}

/// Applies dictionary text to the page after every locale change.
pub trait TextBinder: Send + Sync {
    fn apply(&self, dictionary: &Dictionary);
}

/// In-memory [`PageHost`].
#[derive(Debug)]
pub struct MemoryHost {
    path: RwLock<String>,
    root_attributes: RwLock<BTreeMap<String, String>>,
    replaced: Mutex<Vec<String>>,
    history_blocked: AtomicBool,
}

impl MemoryHost {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: RwLock::new(path.into()),
            root_attributes: RwLock::default(),
            replaced: Mutex::default(),
            history_blocked: AtomicBool::new(false),
        }
    }

    /// Make every `replace_path` fail, as a sandboxed frame would.
    pub fn block_history(&self, blocked: bool) {
        self.history_blocked.store(blocked, Ordering::SeqCst);
    }

    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attributes.read().get(name).cloned()
    }

    /// Every path passed to a successful `replace_path`, oldest first.
    pub fn replaced_paths(&self) -> Vec<String> {
        self.replaced.lock().clone()
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new("/")
    }
}

impl PageHost for MemoryHost {
    fn pathname(&self) -> String {
        self.path.read().clone()
    }

    fn replace_path(&self, path: &str) -> Result<()> {
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
        self.root_attributes
            .write()
            .insert(name.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_path_records() {
        let host = MemoryHost::new("/ar");
        host.replace_path("/en").unwrap();
        assert_eq!(host.pathname(), "/en");
        assert_eq!(host.replaced_paths(), vec!["/en".to_string()]);
    }

    #[test]
    fn test_blocked_history() {
        let host = MemoryHost::default();
        host.block_history(true);
        assert!(matches!(host.replace_path("/fr"), Err(I18nError::Navigation(_))));
        assert_eq!(host.pathname(), "/");
    }

    #[test]
    fn test_root_attributes() {
        let host = MemoryHost::default();
        host.set_root_attribute("dir", "rtl");
        assert_eq!(host.root_attribute("dir").as_deref(), Some("rtl"));
        assert_eq!(host.root_attribute("lang"), None);
    }
}
