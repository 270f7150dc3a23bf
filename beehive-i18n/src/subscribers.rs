//! Locale change notification.

use crate::{Dictionary, Locale};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Payload delivered to subscribers after a successful locale change.
#[derive(Debug, Clone)]
pub struct LocaleChange {
    pub locale: Locale,
    pub dictionary: Arc<Dictionary>,
}

type Callback = Arc<dyn Fn(&LocaleChange) + Send + Sync>;

#[derive(Default)]
pub(crate) struct SubscriberList {
    next_id: AtomicU64,
    entries: RwLock<Vec<(u64, Callback)>>,
}

impl SubscriberList {
    pub(crate) fn add(self: &Arc<Self>, callback: Callback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.entries.write().push((id, callback));
        Subscription {
            id,
            list: Arc::downgrade(self),
        }
    }

    fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Call every subscriber in registration order.
    ///
    /// Works on a snapshot so callbacks may subscribe or unsubscribe.
    pub(crate) fn notify(&self, change: &LocaleChange) {
        let snapshot: Vec<Callback> = self
            .entries
            .read()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        for callback in snapshot {
            callback(change);
        }
    }
}

/// Handle returned by `on_locale_change`.
///
/// Dropping the handle keeps the subscription alive; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    list: Weak<SubscriberList>,
}

impl Subscription {
    /// Remove the subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(self) -> bool {
        self.list
            .upgrade()
            .map(|list| list.remove(self.id))
            .unwrap_or(false)
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl std::fmt::Debug for SubscriberList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberList")
            .field("len", &self.len())
            .finish()
    }
}
