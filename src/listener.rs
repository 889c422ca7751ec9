//! Multi-listener fan-out registry.
//!
//! An ordered collection of callback handles that can be registered and
//! unregistered at any time, including from inside a notification: the
//! registry snapshots its entries before notifying, so mutation during
//! iteration never deadlocks or skips.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Notified when the owning connection leaves the ready state.
///
/// Notification is a pure event: it carries no error and fires exactly once
/// per connection teardown.
pub trait DisconnectListener: Send + Sync {
    fn on_disconnect(&self);
}

impl<F> DisconnectListener for F
where
    F: Fn() + Send + Sync,
{
    fn on_disconnect(&self) {
        self()
    }
}

/// Identifies one registration so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered registry of shared listeners.
///
/// Registration order is notification order. The critical section covers
/// only the entry list, never the callbacks themselves.
pub struct MultiListener<L: ?Sized> {
    entries: Mutex<Vec<(ListenerId, Arc<L>)>>,
    next_id: AtomicU64,
}

impl<L: ?Sized> MultiListener<L> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Add a listener; returns the id used to unregister it.
    pub fn register(&self, listener: Arc<L>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, listener));
        id
    }

    /// Remove a previously registered listener. Returns false when the id is
    /// unknown (already removed, or never registered here).
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the current listeners in registration order. Notify from
    /// the snapshot, never while holding the registry: listeners may
    /// register or unregister during their own notification.
    pub fn snapshot(&self) -> Vec<Arc<L>> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

impl<L: ?Sized> Default for MultiListener<L> {
    fn default() -> Self {
        Self::new()
    }
}
