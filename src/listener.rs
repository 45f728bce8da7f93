//! Listener registration and notification
//!
//! Listeners are notified synchronously after each successful dispatch,
//! in registration order. The registry hands out stable ids instead of
//! slot indices, so disposal is immune to the registry shifting under it.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::types::ListenerId;

/// Trait for observing dispatched actions
///
/// Implementations take `&self`: a listener that accumulates does so via
/// interior mutability, which keeps broadcast free of per-listener locks.
/// Plain closures of shape `Fn(&Value)` implement this automatically.
pub trait ActionListener: Send + Sync {
    /// Called with each action after it has been recorded
    fn on_action(&self, action: &Value);
}

impl<F> ActionListener for F
where
    F: Fn(&Value) + Send + Sync,
{
    fn on_action(&self, action: &Value) {
        self(action)
    }
}

/// A listener that buffers every action it sees
///
/// Cloning shares the buffer: keep one handle for assertions and
/// subscribe the other.
#[derive(Clone, Default)]
pub struct CollectingListener {
    recorded: Arc<Mutex<Vec<Value>>>,
}

impl CollectingListener {
    /// Create a new collecting listener with an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything seen so far
    pub fn recorded(&self) -> Vec<Value> {
        self.recorded.lock().clone()
    }

    /// Take the buffered actions, leaving the buffer empty
    pub fn take(&self) -> Vec<Value> {
        std::mem::take(&mut *self.recorded.lock())
    }

    /// Drop everything buffered
    pub fn clear(&self) {
        self.recorded.lock().clear();
    }

    /// Number of buffered actions
    pub fn len(&self) -> usize {
        self.recorded.lock().len()
    }

    /// Check if nothing has been seen yet
    pub fn is_empty(&self) -> bool {
        self.recorded.lock().is_empty()
    }
}

impl ActionListener for CollectingListener {
    fn on_action(&self, action: &Value) {
        self.recorded.lock().push(action.clone());
    }
}

/// Ordered registry of listeners keyed by stable id
///
/// Iteration order is id order, and ids are monotonic, so iteration
/// order is registration order.
pub(crate) struct ListenerSet {
    entries: Mutex<BTreeMap<ListenerId, Arc<dyn ActionListener>>>,
}

impl ListenerSet {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Register a listener, returning its stable id
    pub(crate) fn insert(&self, listener: Arc<dyn ActionListener>) -> ListenerId {
        let id = ListenerId::new();
        self.entries.lock().insert(id, listener);
        id
    }

    /// Remove by id. Removing an id that is absent (or already removed)
    /// is a no-op returning false; ids are never reused, so this cannot
    /// hit a recycled slot.
    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        self.entries.lock().remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Snapshot the registry in registration order
    ///
    /// Broadcast iterates the snapshot with the registry lock released,
    /// so listeners may subscribe or unsubscribe mid-broadcast. A
    /// listener added mid-broadcast first fires on the next dispatch.
    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn ActionListener>> {
        self.entries.lock().values().cloned().collect()
    }
}
