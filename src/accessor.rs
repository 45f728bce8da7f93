//! State accessors
//!
//! A mock store never computes state. What `state()` returns is fixed at
//! construction: either a static snapshot, or a function deriving a view
//! from the actions recorded so far.

use serde_json::Value;

/// Caller-supplied source for the store's state view
///
/// The derived form receives the current action log on every read, which
/// lets a test compute a state view from what was dispatched without any
/// reducer running. Accessors are fixed at construction; dispatch never
/// mutates them.
pub enum StateAccessor {
    /// Fixed snapshot, returned cloned on every read
    Snapshot(Value),
    /// View derived from the recorded actions
    Derived(Box<dyn Fn(&[Value]) -> Value + Send + Sync>),
}

impl StateAccessor {
    /// Accessor deriving its view from the action log
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Derived(Box::new(f))
    }

    /// Resolve the current state view against the given log
    pub(crate) fn resolve(&self, actions: &[Value]) -> Value {
        match self {
            Self::Snapshot(value) => value.clone(),
            Self::Derived(derive) => derive(actions),
        }
    }
}

/// Defaults to an empty record, matching a store configured with no state
impl Default for StateAccessor {
    fn default() -> Self {
        Self::Snapshot(Value::Object(Default::default()))
    }
}

impl From<Value> for StateAccessor {
    fn from(value: Value) -> Self {
        Self::Snapshot(value)
    }
}
