//! The mock container
//!
//! A mock store validates and records every dispatched action instead of
//! reducing it into state. Tests read the log back, subscribe listeners,
//! and wrap the dispatch path in middleware exactly as they would around
//! a real store; the only thing missing is the reducer, and asking for
//! one is refused.

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

use crate::accessor::StateAccessor;
use crate::action;
use crate::error::{Result, StoreError};
use crate::listener::{ActionListener, ListenerSet};
use crate::middleware::{DispatchChain, Middleware};
use crate::types::ListenerId;

/// Container bookkeeping plus the terminal dispatch
///
/// Owns the action log and the listener set exclusively; everything else
/// reaches them through the operations here.
pub(crate) struct StoreCore {
    accessor: StateAccessor,
    actions: Mutex<Vec<Value>>,
    listeners: ListenerSet,
}

impl StoreCore {
    pub(crate) fn new(accessor: StateAccessor) -> Self {
        Self {
            accessor,
            actions: Mutex::new(Vec::new()),
            listeners: ListenerSet::new(),
        }
    }

    /// Resolve the state view against the current log
    pub(crate) fn state(&self) -> Value {
        let snapshot = self.actions.lock().clone();
        self.accessor.resolve(&snapshot)
    }

    /// Cloned snapshot of the action log, in dispatch order
    pub(crate) fn actions(&self) -> Vec<Value> {
        self.actions.lock().clone()
    }

    pub(crate) fn action_count(&self) -> usize {
        self.actions.lock().len()
    }

    /// Empty the log in one critical section, so no dispatch can observe
    /// it half-cleared
    pub(crate) fn clear_actions(&self) {
        self.actions.lock().clear();
        tracing::debug!("action log cleared");
    }

    pub(crate) fn subscribe(&self, listener: Arc<dyn ActionListener>) -> ListenerId {
        let id = self.listeners.insert(listener);
        tracing::debug!(%id, "listener subscribed");
        id
    }

    pub(crate) fn unsubscribe(&self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(id);
        if removed {
            tracing::debug!(%id, "listener unsubscribed");
        }
        removed
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Terminal dispatch: validate, record, broadcast, echo
    ///
    /// Listeners registered at the start of the broadcast run in
    /// registration order. A panicking listener is not caught: it unwinds
    /// through `dispatch` and later listeners do not run. Listeners
    /// registered during the broadcast first fire on the next dispatch.
    pub(crate) fn raw_dispatch(&self, action: Value) -> Result<Value> {
        action::check_shape(&action)?;

        self.actions.lock().push(action.clone());
        tracing::trace!(action = %action, "action recorded");

        for listener in self.listeners.snapshot() {
            listener.on_action(&action);
        }

        Ok(action)
    }
}

/// Reusable store configuration: the middleware list
///
/// Configure once per test module, then mint a fresh container per test.
/// Stores minted from one factory share nothing but the middleware
/// `Arc`s; each gets its own log and listener set.
#[derive(Clone, Default)]
pub struct StoreFactory {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl StoreFactory {
    /// Factory with an empty middleware chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory wrapping the given middleware, outermost first
    pub fn with_middlewares(middlewares: Vec<Arc<dyn Middleware>>) -> Self {
        Self { middlewares }
    }

    /// Append a middleware to the chain
    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Mint a fresh store over the given state accessor
    pub fn store(&self, accessor: impl Into<StateAccessor>) -> MockStore {
        let core = Arc::new(StoreCore::new(accessor.into()));
        let chain = Arc::new(DispatchChain::new(self.middlewares.clone(), core));
        MockStore { chain }
    }
}

/// Mock store: records dispatched actions instead of reducing them
///
/// Cloning yields another handle onto the same container.
#[derive(Clone)]
pub struct MockStore {
    chain: Arc<DispatchChain>,
}

impl MockStore {
    /// Store with no middleware
    pub fn new(accessor: impl Into<StateAccessor>) -> Self {
        StoreFactory::new().store(accessor)
    }

    /// Current state view: the snapshot, or the derived accessor applied
    /// to the log
    pub fn state(&self) -> Value {
        self.core().state()
    }

    /// Dispatch an action through the middleware chain
    ///
    /// Returns the validated action, unless a middleware short-circuited
    /// with a different value, in which case that value comes back
    /// unmodified.
    pub fn dispatch(&self, action: Value) -> Result<Value> {
        DispatchChain::enter(&self.chain, action)
    }

    /// Cloned snapshot of every recorded action, in dispatch order
    pub fn actions(&self) -> Vec<Value> {
        self.core().actions()
    }

    /// Number of recorded actions
    pub fn action_count(&self) -> usize {
        self.core().action_count()
    }

    /// Empty the action log
    pub fn clear_actions(&self) {
        self.core().clear_actions();
    }

    /// Register a listener; returns its stable id
    ///
    /// Listeners fire synchronously on each successful dispatch, in
    /// registration order.
    pub fn subscribe<L>(&self, listener: L) -> ListenerId
    where
        L: ActionListener + 'static,
    {
        self.core().subscribe(Arc::new(listener))
    }

    /// Remove a listener by id
    ///
    /// Returns whether anything was removed. Calling it again for the
    /// same id is a no-op returning false, never an error.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.core().unsubscribe(id)
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.core().listener_count()
    }

    /// A mock store has no reducer to replace; this always fails
    pub fn replace_reducer<R>(&self, _next_reducer: R) -> Result<()>
    where
        R: Fn(Value, &Value) -> Value,
    {
        Err(StoreError::UnsupportedOperation {
            operation: "replace the reducer",
            hint: "derive state by passing an accessor function to the store factory instead",
        })
    }

    fn core(&self) -> &StoreCore {
        self.chain.core()
    }
}
