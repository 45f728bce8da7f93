//! Middleware composition
//!
//! Middleware nest around the terminal dispatch in list order. Each
//! middleware is handed a [`StoreRef`] facade whose `dispatch` is bound
//! to the top of the composed chain, not to the next stage: a follow-up
//! action dispatched from inside a middleware runs the full pipeline
//! again, including the middleware that sent it. This is what lets
//! deferred-work and action-creator style middleware feed their output
//! back through the same pipeline the original action took.

use serde_json::Value;
use std::sync::Arc;

use crate::error::Result;
use crate::store::StoreCore;

/// A composable stage in the dispatch pipeline
///
/// A middleware may inspect or transform the action and forward it with
/// `next.call(action)`, short-circuit by returning without calling
/// `next`, or send a new action through the whole chain with
/// `store.dispatch(action)`. Whatever it returns flows up to the
/// `dispatch` caller unmodified.
pub trait Middleware: Send + Sync {
    /// Process one action at this stage of the pipeline
    fn handle(&self, store: &StoreRef, next: Next<'_>, action: Value) -> Result<Value>;
}

/// The composed dispatch pipeline: middleware in list order around the
/// terminal dispatch
pub(crate) struct DispatchChain {
    middlewares: Vec<Arc<dyn Middleware>>,
    core: Arc<StoreCore>,
}

impl DispatchChain {
    pub(crate) fn new(middlewares: Vec<Arc<dyn Middleware>>, core: Arc<StoreCore>) -> Self {
        Self { middlewares, core }
    }

    pub(crate) fn core(&self) -> &StoreCore {
        &self.core
    }

    /// Enter the pipeline at the top
    ///
    /// The facade is wired here, once per entry, so its `dispatch` always
    /// re-enters the composed chain. An empty middleware list falls
    /// straight through to the terminal dispatch.
    pub(crate) fn enter(chain: &Arc<Self>, action: Value) -> Result<Value> {
        let store = StoreRef {
            chain: Arc::clone(chain),
        };
        chain.run(0, &store, action)
    }

    /// Run the chain from `index` inward; past the last middleware sits
    /// the terminal dispatch
    fn run(&self, index: usize, store: &StoreRef, action: Value) -> Result<Value> {
        match self.middlewares.get(index) {
            Some(middleware) => {
                let next = Next {
                    chain: self,
                    store,
                    index: index + 1,
                };
                middleware.handle(store, next, action)
            }
            None => self.core.raw_dispatch(action),
        }
    }
}

/// Facade handed to middleware
///
/// `dispatch` re-enters the top of the composed chain; `state` reads the
/// container's state view. The facade is cheap to clone and owns no
/// borrowed data, so caller-driven deferred work can hold one and
/// dispatch later.
#[derive(Clone)]
pub struct StoreRef {
    chain: Arc<DispatchChain>,
}

impl StoreRef {
    /// Dispatch through the full pipeline, middleware included
    pub fn dispatch(&self, action: Value) -> Result<Value> {
        DispatchChain::enter(&self.chain, action)
    }

    /// Current state view
    pub fn state(&self) -> Value {
        self.chain.core().state()
    }
}

/// The remainder of the pipeline from a middleware's position
pub struct Next<'a> {
    chain: &'a DispatchChain,
    store: &'a StoreRef,
    index: usize,
}

impl Next<'_> {
    /// Forward the action to the next stage, ultimately the terminal
    /// dispatch
    pub fn call(&self, action: Value) -> Result<Value> {
        self.chain.run(self.index, self.store, action)
    }
}

/// Middleware that logs each action flowing through it at debug level
/// and forwards it unchanged
pub struct TraceMiddleware;

impl Middleware for TraceMiddleware {
    fn handle(&self, _store: &StoreRef, next: Next<'_>, action: Value) -> Result<Value> {
        tracing::debug!(action = %action, "action passing through");
        next.call(action)
    }
}
