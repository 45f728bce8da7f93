//! Understudy - a mock store for action-dispatch testing
//!
//! An understudy learns the lead's part but never performs the show.
//! This store stands in for a real action-dispatching state container in
//! tests: it accepts dispatches through a middleware chain, validates
//! and records each action, and notifies listeners - but it runs no
//! reducer and computes no state. Tests assert on the recorded action
//! sequence instead of on state transitions.
//!
//! # Architecture
//!
//! ```text
//! dispatch(action)
//!       │
//!       ▼
//! ┌─────────────────────────────────────────────┐
//! │ DispatchChain (middleware, outermost first) │
//! │   mw[0] ─▶ mw[1] ─▶ ... ─▶ raw dispatch     │◀─┐
//! └─────────────────────────────────────────────┘  │
//!       each middleware holds a StoreRef whose ────┘
//!       dispatch re-enters the top of the chain
//!
//! raw dispatch: validate ─▶ append to log ─▶ notify listeners ─▶ echo
//! ```
//!
//! # Core Concepts
//!
//! ## Actions
//!
//! An action is a `serde_json::Value` record with a `type` discriminant.
//! Dispatching anything else fails before recording, so the log only
//! ever holds well-formed actions.
//!
//! ## Middleware
//!
//! Middleware implement [`Middleware`] and nest around the terminal
//! dispatch in list order. The [`StoreRef`] facade they receive is bound
//! to the composed entry point: a follow-up dispatch runs the full
//! pipeline again.
//!
//! ## Listeners
//!
//! Listeners implement [`ActionListener`] (closures of shape
//! `Fn(&Value)` qualify) and fire synchronously after each recorded
//! action, in registration order. Subscribing returns a stable
//! [`ListenerId`]; unsubscribing twice is a harmless no-op.
//!
//! ## State
//!
//! The store echoes a caller-supplied [`StateAccessor`]: a fixed
//! snapshot, or a function deriving a view from the recorded actions.
//! There is no reducer, and [`MockStore::replace_reducer`] says so.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use understudy::MockStore;
//!
//! let store = MockStore::new(json!({}));
//!
//! store.dispatch(json!({ "type": "ADD_ITEM", "item": "tea" }))?;
//!
//! assert_eq!(
//!     store.actions(),
//!     vec![json!({ "type": "ADD_ITEM", "item": "tea" })]
//! );
//! # Ok::<(), understudy::StoreError>(())
//! ```

// Modules
pub mod accessor;
pub mod action;
pub mod error;
pub mod listener;
pub mod middleware;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use accessor::StateAccessor;
pub use error::{Result, StoreError};
pub use listener::{ActionListener, CollectingListener};
pub use middleware::{Middleware, Next, StoreRef, TraceMiddleware};
pub use store::{MockStore, StoreFactory};
pub use types::ListenerId;
