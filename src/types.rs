//! Identity types for the mock store
//!
//! Listener registrations are named by stable handles rather than slot
//! indices, so disposing a registration stays correct no matter how the
//! registry changes around it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable handle for a registered listener
///
/// Returned when subscribing to a store, used to later unsubscribe.
/// Ids are allocated from a process-wide monotonic counter and never
/// reused; registration order is id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

static LISTENER_COUNTER: AtomicU64 = AtomicU64::new(1);

impl ListenerId {
    /// Allocate a new unique listener id
    pub fn new() -> Self {
        Self(LISTENER_COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener:{}", self.0)
    }
}
