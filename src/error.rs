//! Error types for the mock store

use thiserror::Error;

/// Failures surfaced by store operations
///
/// Every failure is synchronous and raised at the call site. The store
/// never swallows or logs an error on the caller's behalf; whether a
/// failure fails the test is the test harness's decision.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Dispatched value was not a structural record
    #[error("actions must be plain objects, got {kind}; use custom middleware for async actions")]
    InvalidActionShape {
        /// JSON kind of the rejected value
        kind: &'static str,
    },

    /// Dispatched record has no usable `type` discriminant
    #[error("actions may not have an undefined \"type\" field; have you misspelled a constant? action: {action}")]
    MissingActionType {
        /// Compact JSON snapshot of the rejected action
        action: String,
    },

    /// Operation the mock store refuses by design
    #[error("cannot {operation} in a mock store; {hint}")]
    UnsupportedOperation {
        /// What the caller tried to do
        operation: &'static str,
        /// What to do instead
        hint: &'static str,
    },
}

/// Result type using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;
