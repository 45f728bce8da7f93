//! Runtime shape checks for dispatched actions
//!
//! Actions are opaque JSON records with one structural requirement: a
//! `type` discriminant. The checks here run before anything is recorded,
//! so a rejected dispatch leaves no trace in the action log.

use serde_json::Value;

use crate::error::{Result, StoreError};

/// Human-readable kind of a JSON value, used in rejection messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validate the structural contract for a dispatchable action
///
/// An action must be a JSON object carrying a `type` member whose value
/// is not null. The error for a missing discriminant embeds the
/// serialized action, since a misspelled `type` key is the usual culprit.
pub fn check_shape(action: &Value) -> Result<()> {
    let record = match action.as_object() {
        Some(record) => record,
        None => {
            return Err(StoreError::InvalidActionShape {
                kind: value_kind(action),
            })
        }
    };

    match record.get("type") {
        Some(discriminant) if !discriminant.is_null() => Ok(()),
        _ => Err(StoreError::MissingActionType {
            action: action.to_string(),
        }),
    }
}
