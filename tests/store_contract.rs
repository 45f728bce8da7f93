//! Integration tests for the mock container contract
//!
//! These exercise the store the way a test suite for async action
//! creators would: dispatch, read the log back, subscribe, clear.

use proptest::prelude::*;
use serde_json::{json, Value};
use understudy::{CollectingListener, MockStore, StateAccessor, StoreError, StoreFactory};

#[test]
fn test_single_dispatch_round_trip() {
    let store = MockStore::new(json!({}));

    let returned = store.dispatch(json!({ "type": "ADD" })).unwrap();

    assert_eq!(returned, json!({ "type": "ADD" }));
    assert_eq!(store.actions(), vec![json!({ "type": "ADD" })]);
}

#[test]
fn test_actions_accumulate_in_dispatch_order() {
    let store = MockStore::new(json!({}));

    store.dispatch(json!({ "type": "ADD", "item": "tea" })).unwrap();
    store.dispatch(json!({ "type": "REMOVE", "item": "tea" })).unwrap();

    let kinds: Vec<String> = store
        .actions()
        .iter()
        .map(|action| action["type"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(kinds, ["ADD", "REMOVE"]);
}

#[test]
fn test_misspelled_type_key_is_rejected_with_snapshot() {
    let store = MockStore::new(json!({}));

    let err = store.dispatch(json!({ "types": "ADD" })).unwrap_err();

    assert!(matches!(err, StoreError::MissingActionType { .. }));
    assert!(err.to_string().contains(r#"{"types":"ADD"}"#));
    assert!(store.actions().is_empty());
}

#[test]
fn test_non_record_values_are_rejected() {
    let store = MockStore::new(json!({}));

    for junk in [json!(null), json!(true), json!(3.5), json!("ADD"), json!([1])] {
        let err = store.dispatch(junk).unwrap_err();
        assert!(matches!(err, StoreError::InvalidActionShape { .. }));
    }

    assert!(store.actions().is_empty());
}

#[test]
fn test_clear_then_read_is_empty() {
    let store = MockStore::new(json!({}));
    store.dispatch(json!({ "type": "A" })).unwrap();
    store.dispatch(json!({ "type": "B" })).unwrap();

    store.clear_actions();

    assert!(store.actions().is_empty());

    // The store keeps working after a clear.
    store.dispatch(json!({ "type": "C" })).unwrap();
    assert_eq!(store.actions(), vec![json!({ "type": "C" })]);
}

#[test]
fn test_derived_state_counts_recorded_actions() {
    let store = MockStore::new(StateAccessor::derived(|actions| {
        let adds = actions
            .iter()
            .filter(|action| action["type"] == json!("ADD"))
            .count();
        json!({ "added": adds })
    }));

    store.dispatch(json!({ "type": "ADD" })).unwrap();
    store.dispatch(json!({ "type": "OTHER" })).unwrap();
    store.dispatch(json!({ "type": "ADD" })).unwrap();

    assert_eq!(store.state(), json!({ "added": 2 }));
}

#[test]
fn test_listeners_fire_in_subscription_order_per_dispatch() {
    let store = MockStore::new(json!({}));
    let first = CollectingListener::new();
    let second = CollectingListener::new();

    store.subscribe(first.clone());
    store.subscribe(second.clone());

    store.dispatch(json!({ "type": "PING" })).unwrap();

    assert_eq!(first.recorded(), vec![json!({ "type": "PING" })]);
    assert_eq!(second.recorded(), vec![json!({ "type": "PING" })]);
}

#[test]
fn test_disposer_idempotence() {
    let store = MockStore::new(json!({}));
    let collector = CollectingListener::new();
    let id = store.subscribe(collector.clone());

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));

    store.dispatch(json!({ "type": "PING" })).unwrap();
    assert!(collector.is_empty());
}

#[test]
fn test_replace_reducer_is_refused() {
    let store = MockStore::new(json!({}));

    let err = store.replace_reducer(|state, _action| state).unwrap_err();

    assert!(matches!(err, StoreError::UnsupportedOperation { .. }));
    assert!(err.to_string().contains("accessor function"));
}

#[test]
fn test_factory_resets_between_tests() {
    let factory = StoreFactory::new();

    let store = factory.store(json!({}));
    store.dispatch(json!({ "type": "LEFTOVER" })).unwrap();

    // A fresh store from the same factory starts clean.
    let fresh = factory.store(json!({}));
    assert!(fresh.actions().is_empty());
}

proptest! {
    #[test]
    fn test_log_equals_dispatch_sequence(
        kinds in proptest::collection::vec("[A-Z_]{1,12}", 1..32),
    ) {
        let store = MockStore::new(json!({}));
        for kind in &kinds {
            store.dispatch(json!({ "type": kind })).unwrap();
        }

        let logged: Vec<String> = store
            .actions()
            .iter()
            .map(|action| action["type"].as_str().unwrap().to_owned())
            .collect();
        prop_assert_eq!(logged, kinds);
    }

    #[test]
    fn test_rejected_dispatches_leave_no_trace(
        kinds in proptest::collection::vec("[A-Z_]{1,8}", 0..16),
        junk in proptest::collection::vec(any::<i64>(), 0..16),
    ) {
        let store = MockStore::new(json!({}));

        let rounds = kinds.len().max(junk.len());
        for i in 0..rounds {
            if let Some(kind) = kinds.get(i) {
                store.dispatch(json!({ "type": kind })).unwrap();
            }
            if let Some(n) = junk.get(i) {
                prop_assert!(store.dispatch(json!(n)).is_err());
            }
        }

        let logged: Vec<String> = store
            .actions()
            .iter()
            .map(|action| action["type"].as_str().unwrap().to_owned())
            .collect();
        prop_assert_eq!(logged, kinds);
    }
}

// Listener shape is enforced by the ActionListener bound; a closure over
// Value references is the smallest thing that satisfies it.
#[test]
fn test_closure_listeners_satisfy_the_bound() {
    let store = MockStore::new(json!({}));
    let seen = std::sync::Arc::new(parking_lot::Mutex::new(0u32));

    let counter = seen.clone();
    store.subscribe(move |_: &Value| *counter.lock() += 1);

    store.dispatch(json!({ "type": "A" })).unwrap();
    store.dispatch(json!({ "type": "B" })).unwrap();

    assert_eq!(*seen.lock(), 2);
}
