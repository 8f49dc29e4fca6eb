//! Property tests for the resolver

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use crate::domain::validation::ValidationErrorKind;
use crate::domain::schema::MIN_SNAPSHOT_EVERY_N_EVENT;
use crate::domain::ConfigValidator;

const BACK_OFF: [&str; 5] = ["exponential", "fibonacci", "linear_back", "no_waiting", "immediately"];
const RELAY_COMMIT: [&str; 2] = ["mark_consumed", "delete"];

fn toggle() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<bool>().prop_map(|enabled| json!({"enabled": enabled})),
    ]
}

fn identifier() -> impl Strategy<Value = Value> {
    prop_oneof![Just(Value::Null), "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}".prop_map(Value::String)]
}

fn outbox() -> impl Strategy<Value = Value> {
    (
        any::<bool>(),
        proptest::option::of(0..BACK_OFF.len()),
        proptest::option::of(0..RELAY_COMMIT.len()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(enabled, back_off, relay_commit, memory)| {
            let mut outbox = Map::new();
            outbox.insert("enabled".into(), Value::Bool(enabled));
            if let Some(i) = back_off {
                outbox.insert("back_off".into(), json!({ BACK_OFF[i]: {"enabled": true} }));
            }
            if let Some(i) = relay_commit {
                outbox.insert("relay_commit".into(), json!({ RELAY_COMMIT[i]: true }));
            }
            if let Some(memory) = memory {
                outbox.insert("repository".into(), json!({"memory": memory}));
            }
            Value::Object(outbox)
        })
}

fn snapshot() -> impl Strategy<Value = Value> {
    (
        toggle(),
        proptest::option::of(any::<bool>()),
        proptest::option::of(MIN_SNAPSHOT_EVERY_N_EVENT..1_000),
        any::<bool>(),
    )
        .prop_map(|(switch, doctrine, every_n_event, versioned)| {
            let mut snapshot = match switch {
                Value::Object(map) => map,
                Value::Bool(false) => {
                    let mut map = Map::new();
                    map.insert("enabled".into(), Value::Bool(false));
                    map
                }
                _ => Map::new(),
            };
            snapshot.insert("versioned".into(), Value::Bool(versioned));
            if let Some(doctrine) = doctrine {
                snapshot.insert("repository".into(), json!({"doctrine": doctrine}));
            }
            if let Some(number) = every_n_event {
                snapshot.insert(
                    "store_strategy".into(),
                    json!({"every_n_event": {"number": number}}),
                );
            }
            Value::Object(snapshot)
        })
}

fn dispatcher() -> impl Strategy<Value = Value> {
    (
        any::<bool>(),
        proptest::collection::btree_map("[a-z]{1,8}", "[a-z]{1,8}", 0..4),
    )
        .prop_map(|(messenger, chain)| {
            json!({
                "messenger": messenger,
                "chain": chain,
            })
        })
}

fn aggregates() -> impl Strategy<Value = Value> {
    proptest::collection::btree_map(
        "[a-z]{1,10}",
        ("[A-Z][a-z]{1,10}", any::<bool>(), any::<bool>(), identifier()),
        0..4,
    )
    .prop_map(|aggregates| {
        let entries: Map<String, Value> = aggregates
            .into_iter()
            .map(|(name, (class, outbox, snapshot, alias))| {
                let aggregate = json!({
                    "class": format!("App\\Domain\\{class}"),
                    "repository_alias": alias,
                    "message": {"outbox": outbox},
                    "snapshot": snapshot,
                });
                (name, aggregate)
            })
            .collect();
        Value::Object(entries)
    })
}

fn document() -> impl Strategy<Value = Value> {
    (
        identifier(),
        dispatcher(),
        outbox(),
        snapshot(),
        toggle(),
        aggregates(),
        identifier(),
    )
        .prop_map(|(clock, dispatcher, outbox, snapshot, upcast, aggregates, encoder)| {
            json!({
                "time": {"clock": clock},
                "message": {"dispatcher": dispatcher, "outbox": outbox},
                "snapshot": snapshot,
                "upcast": upcast,
                "aggregates": aggregates,
                "uuid_encoder": encoder,
            })
        })
}

proptest! {
    #[test]
    fn resolving_a_resolved_tree_changes_nothing(document in document()) {
        let validator = ConfigValidator::new();
        let first = match validator.validate(&document) {
            Ok(resolved) => resolved,
            Err(errors) => return Err(TestCaseError::fail(format!("generated document rejected:\n{errors}"))),
        };

        let second = validator.validate(first.tree());
        prop_assert_eq!(second.as_ref().ok(), Some(&first));
    }

    #[test]
    fn snapshot_cadence_below_minimum_is_rejected(number in -100i64..MIN_SNAPSHOT_EVERY_N_EVENT) {
        let document = json!({
            "snapshot": {"store_strategy": {"every_n_event": {"number": number}}}
        });
        let errors = ConfigValidator::new().validate(&document).unwrap_err();

        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors.errors()[0].kind, ValidationErrorKind::OutOfRangeValue);
    }

    #[test]
    fn snapshot_cadence_at_or_above_minimum_is_accepted(number in MIN_SNAPSHOT_EVERY_N_EVENT..100_000) {
        let document = json!({
            "snapshot": {"store_strategy": {"every_n_event": {"number": number}}}
        });
        prop_assert!(ConfigValidator::new().validate(&document).is_ok());
    }
}
