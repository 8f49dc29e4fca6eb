//! Fixture documents for configuration tests

use serde_json::{json, Value};

use crate::domain::validation::{ValidationErrorKind, ValidationErrors};
use crate::domain::{ConfigValidator, ResolvedConfig};

/// A document that exercises every section
pub fn full_bundle() -> Value {
    json!({
        "time": {
            "recording_timezone": "Europe/Paris",
            "clock": "app.clock"
        },
        "message": {
            "repository": {
                "json_encode_options": ["JSON_UNESCAPED_SLASHES", "JSON_PRESERVE_ZERO_FRACTION"],
                "doctrine": {"table_name": "events"}
            },
            "dispatcher": {
                "messenger": {"mode": "event_with_headers"},
                "chain": {
                    "app.dispatcher.bus": "messenger.bus.events",
                    "app.dispatcher.audit": "messenger.bus.audit"
                }
            },
            "outbox": {
                "back_off": {"exponential": {"initial_delay_ms": 100, "max_tries": 5}},
                "relay_commit": {"delete": true},
                "repository": {"doctrine": {"table_name": "outbox"}}
            }
        },
        "snapshot": {
            "repository": {"doctrine": true},
            "versioned": true,
            "store_strategy": {"every_n_event": {"number": 50}}
        },
        "upcast": {"context": "message"},
        "aggregates": {
            "order": {
                "class": "App\\Domain\\Order",
                "message": {"outbox": true, "dispatchers": ["app.dispatcher.bus"]},
                "snapshot": true
            },
            "invoice": {
                "class": "App\\Domain\\Invoice",
                "repository_alias": "invoices",
                "message": {"decorator": false, "dispatchers": ["app.dispatcher.audit", "app.dispatcher.bus"]},
                "upcast": false
            }
        }
    })
}

/// Snapshots on with the given every-N-event cadence
pub fn snapshot_every(number: i64) -> Value {
    json!({
        "snapshot": {
            "enabled": true,
            "store_strategy": {"every_n_event": {"number": number}}
        }
    })
}

/// Messenger dispatching on with the given chain
pub fn messenger_chain(chain: Value) -> Value {
    json!({
        "message": {
            "dispatcher": {
                "messenger": {"enabled": true},
                "chain": chain
            }
        }
    })
}

/// Validate against the bundle schema, panicking on rejection
pub fn resolve(document: &Value) -> ResolvedConfig {
    super::config::init();
    match ConfigValidator::new().validate(document) {
        Ok(resolved) => resolved,
        Err(errors) => panic!("expected a valid document, got:\n{errors}"),
    }
}

/// Validate against the bundle schema, panicking on acceptance
pub fn reject(document: &Value) -> ValidationErrors {
    super::config::init();
    match ConfigValidator::new().validate(document) {
        Ok(_) => panic!("expected document to be rejected: {document}"),
        Err(errors) => errors,
    }
}

/// Assert one violation of `kind` is reported at `path`
pub fn assert_violation(errors: &ValidationErrors, path: &str, kind: ValidationErrorKind) {
    assert!(
        errors.at(path).any(|e| e.kind == kind),
        "expected {kind:?} at {path}, got:\n{errors}"
    );
}
