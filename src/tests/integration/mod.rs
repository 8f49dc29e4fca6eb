//! Integration tests from document files to wiring plans

use std::io::Write;

use serde_json::json;

use crate::domain::resolved::{
    BackOffStrategy, MessengerMode, OutboxRepository, RelayCommitStrategy, SnapshotRepository,
    SnapshotStoreStrategy, UpcastContext,
};
use crate::domain::{ConfigValidator, UpcasterDescriptor, WiringPlan};
use crate::infrastructure::{DocumentLoader, ValidationReport};
use crate::shared::error::AppError;
use crate::tests::fixtures::{full_bundle, resolve};
use crate::tests::TestResult;

const BUNDLE_YAML: &str = r#"
event_sourcing:
  message:
    dispatcher:
      messenger:
        mode: message
      chain:
        bus_dispatcher: messenger.bus.events
    outbox:
      back_off:
        no_waiting:
          max_tries: 3
  snapshot:
    repository:
      doctrine:
        table_name: snapshots
  aggregates:
    order:
      class: App\Domain\Order
      message:
        outbox: true
        dispatchers: [bus_dispatcher]
      snapshot: true
"#;

fn yaml_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

fn upcaster(service_id: &str, aggregate: &str, version: u32) -> UpcasterDescriptor {
    UpcasterDescriptor {
        service_id: service_id.to_string(),
        aggregate: aggregate.to_string(),
        version,
    }
}

#[test]
fn yaml_file_to_wiring_plan() -> TestResult {
    super::config::init();
    let file = yaml_file(BUNDLE_YAML);

    let document = DocumentLoader::new().load_file(file.path())?;
    let resolved = ConfigValidator::new().validate(&document)?;
    let plan = WiringPlan::build(&resolved, &[])?;

    assert_eq!(plan.messenger_mode, Some(MessengerMode::Message));
    assert_eq!(plan.back_off, Some(BackOffStrategy::NoWaiting { max_tries: Some(3) }));
    assert_eq!(
        plan.outbox_repository,
        Some(OutboxRepository::Doctrine { table_name: "outbox_message".to_string() })
    );
    assert_eq!(
        plan.snapshot_repository,
        Some(SnapshotRepository::Doctrine { table_name: "snapshots".to_string() })
    );

    let order = plan.aggregate("order").expect("order wiring");
    assert_eq!(order.class, "App\\Domain\\Order");
    assert_eq!(order.dispatchers, vec!["bus_dispatcher".to_string()]);
    assert!(order.outbox);
    assert!(order.snapshot);
    Ok(())
}

#[test]
fn env_overlay_switches_features_on() -> TestResult {
    let file = yaml_file("upcast:\n  context: message\n  enabled: false\n");
    std::env::set_var("ES_IT_OVERLAY__UPCAST__ENABLED", "true");

    let document = DocumentLoader::new()
        .with_env_prefix("ES_IT_OVERLAY")
        .load_file(file.path());
    std::env::remove_var("ES_IT_OVERLAY__UPCAST__ENABLED");

    let resolved = ConfigValidator::new().validate(&document?)?;
    assert!(resolved.upcast().enabled);
    assert_eq!(resolved.upcast().context, UpcastContext::Message);
    Ok(())
}

#[test]
fn full_bundle_plan() -> TestResult {
    let resolved = resolve(&full_bundle());
    let plan = WiringPlan::build(
        &resolved,
        &[upcaster("app.upcaster.order_v2", "order", 2), upcaster("app.upcaster.order_v1", "order", 1)],
    )?;

    assert_eq!(plan.relay_commit, Some(RelayCommitStrategy::Delete));
    assert_eq!(
        plan.snapshot_store_strategy,
        Some(SnapshotStoreStrategy::EveryNEvent { number: 50 })
    );
    assert_eq!(plan.upcast_context, Some(UpcastContext::Message));

    let order = plan.aggregate("order").expect("order wiring");
    let versions: Vec<u32> = order.upcasters.iter().map(|u| u.version).collect();
    assert_eq!(versions, vec![1, 2]);
    assert!(order.upcast);

    let invoice = plan.aggregate("invoice").expect("invoice wiring");
    assert_eq!(invoice.repository_alias, "invoices");
    assert!(!invoice.decorator);
    assert!(!invoice.upcast);
    assert!(!invoice.outbox);
    Ok(())
}

#[test]
fn unknown_dispatcher_fails_wiring() {
    let resolved = resolve(&json!({
        "aggregates": {"order": {"class": "App\\Order", "message": {"dispatchers": ["app.dispatcher.audit"]}}}
    }));

    let err = WiringPlan::build(&resolved, &[]).unwrap_err();
    assert!(matches!(err, AppError::Wiring(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("app.dispatcher.audit"));
}

#[test]
fn upcaster_for_unknown_aggregate_fails_wiring() {
    let resolved = resolve(&json!({"upcast": true, "aggregates": {"order": {"class": "App\\Order"}}}));

    let err = WiringPlan::build(&resolved, &[upcaster("app.upcaster.cart_v2", "cart", 2)]).unwrap_err();
    assert!(err.to_string().contains("unknown aggregate cart"));
}

#[test]
fn rejected_file_produces_failure_report() -> TestResult {
    let file = yaml_file("snapshot:\n  repository:\n    memory: true\n    doctrine: true\n");

    let document = DocumentLoader::new().load_file(file.path())?;
    let err: AppError = ConfigValidator::new().validate(&document).unwrap_err().into();
    let report = ValidationReport::failure(file.path().display().to_string(), &err);

    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].path.to_string(), "snapshot.repository");
    assert_eq!(err.exit_code(), 1);
    Ok(())
}

#[test]
fn toml_and_json_documents_resolve_alike() -> TestResult {
    let from_toml = DocumentLoader::from_toml_str(
        "[message.outbox.relay_commit]\nmark_consumed = true\n\n[aggregates.order]\nclass = \"App\\\\Order\"\n",
    )?;
    let from_json = DocumentLoader::from_json_str(
        r#"{"message": {"outbox": {"relay_commit": {"mark_consumed": true}}}, "aggregates": {"order": {"class": "App\\Order"}}}"#,
    )?;

    let validator = ConfigValidator::new();
    assert_eq!(validator.validate(&from_toml)?, validator.validate(&from_json)?);
    Ok(())
}
