//! Wiring plan derived from a resolved configuration
//!
//! The plan names, per aggregate, which collaborators the service container
//! has to assemble. It does not instantiate anything itself.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::domain::resolved::{
    BackOffStrategy, MessageRepository, MessengerMode, OutboxRepository, RelayCommitStrategy,
    ResolvedConfig, SnapshotRepository, SnapshotStoreStrategy, UpcastContext,
};
use crate::shared::error::{AppError, AppResult};

/// Upcaster service declared for one aggregate and payload version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpcasterDescriptor {
    pub service_id: String,
    pub aggregate: String,
    pub version: u32,
}

/// Collaborators of a single aggregate repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateWiring {
    pub name: String,
    pub class: String,
    pub repository_alias: String,
    pub decorator: bool,
    pub dispatchers: Vec<String>,
    pub outbox: bool,
    pub snapshot: bool,
    pub upcast: bool,
    /// Ordered by version
    pub upcasters: Vec<UpcasterDescriptor>,
}

/// Everything the service registration step needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiringPlan {
    pub message_repository: Option<MessageRepository>,
    pub messenger_mode: Option<MessengerMode>,
    pub back_off: Option<BackOffStrategy>,
    pub relay_commit: Option<RelayCommitStrategy>,
    pub outbox_repository: Option<OutboxRepository>,
    pub snapshot_repository: Option<SnapshotRepository>,
    pub snapshot_store_strategy: Option<SnapshotStoreStrategy>,
    pub upcast_context: Option<UpcastContext>,
    pub aggregates: Vec<AggregateWiring>,
}

impl WiringPlan {
    /// Build the plan, failing on references the configuration cannot satisfy
    ///
    /// Aggregates appear in document order.
    pub fn build(config: &ResolvedConfig, upcasters: &[UpcasterDescriptor]) -> AppResult<Self> {
        let mut problems = Vec::new();
        check_upcasters(config, upcasters, &mut problems);

        let message = config.message();
        let snapshot = config.snapshot();
        let upcast = config.upcast();

        let mut aggregates = Vec::with_capacity(config.aggregates().len());
        for (name, aggregate) in config.aggregates() {
            for dispatcher in &aggregate.message.dispatchers {
                if !message.dispatcher.contains(dispatcher) {
                    problems.push(format!("aggregate {name} references unknown dispatcher {dispatcher}"));
                }
            }

            if aggregate.message.outbox && !message.outbox.enabled {
                warn!(aggregate = %name, "aggregate requests the outbox but message.outbox is disabled");
            }
            if aggregate.snapshot && !snapshot.enabled {
                warn!(aggregate = %name, "aggregate requests snapshots but snapshot is disabled");
            }

            let upcast_active = aggregate.upcast && upcast.enabled;
            let mut own_upcasters: Vec<UpcasterDescriptor> = upcasters
                .iter()
                .filter(|u| &u.aggregate == name)
                .cloned()
                .collect();
            own_upcasters.sort_by_key(|u| u.version);
            if !upcast_active && !own_upcasters.is_empty() {
                warn!(
                    aggregate = %name,
                    upcasters = own_upcasters.len(),
                    "upcasters ignored because upcasting is inactive for this aggregate"
                );
                own_upcasters.clear();
            }

            aggregates.push(AggregateWiring {
                name: name.clone(),
                class: aggregate.class.clone(),
                repository_alias: aggregate.repository_alias_for(name),
                decorator: aggregate.message.decorator && message.decorator,
                dispatchers: aggregate.message.dispatchers.clone(),
                outbox: aggregate.message.outbox && message.outbox.enabled,
                snapshot: aggregate.snapshot && snapshot.enabled,
                upcast: upcast_active,
                upcasters: own_upcasters,
            });
        }

        if !problems.is_empty() {
            return Err(AppError::Wiring(problems.join("; ")));
        }

        let outbox = &message.outbox;
        let plan = Self {
            message_repository: message.repository.selected(),
            messenger_mode: message.dispatcher.messenger_mode(),
            back_off: outbox.enabled.then(|| outbox.back_off.selected()).flatten(),
            relay_commit: outbox.enabled.then(|| outbox.relay_commit.selected()).flatten(),
            outbox_repository: outbox.enabled.then(|| outbox.repository.selected()).flatten(),
            snapshot_repository: snapshot.enabled.then(|| snapshot.repository()).flatten(),
            snapshot_store_strategy: snapshot.enabled.then(|| snapshot.store_strategy()).flatten(),
            upcast_context: upcast.enabled.then_some(upcast.context),
            aggregates,
        };
        debug!(aggregates = plan.aggregates.len(), "wiring plan built");
        Ok(plan)
    }

    pub fn aggregate(&self, name: &str) -> Option<&AggregateWiring> {
        self.aggregates.iter().find(|a| a.name == name)
    }
}

fn check_upcasters(config: &ResolvedConfig, upcasters: &[UpcasterDescriptor], problems: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for upcaster in upcasters {
        if config.aggregate(&upcaster.aggregate).is_none() {
            problems.push(format!(
                "upcaster {} targets unknown aggregate {}",
                upcaster.service_id, upcaster.aggregate
            ));
        }
        if !seen.insert((upcaster.aggregate.as_str(), upcaster.version)) {
            problems.push(format!(
                "upcaster {} repeats version {} of aggregate {}",
                upcaster.service_id, upcaster.version, upcaster.aggregate
            ));
        }
    }
}
