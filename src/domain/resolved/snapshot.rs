use serde::{Deserialize, Serialize};

use super::{CustomOptions, NoOptions, ServiceRef, Switch, TableOptions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SnapshotRepository {
    Memory,
    Doctrine { table_name: String },
}

/// When a snapshot gets stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SnapshotStoreStrategy {
    EveryNEvent { number: u64 },
    Custom { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnapshotRepositorySettings {
    pub memory: Switch<NoOptions>,
    pub doctrine: Switch<TableOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EveryNEventOptions {
    pub number: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreStrategySettings {
    pub every_n_event: Switch<EveryNEventOptions>,
    pub custom: Switch<CustomOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnapshotSettings {
    pub enabled: bool,
    pub repository: SnapshotRepositorySettings,
    pub versioned: bool,
    pub store_strategy: StoreStrategySettings,
    pub serializer: ServiceRef,
}

impl SnapshotSettings {
    /// Selected repository, `None` when both alternatives are switched off
    pub fn repository(&self) -> Option<SnapshotRepository> {
        if let Some(doctrine) = self.repository.doctrine.active() {
            return Some(SnapshotRepository::Doctrine {
                table_name: doctrine.table_name.clone(),
            });
        }
        self.repository
            .memory
            .enabled
            .then_some(SnapshotRepository::Memory)
    }

    /// Selected store strategy, `None` for the library default
    pub fn store_strategy(&self) -> Option<SnapshotStoreStrategy> {
        if let Some(number) = self.store_strategy.every_n_event.active().and_then(|o| o.number) {
            return Some(SnapshotStoreStrategy::EveryNEvent { number });
        }
        self.store_strategy
            .custom
            .active()
            .and_then(|o| o.id.clone())
            .map(|id| SnapshotStoreStrategy::Custom { id })
    }
}
