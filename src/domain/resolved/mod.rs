//! Typed view of a resolved bundle configuration
//!
//! A [`ResolvedConfig`] is only produced by the validator, so every value in
//! it has passed the schema rules. The normalized tree is kept alongside the
//! typed settings; re-validating that tree yields the same configuration.

pub mod message;
pub mod snapshot;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use message::{
    BackOffStrategy, ChainEntry, DispatcherSettings, JsonEncodeOption, MessageRepository,
    MessageRepositorySettings, MessageSettings, MessengerMode, OutboxRepository, OutboxSettings,
    RelayCommitStrategy,
};
pub use snapshot::{SnapshotRepository, SnapshotSettings, SnapshotStoreStrategy};

/// Reference to a collaborator service
///
/// `LibraryDefault` means the document did not name one and the library's
/// built-in implementation applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ServiceRef {
    #[default]
    LibraryDefault,
    Custom(String),
}

impl ServiceRef {
    pub fn custom(&self) -> Option<&str> {
        match self {
            ServiceRef::LibraryDefault => None,
            ServiceRef::Custom(id) => Some(id),
        }
    }

    pub fn is_library_default(&self) -> bool {
        matches!(self, ServiceRef::LibraryDefault)
    }

    /// Configured identifier, or `default` for the library's own service
    pub fn or<'a>(&'a self, default: &'a str) -> &'a str {
        self.custom().unwrap_or(default)
    }
}

impl From<Option<String>> for ServiceRef {
    fn from(id: Option<String>) -> Self {
        match id {
            Some(id) => ServiceRef::Custom(id),
            None => ServiceRef::LibraryDefault,
        }
    }
}

impl From<ServiceRef> for Option<String> {
    fn from(service: ServiceRef) -> Self {
        match service {
            ServiceRef::LibraryDefault => None,
            ServiceRef::Custom(id) => Some(id),
        }
    }
}

/// Resolved toggle section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Switch<T> {
    pub enabled: bool,
    #[serde(flatten)]
    pub options: T,
}

impl<T> Switch<T> {
    /// Options of the section when it is enabled
    pub fn active(&self) -> Option<&T> {
        self.enabled.then_some(&self.options)
    }
}

/// Toggle section without options of its own
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoOptions {}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableOptions {
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomOptions {
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeSettings {
    pub recording_timezone: String,
    pub clock: ServiceRef,
}

/// Where upcasters are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpcastContext {
    Payload,
    Message,
}

impl UpcastContext {
    pub const ALL: [UpcastContext; 2] = [UpcastContext::Payload, UpcastContext::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            UpcastContext::Payload => "payload",
            UpcastContext::Message => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpcastSettings {
    pub enabled: bool,
    pub context: UpcastContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AggregateMessageSettings {
    pub outbox: bool,
    pub decorator: bool,
    pub dispatchers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AggregateSettings {
    pub class: String,
    pub repository_alias: Option<String>,
    pub message: AggregateMessageSettings,
    pub upcast: bool,
    pub snapshot: bool,
}

impl AggregateSettings {
    /// Repository alias, `<name>Repository` unless configured
    pub fn repository_alias_for(&self, name: &str) -> String {
        match &self.repository_alias {
            Some(alias) => alias.clone(),
            None => format!("{name}Repository"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct BundleSettings {
    time: TimeSettings,
    message: MessageSettings,
    snapshot: SnapshotSettings,
    upcast: UpcastSettings,
    #[serde(deserialize_with = "aggregate_entries")]
    aggregates: Vec<(String, AggregateSettings)>,
    payload_serializer: ServiceRef,
    class_name_inflector: ServiceRef,
    uuid_encoder: ServiceRef,
}

fn aggregate_entries<'de, D>(deserializer: D) -> Result<Vec<(String, AggregateSettings)>, D::Error>
where
    D: Deserializer<'de>,
{
    Map::<String, Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(name, entry)| {
            AggregateSettings::deserialize(entry)
                .map(|settings| (name, settings))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

/// Validated, fully defaulted bundle configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    tree: Value,
    settings: BundleSettings,
}

impl ResolvedConfig {
    pub(crate) fn from_tree(tree: Value) -> Result<Self, serde_json::Error> {
        let settings = BundleSettings::deserialize(&tree)?;
        Ok(Self { tree, settings })
    }

    /// Normalized document tree
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn into_tree(self) -> Value {
        self.tree
    }

    pub fn time(&self) -> &TimeSettings {
        &self.settings.time
    }

    pub fn message(&self) -> &MessageSettings {
        &self.settings.message
    }

    pub fn snapshot(&self) -> &SnapshotSettings {
        &self.settings.snapshot
    }

    pub fn upcast(&self) -> &UpcastSettings {
        &self.settings.upcast
    }

    /// Aggregates by name, in document order
    pub fn aggregates(&self) -> &[(String, AggregateSettings)] {
        &self.settings.aggregates
    }

    pub fn aggregate(&self, name: &str) -> Option<&AggregateSettings> {
        self.settings
            .aggregates
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, settings)| settings)
    }

    pub fn payload_serializer(&self) -> &ServiceRef {
        &self.settings.payload_serializer
    }

    pub fn class_name_inflector(&self) -> &ServiceRef {
        &self.settings.class_name_inflector
    }

    pub fn uuid_encoder(&self) -> &ServiceRef {
        &self.settings.uuid_encoder
    }
}
