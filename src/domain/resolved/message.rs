use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{CustomOptions, NoOptions, ServiceRef, Switch, TableOptions};

/// Flags accepted by `message.repository.json_encode_options`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JsonEncodeOption {
    #[serde(rename = "JSON_FORCE_OBJECT")]
    ForceObject,
    #[serde(rename = "JSON_HEX_QUOT")]
    HexQuot,
    #[serde(rename = "JSON_HEX_TAG")]
    HexTag,
    #[serde(rename = "JSON_HEX_AMP")]
    HexAmp,
    #[serde(rename = "JSON_HEX_APOS")]
    HexApos,
    #[serde(rename = "JSON_INVALID_UTF8_IGNORE")]
    InvalidUtf8Ignore,
    #[serde(rename = "JSON_INVALID_UTF8_SUBSTITUTE")]
    InvalidUtf8Substitute,
    #[serde(rename = "JSON_NUMERIC_CHECK")]
    NumericCheck,
    #[serde(rename = "JSON_PARTIAL_OUTPUT_ON_ERROR")]
    PartialOutputOnError,
    #[serde(rename = "JSON_PRESERVE_ZERO_FRACTION")]
    PreserveZeroFraction,
    #[serde(rename = "JSON_PRETTY_PRINT")]
    PrettyPrint,
    #[serde(rename = "JSON_UNESCAPED_LINE_TERMINATORS")]
    UnescapedLineTerminators,
    #[serde(rename = "JSON_UNESCAPED_SLASHES")]
    UnescapedSlashes,
    #[serde(rename = "JSON_UNESCAPED_UNICODE")]
    UnescapedUnicode,
    #[serde(rename = "JSON_THROW_ON_ERROR")]
    ThrowOnError,
}

impl JsonEncodeOption {
    pub const ALL: [JsonEncodeOption; 15] = [
        JsonEncodeOption::ForceObject,
        JsonEncodeOption::HexQuot,
        JsonEncodeOption::HexTag,
        JsonEncodeOption::HexAmp,
        JsonEncodeOption::HexApos,
        JsonEncodeOption::InvalidUtf8Ignore,
        JsonEncodeOption::InvalidUtf8Substitute,
        JsonEncodeOption::NumericCheck,
        JsonEncodeOption::PartialOutputOnError,
        JsonEncodeOption::PreserveZeroFraction,
        JsonEncodeOption::PrettyPrint,
        JsonEncodeOption::UnescapedLineTerminators,
        JsonEncodeOption::UnescapedSlashes,
        JsonEncodeOption::UnescapedUnicode,
        JsonEncodeOption::ThrowOnError,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JsonEncodeOption::ForceObject => "JSON_FORCE_OBJECT",
            JsonEncodeOption::HexQuot => "JSON_HEX_QUOT",
            JsonEncodeOption::HexTag => "JSON_HEX_TAG",
            JsonEncodeOption::HexAmp => "JSON_HEX_AMP",
            JsonEncodeOption::HexApos => "JSON_HEX_APOS",
            JsonEncodeOption::InvalidUtf8Ignore => "JSON_INVALID_UTF8_IGNORE",
            JsonEncodeOption::InvalidUtf8Substitute => "JSON_INVALID_UTF8_SUBSTITUTE",
            JsonEncodeOption::NumericCheck => "JSON_NUMERIC_CHECK",
            JsonEncodeOption::PartialOutputOnError => "JSON_PARTIAL_OUTPUT_ON_ERROR",
            JsonEncodeOption::PreserveZeroFraction => "JSON_PRESERVE_ZERO_FRACTION",
            JsonEncodeOption::PrettyPrint => "JSON_PRETTY_PRINT",
            JsonEncodeOption::UnescapedLineTerminators => "JSON_UNESCAPED_LINE_TERMINATORS",
            JsonEncodeOption::UnescapedSlashes => "JSON_UNESCAPED_SLASHES",
            JsonEncodeOption::UnescapedUnicode => "JSON_UNESCAPED_UNICODE",
            JsonEncodeOption::ThrowOnError => "JSON_THROW_ON_ERROR",
        }
    }
}

/// What the messenger dispatcher sends from an aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessengerMode {
    Event,
    Message,
    EventWithHeaders,
}

impl MessengerMode {
    pub const ALL: [MessengerMode; 3] = [
        MessengerMode::Event,
        MessengerMode::Message,
        MessengerMode::EventWithHeaders,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MessengerMode::Event => "event",
            MessengerMode::Message => "message",
            MessengerMode::EventWithHeaders => "event_with_headers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DoctrineMessageRepository {
    pub connection: String,
    pub table_schema: ServiceRef,
    pub table_name: String,
}

/// Backend storing the event messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageRepository {
    Memory,
    Doctrine {
        connection: String,
        table_schema: ServiceRef,
        table_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageRepositorySettings {
    pub json_encode_options: Vec<JsonEncodeOption>,
    pub memory: Switch<NoOptions>,
    pub doctrine: Switch<DoctrineMessageRepository>,
}

impl MessageRepositorySettings {
    pub fn selected(&self) -> Option<MessageRepository> {
        if self.memory.enabled {
            return Some(MessageRepository::Memory);
        }
        self.doctrine.active().map(|o| MessageRepository::Doctrine {
            connection: o.connection.clone(),
            table_schema: o.table_schema.clone(),
            table_name: o.table_name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessengerOptions {
    pub mode: MessengerMode,
}

/// One link of the dispatcher chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainEntry {
    pub dispatcher: String,
    /// Message bus; `None` when not configured
    pub bus: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DispatcherSettings {
    pub messenger: Switch<MessengerOptions>,
    #[serde(deserialize_with = "chain_entries")]
    pub chain: Vec<ChainEntry>,
}

impl DispatcherSettings {
    /// Messenger mode when the messenger dispatcher is enabled
    pub fn messenger_mode(&self) -> Option<MessengerMode> {
        self.messenger.active().map(|m| m.mode)
    }

    pub fn contains(&self, dispatcher: &str) -> bool {
        self.chain.iter().any(|entry| entry.dispatcher == dispatcher)
    }
}

// keeps the document order of the chain
fn chain_entries<'de, D>(deserializer: D) -> Result<Vec<ChainEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Map::<String, Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|(dispatcher, bus)| ChainEntry {
            dispatcher,
            bus: bus_name(&bus),
        })
        .collect())
}

fn bus_name(bus: &Value) -> Option<String> {
    match bus {
        Value::String(name) if !name.is_empty() => Some(name.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetryOptions {
    pub initial_delay_ms: Option<i64>,
    pub max_tries: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MaxTriesOptions {
    pub max_tries: Option<i64>,
}

/// Outbox relay back-off; `None` values use the library default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum BackOffStrategy {
    Exponential { initial_delay_ms: Option<i64>, max_tries: Option<i64> },
    Fibonacci { initial_delay_ms: Option<i64>, max_tries: Option<i64> },
    LinearBack { initial_delay_ms: Option<i64>, max_tries: Option<i64> },
    NoWaiting { max_tries: Option<i64> },
    Immediately,
    Custom { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackOffSettings {
    pub exponential: Switch<RetryOptions>,
    pub fibonacci: Switch<RetryOptions>,
    pub linear_back: Switch<RetryOptions>,
    pub no_waiting: Switch<MaxTriesOptions>,
    pub immediately: Switch<NoOptions>,
    pub custom: Switch<CustomOptions>,
}

impl BackOffSettings {
    /// The enabled strategy, `None` for the library default
    pub fn selected(&self) -> Option<BackOffStrategy> {
        if let Some(o) = self.exponential.active() {
            return Some(BackOffStrategy::Exponential {
                initial_delay_ms: o.initial_delay_ms,
                max_tries: o.max_tries,
            });
        }
        if let Some(o) = self.fibonacci.active() {
            return Some(BackOffStrategy::Fibonacci {
                initial_delay_ms: o.initial_delay_ms,
                max_tries: o.max_tries,
            });
        }
        if let Some(o) = self.linear_back.active() {
            return Some(BackOffStrategy::LinearBack {
                initial_delay_ms: o.initial_delay_ms,
                max_tries: o.max_tries,
            });
        }
        if let Some(o) = self.no_waiting.active() {
            return Some(BackOffStrategy::NoWaiting { max_tries: o.max_tries });
        }
        if self.immediately.enabled {
            return Some(BackOffStrategy::Immediately);
        }
        self.custom
            .active()
            .and_then(|o| o.id.clone())
            .map(|id| BackOffStrategy::Custom { id })
    }
}

/// What happens to a relayed outbox message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayCommitStrategy {
    MarkConsumed,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayCommitSettings {
    pub mark_consumed: Switch<NoOptions>,
    pub delete: Switch<NoOptions>,
}

impl RelayCommitSettings {
    pub fn selected(&self) -> Option<RelayCommitStrategy> {
        if self.mark_consumed.enabled {
            Some(RelayCommitStrategy::MarkConsumed)
        } else if self.delete.enabled {
            Some(RelayCommitStrategy::Delete)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboxRepository {
    Memory,
    Doctrine { table_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutboxRepositorySettings {
    pub memory: Switch<NoOptions>,
    pub doctrine: Switch<TableOptions>,
}

impl OutboxRepositorySettings {
    pub fn selected(&self) -> Option<OutboxRepository> {
        if self.memory.enabled {
            return Some(OutboxRepository::Memory);
        }
        self.doctrine.active().map(|o| OutboxRepository::Doctrine {
            table_name: o.table_name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutboxSettings {
    pub enabled: bool,
    pub back_off: BackOffSettings,
    pub relay_commit: RelayCommitSettings,
    pub repository: OutboxRepositorySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageSettings {
    pub repository: MessageRepositorySettings,
    pub serializer: ServiceRef,
    pub dispatcher: DispatcherSettings,
    pub decorator: bool,
    pub outbox: OutboxSettings,
}
