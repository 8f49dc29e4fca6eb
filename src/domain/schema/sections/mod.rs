//! Top-level sections of the bundle schema, one constructor per section

pub mod aggregates;
pub mod message;
pub mod snapshot;
pub mod time;
pub mod upcast;

use crate::domain::schema::types::ConfigNode;

pub use aggregates::aggregates_section;
pub use message::message_section;
pub use snapshot::{snapshot_section, MIN_SNAPSHOT_EVERY_N_EVENT};
pub use time::time_section;
pub use upcast::upcast_section;

/// Root-level service identifiers
pub fn service_identifiers() -> Vec<ConfigNode> {
    vec![
        ConfigNode::identifier("payload_serializer")
            .with_info("Custom payload serializer. Defaults to the constructing payload serializer."),
        ConfigNode::identifier("class_name_inflector")
            .with_info("Custom class name inflector. Defaults to the dot separated snake case inflector."),
        ConfigNode::identifier("uuid_encoder")
            .with_info("Custom uuid encoder. Defaults to the binary uuid encoder."),
    ]
}
