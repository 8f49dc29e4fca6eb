//! Static schema of the event-sourcing bundle configuration
//!
//! The schema is a declarative tree of [`ConfigNode`]s built once per
//! process. Each top-level section has its own constructor module.

pub mod registry;
pub mod sections;
pub mod types;

pub use registry::{build_bundle_schema, bundle_schema, schema_defects, ROOT_NAME};
pub use sections::MIN_SNAPSHOT_EVERY_N_EVENT;
pub use types::{ConfigNode, DefaultValue, NodeKind, Rule, Toggle};
