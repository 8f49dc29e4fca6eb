//! Domain layer - schema, validation engine and resolved configuration
//!
//! This module contains the configuration schema, the rules that guard it and
//! the typed result handed to service registration. Nothing here performs I/O.

pub mod resolved;
pub mod schema;
pub mod validation;
pub mod wiring;

pub use resolved::{AggregateSettings, ResolvedConfig, ServiceRef, Switch, UpcastContext};
pub use schema::{bundle_schema, ConfigNode, DefaultValue, NodeKind, Rule, Toggle};
pub use validation::{
    ConfigPath, ConfigValidator, ValidationError, ValidationErrorKind, ValidationErrors,
};
pub use wiring::{AggregateWiring, UpcasterDescriptor, WiringPlan};
