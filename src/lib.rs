//! Event-sourcing bundle configuration - schema, validation and wiring
//!
//! This library describes the configuration tree of an event-sourcing bundle,
//! validates user documents against it, fills in defaults and derives the
//! wiring plan that service registration consumes.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

#[cfg(test)]
mod tests;

pub use config::AppConfig;
pub use domain::{
    bundle_schema, ConfigValidator, ResolvedConfig, UpcasterDescriptor, ValidationError,
    ValidationErrorKind, ValidationErrors, WiringPlan,
};
pub use infrastructure::{DocumentLoader, ValidationReport};
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
