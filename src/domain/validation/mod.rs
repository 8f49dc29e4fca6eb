//! Configuration validation engine
//!
//! This module applies a static schema to a configuration document, fills
//! defaults and evaluates the rules attached to schema nodes.

pub mod rules;
pub mod types;
pub mod validator;

pub use types::{ConfigPath, ValidationError, ValidationErrorKind, ValidationErrors};
pub use validator::ConfigValidator;
