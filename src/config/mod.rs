//! Configuration management module
//!
//! This module handles the checker's own settings: loading, validation
//! and access.

pub mod app_config;
pub mod validation;

pub use app_config::{AppConfig, DocumentConfig, LoggingConfig, OutputConfig};
pub use validation::SettingsValidator;
