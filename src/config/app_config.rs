//! Application configuration structures
//!
//! This module contains the settings of the checker itself. The bundle
//! document it validates is loaded separately by the infrastructure layer.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::wiring::UpcasterDescriptor;
use crate::shared::error::AppError;

/// Where the bundle document comes from
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DocumentConfig {
    /// Path of the bundle document (YAML, JSON or TOML)
    #[validate(length(min = 1))]
    pub path: String,

    /// Environment prefix overlaid on the document, e.g. `EVENT_SOURCING`
    #[validate(length(min = 1, max = 64))]
    pub env_prefix: Option<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: "config/event_sourcing.yaml".to_string(),
            env_prefix: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format
    #[validate(length(min = 1))]
    pub format: String,

    /// Include file and line in log records
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
            structured: false,
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OutputConfig {
    /// Pretty-print the JSON report
    pub pretty: bool,

    /// Embed the resolved tree in the report
    pub include_resolved: bool,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Bundle document source
    #[validate(nested)]
    pub document: DocumentConfig,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingConfig,

    /// Report output configuration
    #[validate(nested)]
    pub output: OutputConfig,

    /// Upcasters registered by the application
    #[serde(default)]
    pub upcasters: Vec<UpcasterDescriptor>,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::Result<Self> {
        Self::load_from("EsConfig")
    }

    /// Load configuration layered over defaults from the named file
    ///
    /// The file is optional. `ES_CONFIG__*` variables override both.
    pub fn load_from(name: &str) -> crate::Result<Self> {
        let defaults = config::Config::try_from(&AppConfig::default())
            .map_err(|e| AppError::Config(format!("Failed to build default settings: {}", e)))?;

        let config = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(name).required(false))
            .add_source(
                config::Environment::with_prefix("ES_CONFIG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        config.validate_config()?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> crate::Result<()> {
        self.validate()?;
        crate::config::SettingsValidator::validate_config(self)
    }
}
