//! Validation utilities module
//!
//! This module provides small checks shared by the settings layer.

use crate::shared::error::AppError;

/// Log levels understood by the tracing filter
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log output formats
pub const LOG_FORMATS: [&str; 2] = ["json", "text"];

/// Validation utilities for the application
pub struct ValidationUtils;

impl ValidationUtils {
    /// Validate a service identifier such as `app.clock` or `App\Clock`
    pub fn validate_service_id(id: &str) -> crate::Result<()> {
        if id.is_empty() {
            return Err(AppError::Settings("Service id cannot be empty".to_string()));
        }

        if id.len() > 255 {
            return Err(AppError::Settings(
                "Service id too long (max 255 characters)".to_string(),
            ));
        }

        if id.chars().any(char::is_whitespace) {
            return Err(AppError::Settings(format!(
                "Service id contains whitespace: {:?}",
                id
            )));
        }

        Ok(())
    }

    /// Validate an environment variable prefix
    pub fn validate_env_prefix(prefix: &str) -> crate::Result<()> {
        if prefix.is_empty() {
            return Err(AppError::Settings("Environment prefix cannot be empty".to_string()));
        }

        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(AppError::Settings(format!(
                "Environment prefix contains invalid characters: {}",
                prefix
            )));
        }

        Ok(())
    }

    /// Validate a log level name
    pub fn validate_log_level(level: &str) -> crate::Result<()> {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(AppError::Settings(format!("Invalid log level: {}", level)));
        }
        Ok(())
    }

    /// Validate a log format name
    pub fn validate_log_format(format: &str) -> crate::Result<()> {
        if !LOG_FORMATS.contains(&format) {
            return Err(AppError::Settings(format!("Invalid log format: {}", format)));
        }
        Ok(())
    }
}
