//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use std::collections::HashSet;

use crate::config::AppConfig;
use crate::domain::wiring::UpcasterDescriptor;
use crate::shared::error::AppError;
use crate::shared::validation::ValidationUtils;

/// Configuration validator for additional validation logic
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        ValidationUtils::validate_log_level(&config.logging.level)?;
        ValidationUtils::validate_log_format(&config.logging.format)?;

        if let Some(prefix) = &config.document.env_prefix {
            ValidationUtils::validate_env_prefix(prefix)?;
        }

        Self::validate_upcasters(&config.upcasters)?;

        Ok(())
    }

    /// Validate the registered upcasters
    fn validate_upcasters(upcasters: &[UpcasterDescriptor]) -> crate::Result<()> {
        let mut seen = HashSet::new();

        for upcaster in upcasters {
            ValidationUtils::validate_service_id(&upcaster.service_id)?;

            if upcaster.aggregate.is_empty() {
                return Err(AppError::Settings(format!(
                    "Upcaster {} has no aggregate",
                    upcaster.service_id
                )));
            }

            if upcaster.version == 0 {
                return Err(AppError::Settings(format!(
                    "Upcaster {} must have a version of at least 1",
                    upcaster.service_id
                )));
            }

            if !seen.insert(upcaster.service_id.as_str()) {
                return Err(AppError::Settings(format!(
                    "Upcaster {} is registered twice",
                    upcaster.service_id
                )));
            }
        }

        Ok(())
    }
}
