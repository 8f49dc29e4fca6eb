//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use tracing::{error, info, warn};

use crate::domain::validation::ValidationErrors;
use crate::shared::error::AppError;

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    ///
    /// `RUST_LOG` takes precedence over `level` when set.
    pub fn initialize(level: &str, format: &str, structured: bool) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_file(structured)
            .with_line_number(structured)
            .with_writer(std::io::stderr)
            .with_ansi(false);

        let result = if format == "json" {
            tracing::subscriber::set_global_default(builder.json().finish())
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };

        result.map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))
    }

    /// Log the start of a validation run
    pub fn log_validation_started(source: &str) {
        info!(source = %source, "Validating configuration document");
    }

    /// Log a successful validation run
    pub fn log_validation_succeeded(source: &str, aggregates: usize, duration_ms: u64) {
        info!(
            source = %source,
            aggregates = %aggregates,
            duration_ms = %duration_ms,
            "Configuration is valid"
        );
    }

    /// Log every violation of a rejected document
    pub fn log_validation_failed(source: &str, errors: &ValidationErrors) {
        for violation in errors {
            warn!(
                source = %source,
                path = %violation.path,
                kind = ?violation.kind,
                "{}",
                violation.message
            );
        }
        error!(source = %source, errors = %errors.len(), "Configuration rejected");
    }

    /// Log a failure outside validation
    pub fn log_error(source: &str, err: &AppError) {
        error!(source = %source, error = %err, exit_code = %err.exit_code(), "Configuration check failed");
    }
}
