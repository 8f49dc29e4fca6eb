//! Error handling module
//!
//! This module provides centralized error handling for the application.

use thiserror::Error;

use crate::domain::validation::ValidationErrors;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed with {count} error(s):\n{0}", count = .0.len())]
    Validation(ValidationErrors),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Wiring error: {0}")]
    Wiring(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) => 1,
            AppError::Wiring(_) => 2,
            AppError::Config(_) | AppError::Settings(_) => 3,
            AppError::Io(_) => 4,
            AppError::Json(_) | AppError::Internal(_) => 70,
        }
    }

    /// Collected violations when this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Settings(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
