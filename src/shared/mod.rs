//! Shared utilities and common functionality
//!
//! This module contains error handling, logging and validation helpers
//! used across the application.

pub mod error;
pub mod logging;
pub mod validation;

pub use error::{AppError, AppResult};
pub use logging::LoggingUtils;
pub use validation::ValidationUtils;
