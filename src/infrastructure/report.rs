//! Machine-readable outcome of a configuration check

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::validation::ValidationError;
use crate::domain::wiring::WiringPlan;
use crate::shared::error::{AppError, AppResult};

/// Result of checking one bundle document
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub checked_at: DateTime<Utc>,
    pub source: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<WiringPlan>,
}

impl ValidationReport {
    /// Report for a document that resolved and wired cleanly
    pub fn success(source: impl Into<String>, resolved: Option<Value>, plan: WiringPlan) -> Self {
        Self {
            valid: true,
            checked_at: Utc::now(),
            source: source.into(),
            errors: Vec::new(),
            failure: None,
            resolved,
            plan: Some(plan),
        }
    }

    /// Report for a document rejected at any stage
    pub fn failure(source: impl Into<String>, err: &AppError) -> Self {
        let errors = err
            .validation_errors()
            .map(|errors| errors.errors().to_vec())
            .unwrap_or_default();
        let failure = if errors.is_empty() {
            Some(err.to_string())
        } else {
            None
        };

        Self {
            valid: false,
            checked_at: Utc::now(),
            source: source.into(),
            errors,
            failure,
            resolved: None,
            plan: None,
        }
    }

    /// Render as JSON
    pub fn to_json(&self, pretty: bool) -> AppResult<String> {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(rendered)
    }
}
