//! Bundle document loading
//!
//! Documents are read through the `config` crate so the format follows the
//! file extension and environment variables can be layered on top.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::domain::schema::ROOT_NAME;
use crate::shared::error::{AppError, AppResult};

/// Reads bundle documents into the untyped tree the validator consumes
#[derive(Debug, Clone, Default)]
pub struct DocumentLoader {
    env_prefix: Option<String>,
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `<PREFIX>__SECTION__KEY` variables on loaded files
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Load a YAML, JSON or TOML document from disk
    pub fn load_file(&self, path: impl AsRef<Path>) -> AppResult<Value> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::Io(format!(
                "Configuration document not found: {}",
                path.display()
            )));
        }

        debug!(path = %path.display(), env_prefix = ?self.env_prefix, "Loading configuration document");

        let mut builder = config::Config::builder().add_source(config::File::from(path));
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let document: Value = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to read {}: {}", path.display(), e)))?
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

        Ok(unwrap_root(document))
    }

    /// Parse a YAML document held in memory
    pub fn from_yaml_str(content: &str) -> AppResult<Value> {
        let document: Value = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Yaml))
            .build()?
            .try_deserialize()?;
        Ok(unwrap_root(document))
    }

    /// Parse a JSON document held in memory
    pub fn from_json_str(content: &str) -> AppResult<Value> {
        Ok(unwrap_root(serde_json::from_str(content)?))
    }

    /// Parse a TOML document held in memory
    pub fn from_toml_str(content: &str) -> AppResult<Value> {
        Ok(unwrap_root(toml::from_str(content)?))
    }
}

/// Accept both the bare bundle tree and one nested under `event_sourcing`
fn unwrap_root(document: Value) -> Value {
    match document {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(ROOT_NAME) => {
            map.remove(ROOT_NAME).unwrap_or(Value::Null)
        }
        other => other,
    }
}
