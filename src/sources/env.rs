//! Environment variable configuration source.

use super::ConfigSource;
use crate::error::{ConfigError, Result};
use config::Environment;
use std::collections::HashMap;

/// Environment variable configuration source.
///
/// Loads configuration from environment variables with a specified prefix
/// and separator for nested keys. Keys come back lowercased, the usual
/// convention for environment-derived properties.
///
/// # Examples
///
/// ```rust
/// use vaultboot_config::sources::EnvSource;
///
/// // APP_SERVER__PORT=8080 -> server.port = 8080
/// let source = EnvSource::new("APP", "__");
/// ```
pub struct EnvSource {
    prefix: String,
    separator: String,
    ordinal: i32,
}

impl EnvSource {
    /// Create a new environment variable source.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Prefix for environment variables (e.g., "APP")
    /// * `separator` - Separator for nested keys (e.g., "__" for APP_DB__HOST)
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
            ordinal: 300, // Env vars have the highest ordinal by default
        }
    }

    /// Set the ordinal for this source.
    ///
    /// Higher ordinal sources override lower ordinal ones.
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }
}

impl ConfigSource for EnvSource {
    fn properties(&self) -> Result<HashMap<String, String>> {
        // Use the config crate's Environment source. The prefix separator must
        // be pinned to "_": without it the nesting separator doubles as the
        // prefix separator, and the documented APP_SERVER__PORT spelling would
        // silently match nothing.
        let env_source = Environment::with_prefix(&self.prefix)
            .prefix_separator("_")
            .separator(&self.separator);

        let config_builder = config::Config::builder()
            .add_source(env_source)
            .build()
            .map_err(|e| {
                ConfigError::LoadError(format!("failed to load environment variables: {e}"))
            })?;

        let nested = config_builder
            .try_deserialize::<HashMap<String, config::Value>>()
            .map_err(|e| {
                ConfigError::DeserializationError(format!(
                    "failed to parse environment variables: {e}"
                ))
            })?;

        let mut map = HashMap::new();
        for (key, value) in nested {
            flatten_into(&key, value, &mut map);
        }
        Ok(map)
    }

    fn name(&self) -> String {
        format!("env:{}*", self.prefix)
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }
}

/// Flatten a `config::Value` tree into dotted string properties.
fn flatten_into(prefix: &str, value: config::Value, out: &mut HashMap<String, String>) {
    use config::ValueKind;

    match value.kind {
        ValueKind::Nil => {}
        ValueKind::Boolean(v) => {
            out.insert(prefix.to_string(), v.to_string());
        }
        ValueKind::I64(v) => {
            out.insert(prefix.to_string(), v.to_string());
        }
        ValueKind::I128(v) => {
            out.insert(prefix.to_string(), v.to_string());
        }
        ValueKind::U64(v) => {
            out.insert(prefix.to_string(), v.to_string());
        }
        ValueKind::U128(v) => {
            out.insert(prefix.to_string(), v.to_string());
        }
        ValueKind::Float(v) => {
            out.insert(prefix.to_string(), v.to_string());
        }
        ValueKind::String(v) => {
            out.insert(prefix.to_string(), v);
        }
        ValueKind::Table(table) => {
            for (key, nested) in table {
                flatten_into(&format!("{prefix}.{key}"), nested, out);
            }
        }
        ValueKind::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                flatten_into(&format!("{prefix}.{index}"), item, out);
            }
        }
    }
}
