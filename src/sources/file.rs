//! File-based configuration source.

use super::ConfigSource;
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// File-based configuration source.
///
/// Loads configuration from YAML, TOML, or JSON files with automatic format
/// detection based on file extension, flattened into dotted string properties
/// (`server.port`, `javax.sql.DataSource.slDataSource.dataSource.url`).
/// Key case is preserved exactly as written.
///
/// # Examples
///
/// ```rust,no_run
/// use vaultboot_config::sources::FileSource;
///
/// let source = FileSource::new("config/application.yaml");
/// ```
pub struct FileSource {
    path: PathBuf,
    ordinal: i32,
}

impl FileSource {
    /// Create a new file source with automatic format detection.
    ///
    /// The format is detected from the file extension:
    /// - `.yaml`, `.yml` -> YAML
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ordinal: 100,
        }
    }

    /// Set the ordinal for this source.
    ///
    /// Higher ordinal sources override lower ordinal ones.
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Validate that the file extension is supported and return it.
    fn extension(&self) -> Result<&str> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ConfigError::LoadError(format!(
                    "unable to determine file format for: {}",
                    self.path.display()
                ))
            })?;

        match extension {
            "yaml" | "yml" | "toml" | "json" => Ok(extension),
            _ => Err(ConfigError::LoadError(format!(
                "unsupported file extension: {extension}. Supported: .yaml, .yml, .toml, .json"
            ))),
        }
    }

    fn parse(&self, raw: &str) -> Result<serde_json::Value> {
        let parse_err =
            |e: String| ConfigError::DeserializationError(format!("failed to parse file: {e}"));

        match self.extension()? {
            "yaml" | "yml" => {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(raw).map_err(|e| parse_err(e.to_string()))?;
                serde_json::to_value(value).map_err(|e| parse_err(e.to_string()))
            }
            "toml" => {
                let value = raw
                    .parse::<toml::Value>()
                    .map_err(|e| parse_err(e.to_string()))?;
                serde_json::to_value(value).map_err(|e| parse_err(e.to_string()))
            }
            // extension() only admits the four extensions
            _ => serde_json::from_str(raw).map_err(|e| parse_err(e.to_string())),
        }
    }
}

impl ConfigSource for FileSource {
    fn properties(&self) -> Result<HashMap<String, String>> {
        self.extension()?;

        if !self.path.exists() {
            return Err(ConfigError::LoadError(format!(
                "configuration file not found: {}",
                self.path.display()
            )));
        }

        let raw = fs::read_to_string(&self.path)?;
        let parsed = self.parse(&raw)?;

        let mut map = HashMap::new();
        flatten_into("", parsed, &mut map);
        Ok(map)
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }
}

/// Flatten a nested value tree into dotted string properties.
fn flatten_into(prefix: &str, value: serde_json::Value, out: &mut HashMap<String, String>) {
    use serde_json::Value;

    match value {
        Value::Null => {}
        Value::Bool(v) => {
            out.insert(prefix.to_string(), v.to_string());
        }
        Value::Number(v) => {
            out.insert(prefix.to_string(), v.to_string());
        }
        Value::String(v) => {
            out.insert(prefix.to_string(), v);
        }
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                flatten_into(&format!("{prefix}.{index}"), item, out);
            }
        }
        Value::Object(entries) => {
            for (key, nested) in entries {
                let child = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&child, nested, out);
            }
        }
    }
}
