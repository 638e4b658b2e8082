//! Builder that merges configuration sources into a registry.

use crate::core::ConfigRegistry;
use crate::error::{ConfigError, Result};
use crate::sources::{ConfigSource, EnvSource, FileSource};
use std::collections::HashMap;
use std::path::PathBuf;

/// Builder for constructing a [`ConfigRegistry`].
///
/// Sources are merged in ordinal order (lowest first), so higher ordinal
/// sources override values from lower ordinal sources.
///
/// # Examples
///
/// ```rust,no_run
/// use vaultboot_config::core::ConfigRegistry;
///
/// # fn example() -> vaultboot_config::error::Result<()> {
/// let registry = ConfigRegistry::builder()
///     .with_file("config/default.yaml")
///     .with_file("config/production.yaml")
///     .with_env_overrides("APP", "__")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigRegistryBuilder {
    file_paths: Vec<PathBuf>,
    env_prefix: Option<String>,
    env_separator: Option<String>,
    custom_sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistryBuilder {
    /// Create a new builder with no sources.
    pub fn new() -> Self {
        Self {
            file_paths: Vec::new(),
            env_prefix: None,
            env_separator: None,
            custom_sources: Vec::new(),
        }
    }

    /// Add a file source with automatic format detection.
    ///
    /// Files are added in the order they are specified; later files get a
    /// higher ordinal (100, 110, 120, ...) and override earlier files.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_paths.push(path.into());
        self
    }

    /// Add an environment variable source with custom prefix and separator.
    ///
    /// Environment variables have the highest ordinal by default (300).
    pub fn with_env_overrides(mut self, prefix: &str, separator: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self.env_separator = Some(separator.to_string());
        self
    }

    /// Add a custom configuration source, such as a
    /// [`VaultSecretSource`](crate::sources::VaultSecretSource).
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.custom_sources.push(Box::new(source));
        self
    }

    /// Merge all sources and build the immutable registry.
    ///
    /// # Errors
    ///
    /// Returns an error if no sources were specified or if any source fails to
    /// load. A failing source aborts the whole build; the registry is
    /// all-or-nothing.
    pub fn build(self) -> Result<ConfigRegistry> {
        let mut sources: Vec<Box<dyn ConfigSource>> = Vec::new();

        for (index, path) in self.file_paths.into_iter().enumerate() {
            let ordinal = 100 + (index as i32 * 10);
            sources.push(Box::new(FileSource::new(path).with_ordinal(ordinal)));
        }

        sources.extend(self.custom_sources);

        if let (Some(prefix), Some(separator)) = (self.env_prefix, self.env_separator) {
            sources.push(Box::new(EnvSource::new(prefix, separator)));
        }

        if sources.is_empty() {
            return Err(ConfigError::LoadError(
                "no configuration sources specified".to_string(),
            ));
        }

        // Merge in ordinal order (lowest first) so higher ordinals win.
        sources.sort_by_key(|s| s.ordinal());

        let mut merged = HashMap::new();
        let mut source_names = Vec::with_capacity(sources.len());
        for source in &sources {
            let properties = source.properties().map_err(|e| {
                ConfigError::LoadError(format!("failed to load source '{}': {e}", source.name()))
            })?;
            merged.extend(properties);
            source_names.push(source.name());
        }

        tracing::debug!(sources = ?source_names, "merged configuration sources");
        Ok(ConfigRegistry::new(merged, source_names))
    }
}

impl Default for ConfigRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
