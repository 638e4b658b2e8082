//! The merged, immutable configuration view.

use crate::core::ConfigRegistryBuilder;
use std::collections::HashMap;

/// The merged view over all configuration sources.
///
/// Built once at startup by [`ConfigRegistryBuilder`]: sources are merged in
/// ordinal order so higher ordinals win on key collisions. After construction
/// the registry is immutable, so concurrent reads need no locking. Hand it to
/// consumers by ownership (or behind an `Arc`); there is no reload path and no
/// process-wide shared state.
///
/// # Examples
///
/// ```rust,no_run
/// use vaultboot_config::core::ConfigRegistry;
///
/// # fn example() -> vaultboot_config::error::Result<()> {
/// let registry = ConfigRegistry::builder()
///     .with_file("config/application.yaml")
///     .with_env_overrides("APP", "__")
///     .build()?;
///
/// if let Some(url) = registry.get("javax.sql.DataSource.slDataSource.dataSource.url") {
///     println!("datasource url: {url}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigRegistry {
    properties: HashMap<String, String>,
    source_names: Vec<String>,
}

impl ConfigRegistry {
    /// Create a new builder for constructing a registry.
    pub fn builder() -> ConfigRegistryBuilder {
        ConfigRegistryBuilder::new()
    }

    pub(crate) fn new(properties: HashMap<String, String>, source_names: Vec<String>) -> Self {
        Self {
            properties,
            source_names,
        }
    }

    /// Point lookup of a merged property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Iterate over all merged property keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Number of merged properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the merged view holds no properties at all.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Names of the merged sources, in merge (ordinal) order.
    pub fn source_names(&self) -> &[String] {
        &self.source_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_lookup() {
        let mut props = HashMap::new();
        props.insert("a.b".to_string(), "1".to_string());
        let registry = ConfigRegistry::new(props, vec!["test".to_string()]);

        assert_eq!(registry.get("a.b"), Some("1"));
        assert_eq!(registry.get("a.c"), None);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }
}
