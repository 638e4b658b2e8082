//! Search-path discovery of the bootstrap file.

use super::BootstrapDocument;
use crate::error::{ConfigError, Result};
use std::fs;
use std::path::PathBuf;

/// Well-known bootstrap file name.
pub const DEFAULT_RESOURCE_NAME: &str = "application.yaml";

/// Locates and parses the bootstrap file from an ordered search path.
///
/// When the file exists in more than one search-path directory the first copy
/// wins; every ignored duplicate is reported with a warning so ambiguous
/// deployments stay visible. This policy is deliberate rather than failing on
/// ambiguity.
///
/// # Examples
///
/// ```rust,no_run
/// use vaultboot_config::bootstrap::BootstrapLoader;
///
/// let doc = BootstrapLoader::new()
///     .with_search_path(["config", "."])
///     .load()?;
/// # Ok::<(), vaultboot_config::error::ConfigError>(())
/// ```
pub struct BootstrapLoader {
    resource_name: String,
    search_path: Vec<PathBuf>,
}

impl BootstrapLoader {
    /// Create a loader for [`DEFAULT_RESOURCE_NAME`] with the default search
    /// path of `config/` followed by the working directory.
    pub fn new() -> Self {
        Self {
            resource_name: DEFAULT_RESOURCE_NAME.to_string(),
            search_path: vec![PathBuf::from("config"), PathBuf::from(".")],
        }
    }

    /// Override the well-known file name.
    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = name.into();
        self
    }

    /// Replace the directory search path. Order is significant.
    pub fn with_search_path<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_path = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Load and parse the first discoverable copy of the bootstrap file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ResourceNotFound`] when no directory on the
    /// search path contains the file, plus any parse error from
    /// [`BootstrapDocument::parse`].
    pub fn load(&self) -> Result<BootstrapDocument> {
        let mut found: Vec<PathBuf> = self
            .search_path
            .iter()
            .map(|dir| dir.join(&self.resource_name))
            .filter(|candidate| candidate.is_file())
            .collect();

        if found.is_empty() {
            return Err(ConfigError::ResourceNotFound(self.resource_name.clone()));
        }

        let chosen = found.remove(0);
        for ignored in &found {
            tracing::warn!(
                chosen = %chosen.display(),
                ignored = %ignored.display(),
                "duplicate bootstrap resource ignored"
            );
        }

        let raw = fs::read_to_string(&chosen)?;
        BootstrapDocument::parse(&chosen.display().to_string(), &raw)
    }
}

impl Default for BootstrapLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_single_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("application.yaml"), "oci:\n  secret:\n    id: abc\n").unwrap();

        let doc = BootstrapLoader::new()
            .with_search_path([dir.path()])
            .load()
            .unwrap();

        let id = doc
            .section("oci")
            .unwrap()
            .section("secret")
            .unwrap()
            .scalar("id")
            .unwrap();
        assert_eq!(id, "abc");
    }

    #[test]
    fn test_first_directory_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("application.yaml"), "oci:\n  secret:\n    id: first\n")
            .unwrap();
        fs::write(second.path().join("application.yaml"), "oci:\n  secret:\n    id: second\n")
            .unwrap();

        let doc = BootstrapLoader::new()
            .with_search_path([first.path(), second.path()])
            .load()
            .unwrap();

        let id = doc
            .section("oci")
            .unwrap()
            .section("secret")
            .unwrap()
            .scalar("id")
            .unwrap();
        assert_eq!(id, "first");
    }

    #[test]
    fn test_not_found_anywhere() {
        let empty = TempDir::new().unwrap();
        let err = BootstrapLoader::new()
            .with_search_path([empty.path()])
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ResourceNotFound(ref n) if n == "application.yaml"));
    }

    #[test]
    fn test_custom_resource_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bootstrap.yaml"), "oci:\n  vault:\n    id: v1\n").unwrap();

        let doc = BootstrapLoader::new()
            .with_resource_name("bootstrap.yaml")
            .with_search_path([dir.path()])
            .load()
            .unwrap();
        assert!(doc.section("oci").is_ok());
    }

    #[test]
    fn test_empty_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("application.yaml"), "").unwrap();

        let err = BootstrapLoader::new()
            .with_search_path([dir.path()])
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyDocument(_)));
    }
}
