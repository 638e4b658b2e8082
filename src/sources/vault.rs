//! Vault-backed configuration source.

use super::ConfigSource;
use crate::bootstrap::BootstrapLoader;
use crate::error::Result;
use crate::secrets::{LocatorMode, SecretLocator, SecretsClient, fetch_secret};
use std::collections::HashMap;

/// Default property key the resolved secret is published under.
pub const DEFAULT_PROPERTY_KEY: &str = "javax.sql.DataSource.slDataSource.dataSource.password";

/// Ordinal of the vault source. Above the file baseline of 100 so the secret
/// wins whenever the same key also appears in an ordinary source.
pub const VAULT_SOURCE_ORDINAL: i32 = 200;

/// Configuration source backed by a secret resolved from a remote vault.
///
/// Construction runs a fixed sequence that must not be reordered: load the
/// bootstrap document, resolve the secret locator, fetch and decode the
/// secret, build the one-entry property map. Any failing step aborts the
/// whole construction, so a half-built source is never observable. Once
/// built, all state is immutable and reads are lock-free.
///
/// # Examples
///
/// ```rust,no_run
/// use vaultboot_config::bootstrap::BootstrapLoader;
/// use vaultboot_config::secrets::{AuthContext, HttpSecretsClient, LocatorMode};
/// use vaultboot_config::sources::VaultSecretSource;
///
/// # async fn example() -> vaultboot_config::error::Result<()> {
/// let client = HttpSecretsClient::builder()
///     .with_endpoint("https://secrets.vaults.example.com/20190301")
///     .with_auth(AuthContext::Token("token".into()))
///     .build()?;
///
/// let source = VaultSecretSource::builder()
///     .with_bootstrap(BootstrapLoader::new().with_search_path(["config"]))
///     .with_mode(LocatorMode::ById)
///     .build(&client)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct VaultSecretSource {
    properties: HashMap<String, String>,
}

impl VaultSecretSource {
    /// Create a new builder for constructing a vault source.
    pub fn builder() -> VaultSecretSourceBuilder {
        VaultSecretSourceBuilder::new()
    }
}

impl ConfigSource for VaultSecretSource {
    fn properties(&self) -> Result<HashMap<String, String>> {
        Ok(self.properties.clone())
    }

    fn name(&self) -> String {
        "vault-secret".to_string()
    }

    fn ordinal(&self) -> i32 {
        VAULT_SOURCE_ORDINAL
    }

    fn value(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }
}

/// Builder for constructing a [`VaultSecretSource`].
pub struct VaultSecretSourceBuilder {
    bootstrap: BootstrapLoader,
    mode: LocatorMode,
    property_key: String,
}

impl VaultSecretSourceBuilder {
    /// Create a builder with the default bootstrap loader, by-id addressing,
    /// and [`DEFAULT_PROPERTY_KEY`].
    pub fn new() -> Self {
        Self {
            bootstrap: BootstrapLoader::new(),
            mode: LocatorMode::ById,
            property_key: DEFAULT_PROPERTY_KEY.to_string(),
        }
    }

    /// Replace the bootstrap loader.
    pub fn with_bootstrap(mut self, loader: BootstrapLoader) -> Self {
        self.bootstrap = loader;
        self
    }

    /// Choose the secret addressing mode. Default is by-id.
    pub fn with_mode(mut self, mode: LocatorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Publish the secret under a different property key.
    pub fn with_property_key(mut self, key: impl Into<String>) -> Self {
        self.property_key = key.into();
        self
    }

    /// Run the construction sequence against `client`.
    ///
    /// # Errors
    ///
    /// Propagates bootstrap, resolution, and retrieval failures unchanged.
    /// There is no retry and no fallback value; a failure here must abort
    /// startup.
    pub async fn build(self, client: &dyn SecretsClient) -> Result<VaultSecretSource> {
        let document = self.bootstrap.load()?;
        let locator = SecretLocator::resolve(&document, self.mode)?;
        let secret = fetch_secret(client, &locator).await?;
        tracing::debug!(key = %self.property_key, "vault secret resolved and published");

        let mut properties = HashMap::with_capacity(1);
        properties.insert(self.property_key, secret);
        Ok(VaultSecretSource { properties })
    }
}

impl Default for VaultSecretSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::StaticSecretsClient;

    #[tokio::test]
    async fn test_source_identity() {
        let client = StaticSecretsClient::new().with_secret("s1", "pw");
        // Identity is fixed regardless of content, so a minimal build suffices.
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("application.yaml"), "oci:\n  secret:\n    id: s1\n")
            .unwrap();

        let source = VaultSecretSource::builder()
            .with_bootstrap(BootstrapLoader::new().with_search_path([dir.path()]))
            .build(&client)
            .await
            .unwrap();

        assert_eq!(source.name(), "vault-secret");
        assert_eq!(source.ordinal(), VAULT_SOURCE_ORDINAL);
        assert!(source.ordinal() > 100);
    }
}
