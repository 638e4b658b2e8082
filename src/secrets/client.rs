//! Vault secrets clients: the retrieval trait, an HTTP implementation, and an
//! in-memory implementation for tests and local demos.

use crate::error::SecretError;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Content-encoding tag the vault service uses for base64 payloads.
pub const BASE64_CONTENT_TYPE: &str = "BASE64";

/// A secret bundle as returned by the vault service.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretBundle {
    /// Encoding tag of `content`. Only [`BASE64_CONTENT_TYPE`] is supported.
    #[serde(rename = "contentType")]
    pub content_type: String,
    /// The encoded payload.
    pub content: String,
}

impl SecretBundle {
    /// Build a base64-tagged bundle from plaintext.
    pub fn base64_of(plaintext: &str) -> Self {
        Self {
            content_type: BASE64_CONTENT_TYPE.to_string(),
            content: STANDARD.encode(plaintext.as_bytes()),
        }
    }
}

/// The two retrieval operations the vault service exposes.
///
/// The configuration source depends only on these calls; how the client is
/// constructed and authenticated is a deployment choice. Any mechanism that
/// yields a usable handle is acceptable.
#[async_trait]
pub trait SecretsClient: Send + Sync {
    /// Fetch the current bundle for a secret by its identifier.
    async fn get_bundle(&self, secret_id: &str) -> Result<SecretBundle, SecretError>;

    /// Fetch the current bundle for a secret by name within a vault.
    async fn get_bundle_by_name(
        &self,
        secret_name: &str,
        vault_id: &str,
    ) -> Result<SecretBundle, SecretError>;
}

/// How the HTTP client establishes its identity with the vault service.
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// A pre-issued bearer token (ambient identity).
    Token(String),
    /// A file-based identity profile: a TOML file whose named tables each
    /// carry a `token` entry.
    Profile {
        /// Path of the profile file.
        path: PathBuf,
        /// Name of the profile table to use, e.g. `DEFAULT`.
        profile: String,
    },
}

impl AuthContext {
    /// Resolve the bearer token for this identity.
    fn bearer_token(&self) -> Result<String, SecretError> {
        match self {
            Self::Token(token) => Ok(token.clone()),
            Self::Profile { path, profile } => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    SecretError::Authentication(format!(
                        "cannot read identity profile {}: {e}",
                        path.display()
                    ))
                })?;
                let table: toml::Table = raw.parse().map_err(|e| {
                    SecretError::Authentication(format!(
                        "invalid identity profile {}: {e}",
                        path.display()
                    ))
                })?;
                table
                    .get(profile)
                    .and_then(|section| section.get("token"))
                    .and_then(|token| token.as_str())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        SecretError::Authentication(format!(
                            "profile '{profile}' in {} has no token",
                            path.display()
                        ))
                    })
            }
        }
    }
}

/// HTTP vault client.
///
/// Speaks the secret-retrieval REST surface: `GET /secretbundles/{id}` and
/// `GET /secretbundles/actions/getByName`. Timeouts are whatever the
/// underlying HTTP client enforces; there is no retry policy here.
///
/// # Examples
///
/// ```rust,no_run
/// use vaultboot_config::secrets::{AuthContext, HttpSecretsClient};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), vaultboot_config::error::SecretError> {
/// let client = HttpSecretsClient::builder()
///     .with_endpoint("https://secrets.vaults.example.com/20190301")
///     .with_auth(AuthContext::Token("token".into()))
///     .with_timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct HttpSecretsClient {
    endpoint: String,
    client: Client,
    token: String,
}

impl HttpSecretsClient {
    /// Create a new builder for constructing an HTTP client.
    pub fn builder() -> HttpSecretsClientBuilder {
        HttpSecretsClientBuilder::new()
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<SecretBundle, SecretError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| SecretError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SecretError::NotFound(what.to_string()));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SecretError::Authentication(format!(
                "vault rejected credentials for {what}: {status}"
            )));
        }
        if !status.is_success() {
            return Err(SecretError::Transport(format!(
                "vault returned {status} for {what}"
            )));
        }

        let envelope: SecretBundleEnvelope = response
            .json()
            .await
            .map_err(|e| SecretError::Transport(format!("invalid vault response: {e}")))?;
        Ok(envelope.secret_bundle_content)
    }
}

#[async_trait]
impl SecretsClient for HttpSecretsClient {
    async fn get_bundle(&self, secret_id: &str) -> Result<SecretBundle, SecretError> {
        let request = self
            .client
            .get(format!("{}/secretbundles/{secret_id}", self.endpoint));
        self.send(request, secret_id).await
    }

    async fn get_bundle_by_name(
        &self,
        secret_name: &str,
        vault_id: &str,
    ) -> Result<SecretBundle, SecretError> {
        let request = self
            .client
            .get(format!("{}/secretbundles/actions/getByName", self.endpoint))
            .query(&[("secretName", secret_name), ("vaultId", vault_id)]);
        self.send(request, secret_name).await
    }
}

/// Response envelope around the bundle content.
#[derive(Debug, Deserialize)]
struct SecretBundleEnvelope {
    #[serde(rename = "secretBundleContent")]
    secret_bundle_content: SecretBundle,
}

/// Builder for constructing an [`HttpSecretsClient`].
pub struct HttpSecretsClientBuilder {
    endpoint: Option<String>,
    auth: Option<AuthContext>,
    timeout: Duration,
}

impl HttpSecretsClientBuilder {
    /// Create a new builder with a 10 second timeout.
    pub fn new() -> Self {
        Self {
            endpoint: None,
            auth: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Set the vault service endpoint, e.g.
    /// `https://secrets.vaults.<region>.example.com/20190301`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the identity used to authenticate with the vault service.
    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set the request timeout. Default is 10 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client, establishing the identity now.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Authentication`] if no identity is configured or
    /// the profile file cannot yield a token, and [`SecretError::Transport`]
    /// if the HTTP client cannot be constructed or no endpoint is set.
    pub fn build(self) -> Result<HttpSecretsClient, SecretError> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| SecretError::Transport("endpoint is required".to_string()))?
            .trim_end_matches('/')
            .to_string();

        let token = self
            .auth
            .ok_or_else(|| {
                SecretError::Authentication("no vault identity configured".to_string())
            })?
            .bearer_token()?;

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SecretError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(HttpSecretsClient {
            endpoint,
            client,
            token,
        })
    }
}

impl Default for HttpSecretsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory client for tests and local demos.
///
/// Holds bundles keyed by identifier and by `(name, vault)`; lookups that miss
/// return [`SecretError::NotFound`].
#[derive(Debug, Default)]
pub struct StaticSecretsClient {
    by_id: HashMap<String, SecretBundle>,
    by_name: HashMap<(String, String), SecretBundle>,
}

impl StaticSecretsClient {
    /// Create an empty client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plaintext secret addressable by identifier.
    pub fn with_secret(mut self, secret_id: &str, plaintext: &str) -> Self {
        self.by_id
            .insert(secret_id.to_string(), SecretBundle::base64_of(plaintext));
        self
    }

    /// Register a plaintext secret addressable by name within a vault.
    pub fn with_named_secret(mut self, secret_name: &str, vault_id: &str, plaintext: &str) -> Self {
        self.by_name.insert(
            (secret_name.to_string(), vault_id.to_string()),
            SecretBundle::base64_of(plaintext),
        );
        self
    }

    /// Register a raw bundle addressable by identifier, tag and all.
    pub fn with_bundle(mut self, secret_id: &str, bundle: SecretBundle) -> Self {
        self.by_id.insert(secret_id.to_string(), bundle);
        self
    }
}

#[async_trait]
impl SecretsClient for StaticSecretsClient {
    async fn get_bundle(&self, secret_id: &str) -> Result<SecretBundle, SecretError> {
        self.by_id
            .get(secret_id)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(secret_id.to_string()))
    }

    async fn get_bundle_by_name(
        &self,
        secret_name: &str,
        vault_id: &str,
    ) -> Result<SecretBundle, SecretError> {
        self.by_name
            .get(&(secret_name.to_string(), vault_id.to_string()))
            .cloned()
            .ok_or_else(|| SecretError::NotFound(secret_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builder() {
        let client = HttpSecretsClient::builder()
            .with_endpoint("https://secrets.example.com/20190301/")
            .with_auth(AuthContext::Token("token123".to_string()))
            .with_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        // Trailing slash is normalized away.
        assert_eq!(client.endpoint, "https://secrets.example.com/20190301");
        assert_eq!(client.token, "token123");
    }

    #[test]
    fn test_builder_no_endpoint() {
        let result = HttpSecretsClient::builder()
            .with_auth(AuthContext::Token("token".to_string()))
            .build();
        assert!(matches!(result, Err(SecretError::Transport(_))));
    }

    #[test]
    fn test_builder_no_auth() {
        let result = HttpSecretsClient::builder()
            .with_endpoint("https://secrets.example.com")
            .build();
        assert!(matches!(result, Err(SecretError::Authentication(_))));
    }

    #[test]
    fn test_profile_auth() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.toml");
        fs::write(&path, "[DEFAULT]\ntoken = \"from-profile\"\n\n[OTHER]\ntoken = \"nope\"\n")
            .unwrap();

        let auth = AuthContext::Profile {
            path: path.clone(),
            profile: "DEFAULT".to_string(),
        };
        assert_eq!(auth.bearer_token().unwrap(), "from-profile");
    }

    #[test]
    fn test_profile_auth_missing_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.toml");
        fs::write(&path, "[DEFAULT]\ntoken = \"t\"\n").unwrap();

        let auth = AuthContext::Profile {
            path,
            profile: "MISSING".to_string(),
        };
        assert!(matches!(
            auth.bearer_token(),
            Err(SecretError::Authentication(_))
        ));
    }

    #[test]
    fn test_profile_auth_missing_file() {
        let auth = AuthContext::Profile {
            path: PathBuf::from("/nonexistent/profile.toml"),
            profile: "DEFAULT".to_string(),
        };
        assert!(matches!(
            auth.bearer_token(),
            Err(SecretError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_static_client_miss_is_not_found() {
        let client = StaticSecretsClient::new().with_secret("known", "pw");
        let err = client.get_bundle("unknown").await.unwrap_err();
        assert!(matches!(err, SecretError::NotFound(_)));

        let err = client
            .get_bundle_by_name("unknown", "vault")
            .await
            .unwrap_err();
        assert!(matches!(err, SecretError::NotFound(_)));
    }

    #[test]
    fn test_base64_bundle_tag() {
        let bundle = SecretBundle::base64_of("secretpw");
        assert_eq!(bundle.content_type, BASE64_CONTENT_TYPE);
        assert_ne!(bundle.content, "secretpw");
    }
}
