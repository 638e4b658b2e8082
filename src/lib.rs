//! # vaultboot-config
//!
//! Bootstrap-time vault secret resolution published as a high-priority
//! configuration source.
//!
//! ## Overview
//!
//! At process startup, before the ordinary configuration machinery is
//! available, this crate:
//!
//! 1. Locates a bootstrap file (`application.yaml`) on an ordered search path
//!    and parses it independently of everything else
//! 2. Resolves a secret address from it, either by identifier
//!    (`oci.secret.id`) or by name within a vault (`oci.secret.name` +
//!    `oci.vault.id`)
//! 3. Fetches the secret bundle from the remote vault service, rejects any
//!    non-base64 content tag, and decodes the plaintext
//! 4. Publishes the plaintext as a single property in a source whose ordinal
//!    (200) beats the file baseline (100), so the resolved secret wins when
//!    the same key appears in an ordinary source
//!
//! Every step is fail-fast: no retries, no fallback values, no partially
//! constructed source. A process must never come up serving a placeholder
//! password.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vaultboot_config::prelude::*;
//!
//! # async fn example() -> vaultboot_config::error::Result<()> {
//! let client = HttpSecretsClient::builder()
//!     .with_endpoint("https://secrets.vaults.example.com/20190301")
//!     .with_auth(AuthContext::Token("token".into()))
//!     .build()?;
//!
//! let secret_source = VaultSecretSource::builder()
//!     .with_mode(LocatorMode::ById)
//!     .build(&client)
//!     .await?;
//!
//! let registry = ConfigRegistry::builder()
//!     .with_file("config/application.yaml")
//!     .with_source(secret_source)
//!     .with_env_overrides("APP", "__")
//!     .build()?;
//!
//! let password = registry.get("javax.sql.DataSource.slDataSource.dataSource.password");
//! # Ok(())
//! # }
//! ```
//!
//! ## Bootstrap file shape
//!
//! ```yaml
//! oci:
//!   secret:
//!     id: <secret identifier>     # required for by-id mode
//!     name: <secret name>         # required for by-name mode
//!   vault:
//!     id: <vault identifier>      # required for by-name mode
//! ```
//!
//! Missing required keys for the active mode are fatal at startup.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod bootstrap;
pub mod core;
pub mod error;
pub mod secrets;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::bootstrap::{BootstrapDocument, BootstrapLoader};
    pub use crate::core::{ConfigRegistry, ConfigRegistryBuilder};
    pub use crate::error::{ConfigError, Result, SecretError};
    pub use crate::secrets::{
        AuthContext, HttpSecretsClient, LocatorMode, SecretLocator, SecretsClient,
    };
    pub use crate::sources::{ConfigSource, VaultSecretSource};
}
