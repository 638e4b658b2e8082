//! Secret resolution against the remote vault.

mod client;
mod fetch;
mod locator;

pub use client::{
    AuthContext, BASE64_CONTENT_TYPE, HttpSecretsClient, HttpSecretsClientBuilder, SecretBundle,
    SecretsClient, StaticSecretsClient,
};
pub use fetch::fetch_secret;
pub use locator::{LocatorMode, SecretLocator};
