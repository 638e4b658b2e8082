//! By-name secret addressing against an in-process client.
//!
//! Shows the alternate locator mode: the bootstrap file carries a secret name
//! and a vault identifier instead of a secret identifier. Uses the in-memory
//! client so the demo runs without a real vault service.
//!
//! Run with: cargo run --example by_name

use std::fs;
use vaultboot_config::bootstrap::BootstrapLoader;
use vaultboot_config::prelude::*;
use vaultboot_config::secrets::StaticSecretsClient;
use vaultboot_config::sources::DEFAULT_PROPERTY_KEY;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let dir = tempfile::TempDir::new()?;
    fs::write(
        dir.path().join("application.yaml"),
        "oci:\n  secret:\n    name: db-password\n  vault:\n    id: ocid1.vault.oc1..demo\n",
    )?;

    let client = StaticSecretsClient::new().with_named_secret(
        "db-password",
        "ocid1.vault.oc1..demo",
        "s3cr3t-from-vault",
    );

    let source = VaultSecretSource::builder()
        .with_bootstrap(BootstrapLoader::new().with_search_path([dir.path()]))
        .with_mode(LocatorMode::ByName)
        .build(&client)
        .await?;

    let registry = ConfigRegistry::builder().with_source(source).build()?;

    println!(
        "{DEFAULT_PROPERTY_KEY} = {}",
        registry.get(DEFAULT_PROPERTY_KEY).unwrap_or("<unset>")
    );
    Ok(())
}
