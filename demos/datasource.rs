//! Datasource configuration echo endpoint.
//!
//! Builds the merged registry (application file + vault-resolved password +
//! env overrides) and serves the four datasource properties as JSON:
//!
//!   curl -X GET http://localhost:8080/datasource
//!
//! Requires a reachable vault service and a bootstrap `application.yaml`
//! holding `oci.secret.id`:
//!
//!   VAULT_ENDPOINT=https://secrets.vaults.<region>.example.com/20190301 \
//!   VAULT_TOKEN=<token> \
//!   cargo run --example datasource

use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;
use vaultboot_config::prelude::*;

const DATASOURCE_CLASS_NAME: &str = "javax.sql.DataSource.slDataSource.dataSourceClassName";
const DATASOURCE_URL: &str = "javax.sql.DataSource.slDataSource.dataSource.url";
const DATASOURCE_USER: &str = "javax.sql.DataSource.slDataSource.dataSource.user";
const DATASOURCE_PASSWORD: &str = "javax.sql.DataSource.slDataSource.dataSource.password";

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = HttpSecretsClient::builder()
        .with_endpoint(std::env::var("VAULT_ENDPOINT")?)
        .with_auth(AuthContext::Token(std::env::var("VAULT_TOKEN")?))
        .build()?;

    // Fixed startup sequence: bootstrap -> locator -> fetch -> property map.
    // Any failure here aborts the process before it can serve anything.
    let secret_source = VaultSecretSource::builder().build(&client).await?;

    let registry = ConfigRegistry::builder()
        .with_file("config/application.yaml")
        .with_source(secret_source)
        .with_env_overrides("APP", "__")
        .build()?;

    let app = Router::new()
        .route("/datasource", get(datasource))
        .with_state(Arc::new(registry));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on http://0.0.0.0:8080/datasource");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn datasource(State(registry): State<Arc<ConfigRegistry>>) -> Json<serde_json::Value> {
    let lookup = |key: &str| registry.get(key).unwrap_or("<unset>").to_string();
    Json(serde_json::json!({
        (DATASOURCE_CLASS_NAME): lookup(DATASOURCE_CLASS_NAME),
        (DATASOURCE_URL): lookup(DATASOURCE_URL),
        (DATASOURCE_USER): lookup(DATASOURCE_USER),
        (DATASOURCE_PASSWORD): lookup(DATASOURCE_PASSWORD),
    }))
}
