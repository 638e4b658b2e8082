//! Configuration source implementations.

mod config_source;
mod env;
mod file;
mod vault;

pub use config_source::ConfigSource;
pub use env::EnvSource;
pub use file::FileSource;
pub use vault::{DEFAULT_PROPERTY_KEY, VAULT_SOURCE_ORDINAL, VaultSecretSource};
