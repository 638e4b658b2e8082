//! Bootstrap file loading.
//!
//! The bootstrap file is read before the configuration registry exists, which
//! is why this module parses it directly instead of going through a
//! [`ConfigSource`](crate::sources::ConfigSource).

mod document;
mod loader;

pub use document::{BootstrapDocument, Section};
pub use loader::{BootstrapLoader, DEFAULT_RESOURCE_NAME};
