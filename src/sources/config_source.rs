//! Configuration source trait.

use crate::error::Result;
use std::collections::HashMap;

/// Trait for configuration sources.
///
/// A source exposes a flat map of string properties plus a fixed identity and
/// merge priority. Implement this trait to publish properties from custom
/// backends (remote APIs, databases, key-value stores).
///
/// Default ordinals:
/// - Environment variables: 300
/// - Vault-backed secrets: 200
/// - Configuration files: 100 (the baseline layer)
pub trait ConfigSource: Send + Sync {
    /// The full property map of this source.
    ///
    /// The returned map is merged with other sources by the registry; on a key
    /// collision the source with the higher ordinal wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be loaded or parsed.
    fn properties(&self) -> Result<HashMap<String, String>>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the merge priority of this source (higher = takes precedence).
    fn ordinal(&self) -> i32 {
        100
    }

    /// Point lookup of a single property in this source.
    fn value(&self, key: &str) -> Option<String> {
        self.properties().ok().and_then(|mut map| map.remove(key))
    }
}
