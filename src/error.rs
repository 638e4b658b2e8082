//! Error types for vaultboot-config.

/// Result type alias for vaultboot-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while assembling the configuration registry.
///
/// Every variant produced during bootstrap loading, locator resolution, or
/// secret retrieval is unrecoverable: the process must fail at startup rather
/// than come up with an unresolved or placeholder secret.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The bootstrap file could not be found anywhere on the search path.
    #[error("bootstrap resource '{0}' not found on the search path")]
    ResourceNotFound(String),

    /// The bootstrap file exists but is not valid structured content.
    #[error("failed to parse bootstrap resource '{name}': {reason}")]
    ParseFailure {
        /// Path of the resource that failed to parse.
        name: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The bootstrap file parsed to no content at all.
    #[error("bootstrap resource '{0}' parsed to an empty document")]
    EmptyDocument(String),

    /// A required section is absent from the bootstrap document.
    #[error("required section '{0}' is missing from the bootstrap document")]
    MissingSection(String),

    /// A required scalar is absent under a section that is present.
    #[error("required field '{field}' is missing under section '{section}'")]
    MissingField {
        /// Dotted path of the section that was found.
        section: String,
        /// The scalar that was expected under it.
        field: String,
    },

    /// Secret retrieval failed; carries the underlying cause.
    #[error("failed to retrieve secret: {0}")]
    SecretRetrieval(#[from] SecretError),

    /// Failed to load configuration from a source.
    #[error("failed to load configuration: {0}")]
    LoadError(String),

    /// Failed to deserialize configuration.
    #[error("failed to deserialize configuration: {0}")]
    DeserializationError(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the vault client and the fetch/decode step.
///
/// At the registry boundary these are wrapped into
/// [`ConfigError::SecretRetrieval`]. None of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// The vault identity could not be established.
    #[error("failed to establish vault identity: {0}")]
    Authentication(String),

    /// The remote call failed in transit or with an unexpected status.
    #[error("vault transport failure: {0}")]
    Transport(String),

    /// The vault service has no secret at the requested address.
    #[error("secret not found: {0}")]
    NotFound(String),

    /// The returned bundle is tagged with an encoding this crate cannot decode.
    #[error("unsupported secret content encoding '{0}' (only BASE64 is supported)")]
    UnsupportedContentEncoding(String),

    /// The bundle payload was tagged BASE64 but could not be decoded.
    #[error("secret payload could not be decoded: {0}")]
    InvalidPayload(String),
}
