//! Secret retrieval and decoding.

use super::client::{BASE64_CONTENT_TYPE, SecretsClient};
use super::locator::SecretLocator;
use crate::error::SecretError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Fetch and decode the plaintext secret addressed by `locator`.
///
/// Exactly one remote call is dispatched, selected by the locator variant.
/// The returned bundle must be tagged `BASE64`; any other tag is rejected
/// outright rather than decoded on a best-effort basis.
///
/// # Errors
///
/// Propagates client errors unchanged, returns
/// [`SecretError::UnsupportedContentEncoding`] for a non-base64 tag and
/// [`SecretError::InvalidPayload`] when the payload fails base64 or UTF-8
/// decoding.
pub async fn fetch_secret(
    client: &dyn SecretsClient,
    locator: &SecretLocator,
) -> Result<String, SecretError> {
    let bundle = match locator {
        SecretLocator::ById { secret_id } => client.get_bundle(secret_id).await?,
        SecretLocator::ByName {
            secret_name,
            vault_id,
        } => client.get_bundle_by_name(secret_name, vault_id).await?,
    };

    if bundle.content_type != BASE64_CONTENT_TYPE {
        return Err(SecretError::UnsupportedContentEncoding(bundle.content_type));
    }

    let bytes = STANDARD
        .decode(bundle.content.as_bytes())
        .map_err(|e| SecretError::InvalidPayload(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| SecretError::InvalidPayload(format!("secret is not valid UTF-8: {e}")))
}
