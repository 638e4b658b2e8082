//! Secret addressing: by identifier, or by name within a vault.

use crate::bootstrap::BootstrapDocument;
use crate::error::Result;

/// How the bootstrap document addresses the secret.
///
/// A deployment picks exactly one mode up front; the mode is never
/// auto-detected at runtime from whichever fields happen to be present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocatorMode {
    /// Read `oci.secret.id` (the default).
    #[default]
    ById,
    /// Read `oci.secret.name` plus `oci.vault.id`.
    ByName,
}

/// A fully resolved secret address.
///
/// Exactly one variant is ever active per deployment; a partially resolved
/// locator cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretLocator {
    /// Address the secret directly by its identifier.
    ById {
        /// The secret identifier.
        secret_id: String,
    },
    /// Address the secret by name within a named vault.
    ByName {
        /// The secret name.
        secret_name: String,
        /// Identifier of the vault holding the secret.
        vault_id: String,
    },
}

impl SecretLocator {
    /// Resolve the locator from the bootstrap document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`](crate::error::ConfigError::MissingSection)
    /// if `oci` or the mode's nested section is absent, and
    /// [`ConfigError::MissingField`](crate::error::ConfigError::MissingField)
    /// for a present section lacking its required scalar. Both abort startup.
    pub fn resolve(doc: &BootstrapDocument, mode: LocatorMode) -> Result<Self> {
        let oci = doc.section("oci")?;

        match mode {
            LocatorMode::ById => {
                let secret_id = oci.section("secret")?.scalar("id")?.to_string();
                Ok(Self::ById { secret_id })
            }
            LocatorMode::ByName => {
                let secret_name = oci.section("secret")?.scalar("name")?.to_string();
                let vault_id = oci.section("vault")?.scalar("id")?.to_string();
                Ok(Self::ByName {
                    secret_name,
                    vault_id,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn doc(raw: &str) -> BootstrapDocument {
        BootstrapDocument::parse("test", raw).unwrap()
    }

    #[test]
    fn test_resolve_by_id() {
        let doc = doc("oci:\n  secret:\n    id: ocid1.vaultsecret.oc1..abc\n");
        let locator = SecretLocator::resolve(&doc, LocatorMode::ById).unwrap();
        assert_eq!(
            locator,
            SecretLocator::ById {
                secret_id: "ocid1.vaultsecret.oc1..abc".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_by_name() {
        let doc = doc(
            "oci:\n  secret:\n    name: db-password\n  vault:\n    id: ocid1.vault.oc1..xyz\n",
        );
        let locator = SecretLocator::resolve(&doc, LocatorMode::ByName).unwrap();
        assert_eq!(
            locator,
            SecretLocator::ByName {
                secret_name: "db-password".to_string(),
                vault_id: "ocid1.vault.oc1..xyz".to_string()
            }
        );
    }

    #[test]
    fn test_mode_is_not_auto_detected() {
        // Both addressing styles present: the chosen mode decides, nothing else.
        let doc = doc(
            "oci:\n  secret:\n    id: by-id\n    name: by-name\n  vault:\n    id: v1\n",
        );
        assert_eq!(
            SecretLocator::resolve(&doc, LocatorMode::ById).unwrap(),
            SecretLocator::ById {
                secret_id: "by-id".to_string()
            }
        );
        assert_eq!(
            SecretLocator::resolve(&doc, LocatorMode::ByName).unwrap(),
            SecretLocator::ByName {
                secret_name: "by-name".to_string(),
                vault_id: "v1".to_string()
            }
        );
    }

    #[test]
    fn test_missing_oci_section() {
        let doc = doc("server:\n  port: 8080\n");
        let err = SecretLocator::resolve(&doc, LocatorMode::ById).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(ref s) if s == "oci"));
    }

    #[test]
    fn test_missing_secret_section() {
        let doc = doc("oci:\n  region: somewhere\n");
        let err = SecretLocator::resolve(&doc, LocatorMode::ById).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(ref s) if s == "oci.secret"));
    }

    #[test]
    fn test_missing_id_field() {
        let doc = doc("oci:\n  secret:\n    name: only-a-name\n");
        let err = SecretLocator::resolve(&doc, LocatorMode::ById).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref field, .. } if field == "id"));
    }

    #[test]
    fn test_by_name_missing_vault_section() {
        let doc = doc("oci:\n  secret:\n    name: db-password\n");
        let err = SecretLocator::resolve(&doc, LocatorMode::ByName).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(ref s) if s == "oci.vault"));
    }

    #[test]
    fn test_by_name_missing_name_field() {
        let doc = doc("oci:\n  secret:\n    id: only-an-id\n  vault:\n    id: v1\n");
        let err = SecretLocator::resolve(&doc, LocatorMode::ByName).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_default_mode_is_by_id() {
        assert_eq!(LocatorMode::default(), LocatorMode::ById);
    }
}
