//! Parsed bootstrap document and section navigation.

use crate::error::{ConfigError, Result};
use serde_yaml::Value;

/// An immutable, parsed bootstrap document.
///
/// Parsed exactly once at startup with `serde_yaml`; never through the
/// configuration registry, which does not exist yet at that point.
///
/// # Examples
///
/// ```rust
/// use vaultboot_config::bootstrap::BootstrapDocument;
///
/// let doc = BootstrapDocument::parse(
///     "application.yaml",
///     "oci:\n  secret:\n    id: ocid1.vaultsecret.oc1..example\n",
/// ).unwrap();
///
/// let id = doc.section("oci").unwrap()
///     .section("secret").unwrap()
///     .scalar("id").unwrap();
/// assert_eq!(id, "ocid1.vaultsecret.oc1..example");
/// ```
#[derive(Debug, Clone)]
pub struct BootstrapDocument {
    root: Value,
}

impl BootstrapDocument {
    /// Parse a document from raw YAML.
    ///
    /// `name` identifies the resource in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseFailure`] for invalid YAML or a non-mapping
    /// top level, and [`ConfigError::EmptyDocument`] when the content parses
    /// to nothing.
    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(ConfigError::EmptyDocument(name.to_string()));
        }

        let root: Value = serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseFailure {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        match root {
            Value::Null => Err(ConfigError::EmptyDocument(name.to_string())),
            Value::Mapping(_) => Ok(Self { root }),
            _ => Err(ConfigError::ParseFailure {
                name: name.to_string(),
                reason: "top level is not a mapping".to_string(),
            }),
        }
    }

    /// Look up a required top-level section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] if the key is absent or is not
    /// itself a mapping.
    pub fn section(&self, name: &str) -> Result<Section<'_>> {
        section_of(&self.root, name, None)
    }
}

/// A named mapping inside a [`BootstrapDocument`].
#[derive(Debug, Clone)]
pub struct Section<'a> {
    path: String,
    value: &'a Value,
}

impl<'a> Section<'a> {
    /// Dotted path of this section from the document root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a required nested section.
    pub fn section(&self, name: &str) -> Result<Section<'a>> {
        section_of(self.value, name, Some(&self.path))
    }

    /// Look up a required string scalar.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if the field is absent or not a
    /// string.
    pub fn scalar(&self, field: &str) -> Result<&'a str> {
        self.value
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| ConfigError::MissingField {
                section: self.path.clone(),
                field: field.to_string(),
            })
    }
}

fn section_of<'a>(parent: &'a Value, name: &str, prefix: Option<&str>) -> Result<Section<'a>> {
    let path = match prefix {
        Some(p) => format!("{p}.{name}"),
        None => name.to_string(),
    };

    match parent.get(name) {
        Some(value @ Value::Mapping(_)) => Ok(Section { path, value }),
        _ => Err(ConfigError::MissingSection(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
oci:
  secret:
    id: ocid1.vaultsecret.oc1..abc
    name: db-password
  vault:
    id: ocid1.vault.oc1..xyz
"#;

    #[test]
    fn test_nested_scalar_lookup() {
        let doc = BootstrapDocument::parse("test", DOC).unwrap();
        let secret = doc.section("oci").unwrap().section("secret").unwrap();
        assert_eq!(secret.scalar("id").unwrap(), "ocid1.vaultsecret.oc1..abc");
        assert_eq!(secret.scalar("name").unwrap(), "db-password");
        assert_eq!(secret.path(), "oci.secret");
    }

    #[test]
    fn test_missing_top_level_section() {
        let doc = BootstrapDocument::parse("test", "server:\n  port: 8080\n").unwrap();
        let err = doc.section("oci").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(ref s) if s == "oci"));
    }

    #[test]
    fn test_missing_nested_section_carries_path() {
        let doc = BootstrapDocument::parse("test", "oci:\n  region: here\n").unwrap();
        let err = doc.section("oci").unwrap().section("secret").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(ref s) if s == "oci.secret"));
    }

    #[test]
    fn test_missing_field_under_present_section() {
        let doc = BootstrapDocument::parse("test", "oci:\n  secret:\n    name: x\n").unwrap();
        let err = doc
            .section("oci")
            .unwrap()
            .section("secret")
            .unwrap()
            .scalar("id")
            .unwrap_err();
        match err {
            ConfigError::MissingField { section, field } => {
                assert_eq!(section, "oci.secret");
                assert_eq!(field, "id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scalar_key_is_not_a_section() {
        let doc = BootstrapDocument::parse("test", "oci: just-a-string\n").unwrap();
        assert!(matches!(
            doc.section("oci"),
            Err(ConfigError::MissingSection(_))
        ));
    }

    #[test]
    fn test_empty_document() {
        let err = BootstrapDocument::parse("test", "").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyDocument(_)));

        let err = BootstrapDocument::parse("test", "# just a comment\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyDocument(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = BootstrapDocument::parse("test", "oci: [unclosed\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailure { .. }));
    }

    #[test]
    fn test_non_mapping_top_level() {
        let err = BootstrapDocument::parse("test", "- a\n- b\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailure { .. }));
    }
}
