//! # STORAGE CONFIGURATION
//!
//! Serde model of the `storages` mapping:
//!
//! ```json
//! {
//!   "storages": {
//!     "default.storage": { "adapter": "local", "options": { "directory": "/srv/files" } },
//!     "uploads.storage": { "adapter": "lazy", "options": { "source": "default.storage" } }
//!   }
//! }
//! ```
//!
//! Declaration order is kept; it is the order storages are assembled in.

use crate::errors::{Result, StorageError};
use crate::types::{check_unique_names, OptionMap, StorageDeclaration, StorageOptions, Visibility};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// **ROOT CONFIGURATION**
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoragesConfig {
    #[serde(default, deserialize_with = "ordered_storages")]
    pub storages: Vec<(String, StorageConfig)>,
}

/// **SINGLE STORAGE CONFIGURATION**
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    pub adapter: String,

    #[serde(default)]
    pub options: OptionMap,

    #[serde(default)]
    pub visibility: Option<Visibility>,

    #[serde(default)]
    pub directory_visibility: Option<Visibility>,

    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,

    #[serde(default)]
    pub disable_asserts: bool,
}

fn default_case_sensitive() -> bool {
    true
}

impl StorageConfig {
    pub fn storage_options(&self) -> StorageOptions {
        StorageOptions {
            visibility: self.visibility,
            directory_visibility: self.directory_visibility,
            case_sensitive: self.case_sensitive,
            disable_asserts: self.disable_asserts,
        }
    }

    pub fn to_declaration(&self, name: &str) -> StorageDeclaration {
        StorageDeclaration::new(name, self.adapter.clone())
            .with_options(self.options.clone())
            .with_storage_options(self.storage_options())
    }
}

impl StoragesConfig {
    /// **PARSE JSON TEXT**
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// **PARSE JSON VALUE**
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// **READ JSON FILE**
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| StorageError::Config {
            message: format!("failed to read `{}`: {}", path.display(), e),
        })?;
        Self::from_json(&text)
    }

    /// **DECLARATIONS IN CONFIGURATION ORDER**
    ///
    /// A name declared twice fails with `DuplicateStorageName`.
    pub fn declarations(&self) -> Result<Vec<StorageDeclaration>> {
        let declarations: Vec<StorageDeclaration> = self
            .storages
            .iter()
            .map(|(name, config)| config.to_declaration(name))
            .collect();
        check_unique_names(&declarations)?;
        Ok(declarations)
    }
}

fn ordered_storages<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, StorageConfig)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedStorages;

    impl<'de> Visitor<'de> for OrderedStorages {
        type Value = Vec<(String, StorageConfig)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping of storage names to storage configurations")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut storages = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, StorageConfig>()? {
                storages.push(entry);
            }
            Ok(storages)
        }
    }

    deserializer.deserialize_map(OrderedStorages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::error_codes;
    use serde_json::json;

    #[test]
    fn test_defaults_applied() {
        let config = StoragesConfig::from_value(json!({
            "storages": { "cache": { "adapter": "memory" } }
        }))
        .unwrap();

        let decls = config.declarations().unwrap();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "cache");
        assert_eq!(decls[0].adapter_spec, "memory");
        assert!(decls[0].options.is_empty());
        assert_eq!(decls[0].storage, StorageOptions::default());
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let config = StoragesConfig::from_json(
            r#"{"storages": {
                "zeta": {"adapter": "memory"},
                "alpha": {"adapter": "memory"},
                "mid": {"adapter": "lazy", "options": {"source": "alpha"}}
            }}"#,
        )
        .unwrap();

        let names: Vec<String> = config.declarations().unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_storage_options_parsed() {
        let config = StoragesConfig::from_value(json!({
            "storages": {
                "public": {
                    "adapter": "local",
                    "options": {"directory": "/srv/public"},
                    "visibility": "public",
                    "directory_visibility": "private",
                    "case_sensitive": false,
                    "disable_asserts": true
                }
            }
        }))
        .unwrap();

        let decl = &config.declarations().unwrap()[0];
        assert_eq!(decl.storage.visibility, Some(Visibility::Public));
        assert_eq!(decl.storage.directory_visibility, Some(Visibility::Private));
        assert!(!decl.storage.case_sensitive);
        assert!(decl.storage.disable_asserts);
        assert_eq!(decl.options["directory"], json!("/srv/public"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let config = StoragesConfig::from_json(
            r#"{"storages": {"a": {"adapter": "memory"}, "a": {"adapter": "local"}}}"#,
        )
        .unwrap();

        let err = config.declarations().unwrap_err();
        assert_eq!(err, StorageError::DuplicateStorageName { key: "a".into() });
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = StoragesConfig::from_value(json!({
            "storages": { "a": { "adapter": "memory", "colour": "red" } }
        }))
        .unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_CONFIG);
    }

    #[test]
    fn test_missing_adapter_rejected() {
        let err = StoragesConfig::from_value(json!({"storages": {"a": {}}})).unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_CONFIG);
    }

    #[test]
    fn test_empty_document() {
        let config = StoragesConfig::from_json("{}").unwrap();
        assert!(config.declarations().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = StoragesConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_CONFIG);
    }
}
