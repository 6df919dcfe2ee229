//! # STORAGE TYPE DEFINITIONS
//!
//! **CRITICAL**: Declarations are the only input of an assembly pass.
//! **MANDATE**: Declarations are immutable once built.

use crate::errors::{Result, StorageError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Free-form option mapping. Insertion order is preserved.
pub type OptionMap = serde_json::Map<String, serde_json::Value>;

/// Adapter spec that marks a storage as lazily resolved.
pub const LAZY_ADAPTER: &str = "lazy";

/// Option carrying the source storage key of a lazy storage.
pub const LAZY_SOURCE_OPTION: &str = "source";

/// Prefix of every adapter component key.
pub const ADAPTER_KEY_PREFIX: &str = "adapter.";

/// **FILE VISIBILITY**
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => f.write_str("public"),
            Visibility::Private => f.write_str("private"),
        }
    }
}

/// **NORMALIZED STORAGE OPTIONS**
///
/// Handed to the storage itself, independently of the adapter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageOptions {
    pub visibility: Option<Visibility>,
    pub directory_visibility: Option<Visibility>,
    pub case_sensitive: bool,
    pub disable_asserts: bool,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            visibility: None,
            directory_visibility: None,
            case_sensitive: true,
            disable_asserts: false,
        }
    }
}

/// **STORAGE DECLARATION**
///
/// **PURPOSE**: One named entry of the `storages` configuration.
/// **GUARANTEE**: Already validated and defaulted by the configuration layer.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageDeclaration {
    /// **STORAGE NAME** - Unique across the declaration set
    pub name: String,

    /// **ADAPTER SPEC** - Built-in kind, component key, type name or `lazy`
    pub adapter_spec: String,

    /// **ADAPTER OPTIONS**
    pub options: OptionMap,

    /// **STORAGE OPTIONS**
    pub storage: StorageOptions,
}

impl StorageDeclaration {
    /// **CONSTRUCTOR**
    pub fn new(name: impl Into<String>, adapter_spec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            adapter_spec: adapter_spec.into(),
            options: OptionMap::new(),
            storage: StorageOptions::default(),
        }
    }

    /// **LAZY CONSTRUCTOR** - Storage backed by `source` at first use
    pub fn lazy(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source: String = source.into();
        Self::new(name, LAZY_ADAPTER).with_option(LAZY_SOURCE_OPTION, source)
    }

    /// **WITH OPTION**
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// **WITH OPTIONS** - Replaces the whole option mapping
    pub fn with_options(mut self, options: OptionMap) -> Self {
        self.options = options;
        self
    }

    /// **WITH STORAGE OPTIONS**
    pub fn with_storage_options(mut self, storage: StorageOptions) -> Self {
        self.storage = storage;
        self
    }

    pub fn is_lazy(&self) -> bool {
        self.adapter_spec == LAZY_ADAPTER
    }

    /// Key the adapter component of this storage is registered under.
    pub fn adapter_key(&self) -> String {
        adapter_key(&self.name)
    }
}

/// Deterministic adapter component key: `adapter.<storage name>`.
pub fn adapter_key(storage_name: &str) -> String {
    format!("{}{}", ADAPTER_KEY_PREFIX, storage_name)
}

/// Fails with `DuplicateStorageName` on the first name declared twice.
pub fn check_unique_names(declarations: &[StorageDeclaration]) -> Result<()> {
    let mut seen = HashSet::with_capacity(declarations.len());
    match declarations.iter().find(|decl| !seen.insert(decl.name.as_str())) {
        Some(decl) => Err(StorageError::DuplicateStorageName {
            key: decl.name.clone(),
        }),
        None => Ok(()),
    }
}
