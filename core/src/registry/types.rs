use crate::adapters::AdapterRecipe;
use crate::storage::StorageHandle;
use crate::types::OptionMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// **CAPABILITY KIND**
///
/// Narrowed views a consumer can depend on instead of the full storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    FullOperator,
    ReaderOnly,
    WriterOnly,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::FullOperator,
        Capability::ReaderOnly,
        Capability::WriterOnly,
    ];

    /// Type name consumers declare dependencies with.
    pub fn type_name(&self) -> &'static str {
        match self {
            Capability::FullOperator => "FilesystemOperator",
            Capability::ReaderOnly => "FilesystemReader",
            Capability::WriterOnly => "FilesystemWriter",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// **CAPABILITY ALIAS KEY**
///
/// Displayed as an autowiring argument, e.g. `FilesystemReader $uploadsStorage`
/// for storage `uploads.storage`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArgumentAlias {
    pub capability: Capability,
    pub name: String,
}

impl ArgumentAlias {
    pub fn new(capability: Capability, name: impl Into<String>) -> Self {
        Self {
            capability,
            name: name.into(),
        }
    }

    /// Storage name as a camelCase argument name.
    pub fn argument_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut upper_next = false;
        for ch in self.name.chars() {
            if !ch.is_alphanumeric() {
                upper_next = !out.is_empty();
                continue;
            }
            if upper_next {
                out.extend(ch.to_uppercase());
                upper_next = false;
            } else if out.is_empty() {
                out.extend(ch.to_lowercase());
            } else {
                out.push(ch);
            }
        }
        out
    }
}

impl fmt::Display for ArgumentAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ${}", self.capability, self.argument_name())
    }
}

/// **COMPONENT DEFINITION**
///
/// A component the registry knows how to build: a type name plus named
/// constructor arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub type_name: String,
    pub arguments: OptionMap,
}

impl ComponentDefinition {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            arguments: OptionMap::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }
}

/// **REGISTRY DEFINITION**
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Adapter(AdapterRecipe),
    Storage(StorageHandle),
    Component(ComponentDefinition),
}

impl Definition {
    pub fn as_storage(&self) -> Option<&StorageHandle> {
        match self {
            Definition::Storage(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn as_adapter(&self) -> Option<&AdapterRecipe> {
        match self {
            Definition::Adapter(recipe) => Some(recipe),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Definition::Adapter(_) => "adapter",
            Definition::Storage(_) => "storage",
            Definition::Component(_) => "component",
        }
    }
}
