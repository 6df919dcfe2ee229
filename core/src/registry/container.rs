use crate::errors::{Result, StorageError};
use crate::registry::types::{ArgumentAlias, Capability, Definition};
use crate::storage::StorageHandle;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// **COMPONENT REGISTRY**
///
/// The store assembly writes into. Writes are strict: re-registering the
/// exact same entry is a no-op, registering a different one under a taken key
/// fails with `DuplicateStorageName`. Definitions and aliases share one key
/// namespace.
pub trait ComponentRegistry {
    fn set_definition(&mut self, key: &str, definition: Definition) -> Result<()>;

    fn set_alias(&mut self, key: &str, target: &str) -> Result<()>;

    fn has_definition(&self, key: &str) -> bool;

    fn register_alias_for_argument(&mut self, alias: ArgumentAlias, target: &str) -> Result<()>;

    fn definition(&self, key: &str) -> Option<&Definition>;

    fn alias_target(&self, key: &str) -> Option<&str>;

    fn argument_alias(&self, alias: &ArgumentAlias) -> Option<&str>;

    /// Alias already rendering as `argument_name` for `capability`.
    fn argument_alias_named(&self, capability: Capability, argument_name: &str) -> Option<&ArgumentAlias>;

    /// Pre-flight check for `set_definition`.
    fn check_definition(&self, key: &str, definition: &Definition) -> Result<()> {
        if self.alias_target(key).is_some() {
            return Err(duplicate(key));
        }
        match self.definition(key) {
            Some(existing) if existing != definition => Err(duplicate(key)),
            _ => Ok(()),
        }
    }

    /// Pre-flight check for `set_alias`.
    fn check_alias(&self, key: &str, target: &str) -> Result<()> {
        if self.has_definition(key) {
            return Err(duplicate(key));
        }
        match self.alias_target(key) {
            Some(existing) if existing != target => Err(duplicate(key)),
            _ => Ok(()),
        }
    }

    /// Pre-flight check for `register_alias_for_argument`. Two storages whose
    /// names render to the same argument name collide.
    fn check_argument_alias(&self, alias: &ArgumentAlias, target: &str) -> Result<()> {
        if let Some(existing) = self.argument_alias_named(alias.capability, &alias.argument_name()) {
            if existing.name != alias.name {
                return Err(duplicate(&alias.to_string()));
            }
        }
        match self.argument_alias(alias) {
            Some(existing) if existing != target => Err(duplicate(&alias.to_string())),
            _ => Ok(()),
        }
    }
}

fn duplicate(key: &str) -> StorageError {
    StorageError::DuplicateStorageName {
        key: key.to_string(),
    }
}

/// **IN-MEMORY REGISTRY**
///
/// Write-once during assembly, then frozen behind an `Arc` and only read.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: HashMap<String, Definition>,
    aliases: HashMap<String, String>,
    argument_aliases: HashMap<ArgumentAlias, String>,
    argument_names: HashMap<(Capability, String), ArgumentAlias>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze the registry for concurrent read-only use.
    pub fn freeze(self) -> Arc<Registry> {
        Arc::new(self)
    }

    /// Follow alias chains to the key holding a definition.
    pub fn resolve_key<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        let mut current = key;
        let mut seen = HashSet::new();
        loop {
            if self.definitions.contains_key(current) {
                return Some(current);
            }
            if !seen.insert(current) {
                return None;
            }
            current = self.aliases.get(current)?.as_str();
        }
    }

    /// Definition under `key`, following aliases.
    pub fn resolved_definition(&self, key: &str) -> Option<&Definition> {
        self.resolve_key(key)
            .and_then(|resolved| self.definitions.get(resolved))
    }

    /// Storage handle reachable through a capability alias.
    pub fn storage_for(&self, capability: Capability, name: &str) -> Option<&StorageHandle> {
        let target = self.argument_alias(&ArgumentAlias::new(capability, name))?;
        self.resolved_definition(target)?.as_storage()
    }

    /// All storage handles, sorted by name.
    pub fn storages(&self) -> Vec<&StorageHandle> {
        let mut handles: Vec<&StorageHandle> = self
            .definitions
            .values()
            .filter_map(Definition::as_storage)
            .collect();
        handles.sort_by(|a, b| a.name.cmp(&b.name));
        handles
    }

    /// All definition keys, sorted.
    pub fn definition_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Capability aliases pointing at `target`, sorted.
    pub fn argument_aliases_for(&self, target: &str) -> Vec<&ArgumentAlias> {
        let mut aliases: Vec<&ArgumentAlias> = self
            .argument_aliases
            .iter()
            .filter(|(_, t)| t.as_str() == target)
            .map(|(alias, _)| alias)
            .collect();
        aliases.sort();
        aliases
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    pub fn argument_alias_count(&self) -> usize {
        self.argument_aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.aliases.is_empty() && self.argument_aliases.is_empty()
    }
}

impl ComponentRegistry for Registry {
    fn set_definition(&mut self, key: &str, definition: Definition) -> Result<()> {
        self.check_definition(key, &definition)?;
        self.definitions.insert(key.to_string(), definition);
        Ok(())
    }

    fn set_alias(&mut self, key: &str, target: &str) -> Result<()> {
        self.check_alias(key, target)?;
        self.aliases.insert(key.to_string(), target.to_string());
        Ok(())
    }

    fn has_definition(&self, key: &str) -> bool {
        self.definitions.contains_key(key)
    }

    fn register_alias_for_argument(&mut self, alias: ArgumentAlias, target: &str) -> Result<()> {
        self.check_argument_alias(&alias, target)?;
        self.argument_names
            .insert((alias.capability, alias.argument_name()), alias.clone());
        self.argument_aliases.insert(alias, target.to_string());
        Ok(())
    }

    fn definition(&self, key: &str) -> Option<&Definition> {
        self.definitions.get(key)
    }

    fn alias_target(&self, key: &str) -> Option<&str> {
        self.aliases.get(key).map(String::as_str)
    }

    fn argument_alias(&self, alias: &ArgumentAlias) -> Option<&str> {
        self.argument_aliases.get(alias).map(String::as_str)
    }

    fn argument_alias_named(&self, capability: Capability, argument_name: &str) -> Option<&ArgumentAlias> {
        self.argument_names.get(&(capability, argument_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::types::ComponentDefinition;

    fn component(type_name: &str) -> Definition {
        Definition::Component(ComponentDefinition::new(type_name))
    }

    #[test]
    fn test_set_definition_same_twice_is_noop() {
        let mut registry = Registry::new();
        registry.set_definition("client", component("S3Client")).unwrap();
        registry.set_definition("client", component("S3Client")).unwrap();
        assert_eq!(registry.definition_count(), 1);
    }

    #[test]
    fn test_set_definition_conflict() {
        let mut registry = Registry::new();
        registry.set_definition("client", component("S3Client")).unwrap();
        let err = registry.set_definition("client", component("GcsClient")).unwrap_err();
        assert_eq!(err, StorageError::DuplicateStorageName { key: "client".into() });
        assert_eq!(
            registry.definition("client"),
            Some(&component("S3Client"))
        );
    }

    #[test]
    fn test_alias_and_definition_share_namespace() {
        let mut registry = Registry::new();
        registry.set_definition("client", component("S3Client")).unwrap();
        assert!(registry.set_alias("client", "other").is_err());

        registry.set_alias("alias", "client").unwrap();
        assert!(registry.set_definition("alias", component("S3Client")).is_err());
    }

    #[test]
    fn test_resolve_key_follows_chain() {
        let mut registry = Registry::new();
        registry.set_definition("client", component("S3Client")).unwrap();
        registry.set_alias("a", "client").unwrap();
        registry.set_alias("b", "a").unwrap();

        assert_eq!(registry.resolve_key("b"), Some("client"));
        assert_eq!(registry.resolved_definition("b"), Some(&component("S3Client")));
        assert_eq!(registry.resolve_key("missing"), None);
    }

    #[test]
    fn test_resolve_key_stops_on_cycle() {
        let mut registry = Registry::new();
        registry.set_alias("a", "b").unwrap();
        registry.set_alias("b", "a").unwrap();
        assert_eq!(registry.resolve_key("a"), None);
    }

    #[test]
    fn test_argument_alias_idempotent_and_strict() {
        let mut registry = Registry::new();
        let alias = ArgumentAlias::new(Capability::ReaderOnly, "uploads");
        registry.register_alias_for_argument(alias.clone(), "uploads").unwrap();
        registry.register_alias_for_argument(alias.clone(), "uploads").unwrap();
        assert_eq!(registry.argument_alias_count(), 1);

        let err = registry
            .register_alias_for_argument(alias, "elsewhere")
            .unwrap_err();
        assert_eq!(err.code(), crate::errors::error_codes::DUPLICATE_STORAGE_NAME);
    }

    #[test]
    fn test_argument_name_collision_rejected() {
        let mut registry = Registry::new();
        registry
            .register_alias_for_argument(ArgumentAlias::new(Capability::ReaderOnly, "uploads.storage"), "uploads.storage")
            .unwrap();

        let other = ArgumentAlias::new(Capability::ReaderOnly, "uploads_storage");
        let err = registry
            .register_alias_for_argument(other.clone(), "uploads_storage")
            .unwrap_err();
        assert_eq!(
            err,
            StorageError::DuplicateStorageName {
                key: "FilesystemReader $uploadsStorage".into()
            }
        );
        assert_eq!(registry.argument_alias(&other), None);

        // Other capabilities keep their own argument names.
        registry
            .register_alias_for_argument(ArgumentAlias::new(Capability::WriterOnly, "uploads_storage"), "uploads_storage")
            .unwrap();
        assert_eq!(registry.argument_alias_count(), 2);
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.storages().is_empty());
        assert!(registry.definition_keys().is_empty());
    }
}
