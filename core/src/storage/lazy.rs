use super::handle::{Lifecycle, StorageHandle};
use crate::errors::{Result, StorageError};
use crate::registry::{ComponentRegistry, Definition, Registry};
use crate::types::StorageOptions;
use std::sync::Arc;

/// **STORAGE OPERATOR**
///
/// Facade over a resolved eager storage, carrying the identity it was
/// requested under.
#[derive(Debug, Clone)]
pub struct StorageOperator {
    name: String,
    handle: StorageHandle,
    registry: Arc<Registry>,
}

impl StorageOperator {
    /// Identity the storage was requested under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the eager storage that backs this operator.
    pub fn backing_storage(&self) -> &str {
        &self.handle.name
    }

    pub fn handle(&self) -> &StorageHandle {
        &self.handle
    }

    pub fn options(&self) -> Option<&StorageOptions> {
        self.handle.options()
    }

    pub fn adapter_key(&self) -> Option<&str> {
        self.handle.adapter_key()
    }

    /// Adapter definition of the backing storage, following aliases.
    pub fn adapter(&self) -> Option<&Definition> {
        self.registry.resolved_definition(self.adapter_key()?)
    }
}

/// **LAZY HANDLE FACTORY**
///
/// Resolves lazy storages at first use against a frozen registry. Calls only
/// read the registry, so one factory can be shared across threads.
#[derive(Debug, Clone)]
pub struct LazyFactory {
    registry: Arc<Registry>,
}

impl LazyFactory {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Resolve `source` to a storage and expose it as `storage_name`.
    ///
    /// `source` may be an environment placeholder, `%env(NAME)%`, read at
    /// call time. A lazy source is followed to its own source; revisiting a
    /// lazy storage on the way fails with `SelfReferencingSource`.
    pub fn create_storage(&self, source: &str, storage_name: &str) -> Result<StorageOperator> {
        let result = self.follow(source, storage_name);
        if let Err(err) = &result {
            log::warn!("Failed to resolve lazy storage `{}`: {}", storage_name, err);
        }
        result
    }

    /// Resolve any registered storage by name, lazy or eager.
    pub fn resolve_handle(&self, storage_name: &str) -> Result<StorageOperator> {
        let handle = self.lookup(storage_name, storage_name)?;

        match &handle.lifecycle {
            Lifecycle::Eager { .. } => Ok(StorageOperator {
                name: storage_name.to_string(),
                handle: handle.clone(),
                registry: Arc::clone(&self.registry),
            }),
            Lifecycle::Lazy { source } => self.create_storage(source, &handle.name),
        }
    }

    fn follow(&self, source: &str, storage_name: &str) -> Result<StorageOperator> {
        let mut visited: Vec<String> = Vec::new();
        let mut current = expand_source(source, storage_name)?;

        loop {
            let handle = self.lookup(&current, storage_name)?;
            if visited.contains(&handle.name) {
                return Err(StorageError::SelfReferencingSource {
                    storage: storage_name.to_string(),
                    source_key: current,
                });
            }
            visited.push(handle.name.clone());

            match &handle.lifecycle {
                Lifecycle::Eager { .. } => {
                    log::debug!(
                        "Lazy storage `{}` resolved to `{}`",
                        storage_name,
                        handle.name
                    );
                    return Ok(StorageOperator {
                        name: storage_name.to_string(),
                        handle: handle.clone(),
                        registry: Arc::clone(&self.registry),
                    });
                }
                Lifecycle::Lazy { source } => {
                    current = expand_source(source, &handle.name)?;
                }
            }
        }
    }

    fn lookup(&self, key: &str, storage_name: &str) -> Result<&StorageHandle> {
        self.registry
            .resolve_key(key)
            .and_then(|resolved| self.registry.definition(resolved))
            .and_then(Definition::as_storage)
            .ok_or_else(|| StorageError::UnknownSource {
                storage: storage_name.to_string(),
                source_key: key.to_string(),
            })
    }
}

/// Expand a `%env(NAME)%` placeholder; other values are returned as-is.
fn expand_source(source: &str, storage_name: &str) -> Result<String> {
    let Some(variable) = source
        .strip_prefix("%env(")
        .and_then(|rest| rest.strip_suffix(")%"))
    else {
        return Ok(source.to_string());
    };

    std::env::var(variable).map_err(|_| StorageError::UnknownSource {
        storage: storage_name.to_string(),
        source_key: source.to_string(),
    })
}
