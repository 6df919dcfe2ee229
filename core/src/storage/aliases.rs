use super::handle::StorageHandle;
use crate::errors::Result;
use crate::registry::{ArgumentAlias, Capability, ComponentRegistry};

/// **ALIAS REGISTRAR**
///
/// Registers one capability alias per `Capability`, all pointing at the same
/// storage key.
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasRegistrar;

impl AliasRegistrar {
    /// The three aliases of `storage_name`, in `Capability::ALL` order.
    pub fn aliases(storage_name: &str) -> [ArgumentAlias; 3] {
        Capability::ALL.map(|capability| ArgumentAlias::new(capability, storage_name))
    }

    /// Fails if any alias of `storage_name` already targets another key.
    pub fn check_aliases<R>(storage_name: &str, handle: &StorageHandle, registry: &R) -> Result<()>
    where
        R: ComponentRegistry + ?Sized,
    {
        Self::aliases(storage_name)
            .iter()
            .try_for_each(|alias| registry.check_argument_alias(alias, &handle.name))
    }

    /// Register the aliases. Re-registering identical aliases is a no-op.
    pub fn register_aliases<R>(
        storage_name: &str,
        handle: &StorageHandle,
        registry: &mut R,
    ) -> Result<()>
    where
        R: ComponentRegistry + ?Sized,
    {
        Self::check_aliases(storage_name, handle, &*registry)?;
        for alias in Self::aliases(storage_name) {
            log::debug!("Registering capability alias `{}` -> `{}`", alias, handle.name);
            registry.register_alias_for_argument(alias, &handle.name)?;
        }
        Ok(())
    }
}
