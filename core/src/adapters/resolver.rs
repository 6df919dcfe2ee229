use super::builtin::schema_for;
use super::custom::{CustomType, TypeRegistry};
use super::types::{AdapterKind, AdapterRecipe};
use crate::errors::{Result, StorageError};
use crate::registry::ComponentRegistry;
use crate::types::OptionMap;
use crate::validation::Validator;

/// **ADAPTER DESCRIPTOR RESOLVER**
///
/// Maps an adapter spec and its options to an `AdapterRecipe`. First match
/// wins: built-in kind, registered component, custom adapter type, custom
/// builder type. Never writes to the registry.
#[derive(Debug, Clone, Default)]
pub struct AdapterResolver {
    types: TypeRegistry,
}

impl AdapterResolver {
    pub fn new(types: TypeRegistry) -> Self {
        Self { types }
    }

    /// Resolve the adapter of `storage`. The storage name only labels errors.
    pub fn resolve<R>(
        &self,
        storage: &str,
        adapter_spec: &str,
        options: &OptionMap,
        registry: &R,
    ) -> Result<AdapterRecipe>
    where
        R: ComponentRegistry + ?Sized,
    {
        // **STEP 1**: Built-in kind
        if let Some(kind) = AdapterKind::from_name(adapter_spec) {
            let normalized = schema_for(kind)
                .validate(options.clone())
                .map_err(|violation| violation.into_storage_error(storage))?;
            return Ok(AdapterRecipe::BuiltIn {
                kind,
                options: normalized,
            });
        }

        // **STEP 2**: Component already in the registry
        if registry.has_definition(adapter_spec) {
            return Ok(AdapterRecipe::AliasToExisting {
                component_key: adapter_spec.to_string(),
            });
        }

        // **STEP 3**: Custom type
        match self.types.get(adapter_spec) {
            Some(CustomType::Adapter) => Ok(AdapterRecipe::DynamicType {
                type_name: adapter_spec.to_string(),
                arguments: options
                    .iter()
                    .map(|(name, value)| (format!("${}", name), value.clone()))
                    .collect(),
            }),
            Some(CustomType::Builder(builder)) => {
                let definition = builder
                    .create_definition(options.clone())
                    .map_err(|violation| StorageError::Builder {
                        builder: adapter_spec.to_string(),
                        message: violation.into_storage_error(storage).to_string(),
                    })?;
                Ok(AdapterRecipe::BuilderType {
                    builder: adapter_spec.to_string(),
                    options: options.clone(),
                    definition,
                })
            }
            Some(CustomType::Opaque) => Err(StorageError::InvalidCustomAdapter {
                adapter: adapter_spec.to_string(),
            }),
            // **STEP 4**: Nothing matched
            None => Err(StorageError::UnresolvableAdapter {
                adapter: adapter_spec.to_string(),
            }),
        }
    }
}
