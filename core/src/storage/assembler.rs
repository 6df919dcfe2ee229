use super::aliases::AliasRegistrar;
use super::handle::StorageHandle;
use crate::adapters::{AdapterRecipe, AdapterResolver};
use crate::config::StoragesConfig;
use crate::errors::Result;
use crate::registry::{ComponentRegistry, Definition};
use crate::types::{check_unique_names, StorageDeclaration, LAZY_SOURCE_OPTION};
use crate::validation::{JsonType, OptionSchemaValidator, Validator};

/// **ASSEMBLY REPORT**
///
/// Storage names in the order they were registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    pub eager: Vec<String>,
    pub lazy: Vec<String>,
}

impl AssemblyReport {
    pub fn total(&self) -> usize {
        self.eager.len() + self.lazy.len()
    }
}

/// One registry write, planned before anything is written.
#[derive(Debug, Clone, PartialEq)]
enum Registration {
    Definition { key: String, definition: Definition },
    Alias { key: String, target: String },
}

/// **STORAGE ASSEMBLER**
///
/// Single pass over the declarations. Each declaration is planned and checked
/// against the registry before its first write, so a failing declaration
/// leaves no trace. The first failure stops the pass.
#[derive(Debug, Clone, Default)]
pub struct StorageAssembler {
    resolver: AdapterResolver,
}

impl StorageAssembler {
    pub fn new(resolver: AdapterResolver) -> Self {
        Self { resolver }
    }

    /// Assemble every storage of a parsed configuration.
    pub fn assemble_config<R>(&self, config: &StoragesConfig, registry: &mut R) -> Result<AssemblyReport>
    where
        R: ComponentRegistry + ?Sized,
    {
        let declarations = config.declarations()?;
        self.assemble(&declarations, registry)
    }

    /// Register one storage handle, its adapter and its three capability
    /// aliases per declaration. Names must be unique across `declarations`;
    /// a repeated name fails before the registry is touched.
    pub fn assemble<R>(&self, declarations: &[StorageDeclaration], registry: &mut R) -> Result<AssemblyReport>
    where
        R: ComponentRegistry + ?Sized,
    {
        check_unique_names(declarations)?;
        let mut report = AssemblyReport::default();

        for declaration in declarations {
            self.assemble_one(declaration, registry)?;
            if declaration.is_lazy() {
                report.lazy.push(declaration.name.clone());
            } else {
                report.eager.push(declaration.name.clone());
            }
        }

        log::info!(
            "Assembled {} storages ({} eager, {} lazy)",
            report.total(),
            report.eager.len(),
            report.lazy.len()
        );
        Ok(report)
    }

    fn assemble_one<R>(&self, declaration: &StorageDeclaration, registry: &mut R) -> Result<()>
    where
        R: ComponentRegistry + ?Sized,
    {
        // **STEP 1**: Plan without writing
        let (handle, mut plan) = if declaration.is_lazy() {
            (Self::lazy_handle(declaration)?, Vec::new())
        } else {
            let recipe = self.resolver.resolve(
                &declaration.name,
                &declaration.adapter_spec,
                &declaration.options,
                &*registry,
            )?;
            let adapter = Self::adapter_registration(declaration, recipe);
            (
                StorageHandle::eager(declaration.name.clone(), declaration.storage.clone()),
                vec![adapter],
            )
        };
        plan.push(Registration::Definition {
            key: declaration.name.clone(),
            definition: Definition::Storage(handle.clone()),
        });

        // **STEP 2**: Check every write
        for registration in &plan {
            match registration {
                Registration::Definition { key, definition } => {
                    registry.check_definition(key, definition)?
                }
                Registration::Alias { key, target } => registry.check_alias(key, target)?,
            }
        }
        AliasRegistrar::check_aliases(&declaration.name, &handle, &*registry)?;

        // **STEP 3**: Apply
        for registration in plan {
            match registration {
                Registration::Definition { key, definition } => {
                    log::debug!("Registering {} definition `{}`", definition.kind(), key);
                    registry.set_definition(&key, definition)?;
                }
                Registration::Alias { key, target } => {
                    log::debug!("Registering alias `{}` -> `{}`", key, target);
                    registry.set_alias(&key, &target)?;
                }
            }
        }
        AliasRegistrar::register_aliases(&declaration.name, &handle, registry)
    }

    fn lazy_handle(declaration: &StorageDeclaration) -> Result<StorageHandle> {
        let options = OptionSchemaValidator::new()
            .require_field(LAZY_SOURCE_OPTION, JsonType::String)
            .validate(declaration.options.clone())
            .map_err(|violation| violation.into_storage_error(&declaration.name))?;

        // The schema guarantees a string here.
        let source = options
            .get(LAZY_SOURCE_OPTION)
            .and_then(|value| value.as_str())
            .unwrap_or_default();

        Ok(StorageHandle::lazy(source, declaration.name.clone()))
    }

    fn adapter_registration(declaration: &StorageDeclaration, recipe: AdapterRecipe) -> Registration {
        log::debug!(
            "Storage `{}` uses {}",
            declaration.name,
            recipe.label()
        );
        match recipe {
            AdapterRecipe::AliasToExisting { component_key } => Registration::Alias {
                key: declaration.adapter_key(),
                target: component_key,
            },
            recipe => Registration::Definition {
                key: declaration.adapter_key(),
                definition: Definition::Adapter(recipe),
            },
        }
    }
}
