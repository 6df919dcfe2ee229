pub use crate::adapters::{
    AdapterDefinitionBuilder, AdapterKind, AdapterRecipe, AdapterResolver, CustomType, TypeRegistry,
};
pub use crate::config::{StorageConfig, StoragesConfig};
pub use crate::errors::StorageError;
pub use crate::registry::{
    ArgumentAlias, Capability, ComponentDefinition, ComponentRegistry, Definition, Registry,
};
pub use crate::storage::{
    AliasRegistrar, AssemblyReport, LazyFactory, Lifecycle, StorageAssembler, StorageHandle,
    StorageOperator,
};
pub use crate::types::{OptionMap, StorageDeclaration, StorageOptions, Visibility};
