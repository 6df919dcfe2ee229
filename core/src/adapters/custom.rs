use crate::registry::ComponentDefinition;
use crate::types::OptionMap;
use crate::validation::ValidationResult;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// **ADAPTER DEFINITION BUILDER**
///
/// Turns raw options into an adapter definition. Each builder owns its option
/// schema.
pub trait AdapterDefinitionBuilder: Send + Sync {
    /// Type name the builder is selected by in configuration.
    fn name(&self) -> &str;

    fn create_definition(&self, options: OptionMap) -> ValidationResult<ComponentDefinition>;
}

/// **CUSTOM TYPE ENTRY**
#[derive(Clone)]
pub enum CustomType {
    /// Implements the storage adapter capability directly
    Adapter,

    /// Builds adapter definitions
    Builder(Arc<dyn AdapterDefinitionBuilder>),

    /// Known type with neither capability
    Opaque,
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomType::Adapter => f.write_str("Adapter"),
            CustomType::Builder(builder) => f.debug_tuple("Builder").field(&builder.name()).finish(),
            CustomType::Opaque => f.write_str("Opaque"),
        }
    }
}

/// **CUSTOM TYPE TABLE**
///
/// Populated at start-up, before assembly. Maps adapter type names to what
/// they can do.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, CustomType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_adapter(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.types.insert(type_name.into(), CustomType::Adapter);
        self
    }

    pub fn register_builder<B>(&mut self, builder: B) -> &mut Self
    where
        B: AdapterDefinitionBuilder + 'static,
    {
        let name = builder.name().to_string();
        self.types.insert(name, CustomType::Builder(Arc::new(builder)));
        self
    }

    pub fn register_opaque(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.types.insert(type_name.into(), CustomType::Opaque);
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&CustomType> {
        self.types.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullBuilder;

    impl AdapterDefinitionBuilder for NullBuilder {
        fn name(&self) -> &str {
            "NullAdapterBuilder"
        }

        fn create_definition(&self, _options: OptionMap) -> ValidationResult<ComponentDefinition> {
            Ok(ComponentDefinition::new("NullAdapter"))
        }
    }

    #[test]
    fn test_register_entries() {
        let mut types = TypeRegistry::new();
        types
            .register_adapter("App\\DropboxAdapter")
            .register_builder(NullBuilder)
            .register_opaque("App\\Mailer");

        assert_eq!(types.len(), 3);
        assert!(matches!(types.get("App\\DropboxAdapter"), Some(CustomType::Adapter)));
        assert!(matches!(types.get("NullAdapterBuilder"), Some(CustomType::Builder(_))));
        assert!(matches!(types.get("App\\Mailer"), Some(CustomType::Opaque)));
        assert!(types.get("App\\Missing").is_none());
    }

    #[test]
    fn test_debug_names_builder() {
        let mut types = TypeRegistry::new();
        types.register_builder(NullBuilder);
        let debug = format!("{:?}", types.get("NullAdapterBuilder").unwrap());
        assert_eq!(debug, "Builder(\"NullAdapterBuilder\")");
    }
}
