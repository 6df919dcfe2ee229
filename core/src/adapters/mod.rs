//! Adapter resolution: built-in kinds, registered components and custom types.

pub mod builtin;
pub mod custom;
pub mod resolver;
pub mod types;

pub use custom::{AdapterDefinitionBuilder, CustomType, TypeRegistry};
pub use resolver::AdapterResolver;
pub use types::{AdapterKind, AdapterRecipe};
