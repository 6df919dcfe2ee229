pub mod container;
pub mod types;

pub use container::{ComponentRegistry, Registry};
pub use types::{ArgumentAlias, Capability, ComponentDefinition, Definition};
