//! # STORAGE ASSEMBLY CORE
//!
//! **NAMED STORAGES WIRED INTO A COMPONENT REGISTRY**
//!
//! **ARCHITECTURE**: Declarations → adapter resolver → assembler → registry
//! **GUARANTEE**: One storage handle and three capability aliases per declaration
//! **RUNTIME**: Lazy storages resolve their source at first use through `LazyFactory`
//!
//! ## USAGE
//!
//! ```rust
//! use storage_assembly::api::*;
//!
//! let config = StoragesConfig::from_json(r#"{
//!     "storages": {
//!         "main": { "adapter": "memory" },
//!         "uploads": { "adapter": "lazy", "options": { "source": "main" } }
//!     }
//! }"#)?;
//!
//! let mut registry = Registry::new();
//! StorageAssembler::default().assemble_config(&config, &mut registry)?;
//!
//! let factory = LazyFactory::new(registry.freeze());
//! let uploads = factory.create_storage("main", "uploads")?;
//! assert_eq!(uploads.backing_storage(), "main");
//! # Ok::<(), storage_assembly::errors::StorageError>(())
//! ```

pub mod adapters;
pub mod api;
pub mod config;
pub mod errors;
pub mod registry;
pub mod storage;
pub mod types;
pub mod validation;
