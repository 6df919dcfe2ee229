//! Storage assembly: handles, the assembler, capability aliases and the lazy
//! factory.

pub mod aliases;
pub mod assembler;
pub mod handle;
pub mod lazy;

pub use aliases::AliasRegistrar;
pub use assembler::{AssemblyReport, StorageAssembler};
pub use handle::{Lifecycle, StorageHandle};
pub use lazy::{LazyFactory, StorageOperator};
