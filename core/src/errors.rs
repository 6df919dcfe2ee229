use thiserror::Error;

/// **STORAGE ASSEMBLY ERROR**
///
/// Every variant except `UnknownSource` and `SelfReferencingSource` is raised
/// while assembling and aborts start-up. The two lazy-source variants surface
/// at first use of a lazy storage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    #[error("UNRESOLVABLE ADAPTER: `{adapter}` is neither a registered component nor a valid type")]
    UnresolvableAdapter { adapter: String },

    #[error("INVALID CUSTOM ADAPTER: `{adapter}` is neither an adapter nor an adapter definition builder")]
    InvalidCustomAdapter { adapter: String },

    #[error("MISSING OPTION: storage `{storage}` requires option `{option}`")]
    MissingRequiredOption { storage: String, option: String },

    #[error("INVALID OPTIONS: storage `{storage}` - {message}")]
    InvalidOptions { storage: String, message: String },

    #[error("DUPLICATE STORAGE: `{key}` is already registered with a different target")]
    DuplicateStorageName { key: String },

    #[error("UNKNOWN SOURCE: lazy storage `{storage}` refers to source `{source_key}` that doesn't exist")]
    UnknownSource { storage: String, source_key: String },

    #[error("SELF-REFERENCING SOURCE: lazy storage `{storage}` resolves back to itself through `{source_key}`")]
    SelfReferencingSource { storage: String, source_key: String },

    #[error("BUILDER ERROR: `{builder}` - {message}")]
    Builder { builder: String, message: String },

    #[error("CONFIG ERROR: {message}")]
    Config { message: String },
}

impl StorageError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::UnresolvableAdapter { .. } => error_codes::UNRESOLVABLE_ADAPTER,
            StorageError::InvalidCustomAdapter { .. } => error_codes::INVALID_CUSTOM_ADAPTER,
            StorageError::MissingRequiredOption { .. } => error_codes::MISSING_REQUIRED_OPTION,
            StorageError::InvalidOptions { .. } => error_codes::INVALID_OPTIONS,
            StorageError::DuplicateStorageName { .. } => error_codes::DUPLICATE_STORAGE_NAME,
            StorageError::UnknownSource { .. } => error_codes::UNKNOWN_SOURCE,
            StorageError::SelfReferencingSource { .. } => error_codes::SELF_REFERENCING_SOURCE,
            StorageError::Builder { .. } => error_codes::BUILDER_FAILED,
            StorageError::Config { .. } => error_codes::INVALID_CONFIG,
        }
    }

    /// True for errors that can only happen when a lazy storage is first used.
    pub fn is_runtime(&self) -> bool {
        matches!(
            self,
            StorageError::UnknownSource { .. } | StorageError::SelfReferencingSource { .. }
        )
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Config {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// **ERROR CODES**
///
/// **MANDATE**: Use these standardized codes for consistent error reporting.
pub mod error_codes {
    pub const UNRESOLVABLE_ADAPTER: &str = "STORAGE_ASSEMBLY_UNRESOLVABLE_ADAPTER";
    pub const INVALID_CUSTOM_ADAPTER: &str = "STORAGE_ASSEMBLY_INVALID_CUSTOM_ADAPTER";
    pub const MISSING_REQUIRED_OPTION: &str = "STORAGE_ASSEMBLY_MISSING_REQUIRED_OPTION";
    pub const INVALID_OPTIONS: &str = "STORAGE_ASSEMBLY_INVALID_OPTIONS";
    pub const DUPLICATE_STORAGE_NAME: &str = "STORAGE_ASSEMBLY_DUPLICATE_STORAGE_NAME";
    pub const UNKNOWN_SOURCE: &str = "STORAGE_RUNTIME_UNKNOWN_SOURCE";
    pub const SELF_REFERENCING_SOURCE: &str = "STORAGE_RUNTIME_SELF_REFERENCING_SOURCE";
    pub const BUILDER_FAILED: &str = "STORAGE_ASSEMBLY_BUILDER_FAILED";
    pub const INVALID_CONFIG: &str = "STORAGE_ASSEMBLY_INVALID_CONFIG";
}
