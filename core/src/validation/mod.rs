//! # OPTION VALIDATION MODULE
//!
//! **TRAIT-BASED OPTION NORMALIZATION**
//!
//! Built-in adapter kinds and adapter definition builders declare the options
//! they accept as an `OptionSchemaValidator`. Validation never touches a
//! registry; it only maps raw options to normalized options.
//!
//! ## USAGE
//!
//! ```rust
//! use storage_assembly::validation::{JsonType, OptionSchemaValidator, Validator};
//! use serde_json::json;
//!
//! let schema = OptionSchemaValidator::new()
//!     .require_field("directory", JsonType::String)
//!     .optional_field("lock", JsonType::Number, json!(0));
//!
//! let options = json!({"directory": "/var/storage"}).as_object().cloned().unwrap();
//! let normalized = schema.validate(options).unwrap();
//! assert_eq!(normalized["lock"], json!(0));
//! ```

use crate::errors::StorageError;
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

pub mod validators;

pub use validators::{FieldRule, NumericRangeValidator, OptionSchemaValidator};

/// **CORE VALIDATOR TRAIT**
///
/// **GUARANTEE**: MUST NOT panic. ALL error conditions MUST return an `OptionViolation`.
pub trait Validator {
    /// **INPUT TYPE** - Data type accepted by this validator
    type Input;

    /// **OUTPUT TYPE** - Validated data type returned on success
    type Output;

    fn validate(&self, input: Self::Input) -> ValidationResult<Self::Output>;
}

pub type ValidationResult<T> = Result<T, OptionViolation>;

/// **OPTION VIOLATION**
///
/// Raised without storage context; `into_storage_error` attaches it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptionViolation {
    #[error("required option `{option}` is missing")]
    Missing { option: String },

    #[error("option `{option}` has invalid type, expected {expected}")]
    WrongType { option: String, expected: JsonType },

    #[error("option `{option}` is out of range: {message}")]
    OutOfRange { option: String, message: String },

    #[error("option `{option}` is not defined")]
    Unknown { option: String },

    #[error("{message}")]
    Rejected { message: String },
}

impl OptionViolation {
    /// Attach the storage the violating options belong to.
    pub fn into_storage_error(self, storage: &str) -> StorageError {
        match self {
            OptionViolation::Missing { option } => StorageError::MissingRequiredOption {
                storage: storage.to_string(),
                option,
            },
            other => StorageError::InvalidOptions {
                storage: storage.to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// **JSON TYPE ENUMERATION**
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    /// Accepts any value, including null
    Any,
}

impl JsonType {
    pub fn matches(&self, value: &JsonValue) -> bool {
        matches!(
            (value, self),
            (_, JsonType::Any)
                | (JsonValue::String(_), JsonType::String)
                | (JsonValue::Number(_), JsonType::Number)
                | (JsonValue::Bool(_), JsonType::Boolean)
                | (JsonValue::Array(_), JsonType::Array)
                | (JsonValue::Object(_), JsonType::Object)
        )
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Boolean => "bool",
            JsonType::Array => "array",
            JsonType::Object => "object",
            JsonType::Any => "any",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::error_codes;
    use serde_json::json;

    #[test]
    fn test_json_type_matches() {
        assert!(JsonType::String.matches(&json!("x")));
        assert!(JsonType::Number.matches(&json!(21)));
        assert!(JsonType::Boolean.matches(&json!(false)));
        assert!(JsonType::Object.matches(&json!({})));
        assert!(JsonType::Any.matches(&JsonValue::Null));
        assert!(!JsonType::String.matches(&json!(1)));
        assert!(!JsonType::Boolean.matches(&JsonValue::Null));
    }

    #[test]
    fn test_missing_becomes_missing_required_option() {
        let err = OptionViolation::Missing { option: "directory".into() }.into_storage_error("cache");
        assert_eq!(err.code(), error_codes::MISSING_REQUIRED_OPTION);
        assert_eq!(
            err,
            StorageError::MissingRequiredOption {
                storage: "cache".into(),
                option: "directory".into()
            }
        );
    }

    #[test]
    fn test_other_violations_become_invalid_options() {
        let err = OptionViolation::Unknown { option: "colour".into() }.into_storage_error("cache");
        assert_eq!(err.code(), error_codes::INVALID_OPTIONS);
        assert!(err.to_string().contains("colour"));
    }
}
