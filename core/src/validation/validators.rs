//! # CONCRETE VALIDATOR IMPLEMENTATIONS
//!
//! **CRITICAL**: Option schemas normalize adapter options; numeric range checks
//! guard ports and timeouts.

use super::{JsonType, OptionViolation, ValidationResult, Validator};
use crate::types::OptionMap;
use serde_json::Value as JsonValue;
use std::ops::RangeInclusive;

// ================================================================================================
// NUMERIC RANGE VALIDATOR - Bounds checks for integer options
// ================================================================================================

/// **NUMERIC RANGE VALIDATOR**
#[derive(Debug, Clone, PartialEq)]
pub struct NumericRangeValidator<T> {
    /// **VALID RANGE** - Inclusive range of acceptable values
    range: RangeInclusive<T>,

    /// **TYPE NAME** - For error reporting
    type_name: &'static str,
}

impl<T> NumericRangeValidator<T>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    pub fn new(range: RangeInclusive<T>, type_name: &'static str) -> Self {
        Self { range, type_name }
    }

    pub fn check(&self, option: &str, input: T) -> ValidationResult<T> {
        if self.range.contains(&input) {
            Ok(input)
        } else {
            Err(OptionViolation::OutOfRange {
                option: option.to_string(),
                message: format!(
                    "value {} outside valid {} range {}..={}",
                    input,
                    self.type_name,
                    self.range.start(),
                    self.range.end()
                ),
            })
        }
    }
}

impl NumericRangeValidator<u64> {
    /// **PORT VALIDATOR** - TCP port numbers
    pub fn port() -> Self {
        NumericRangeValidator::new(1..=65_535, "port")
    }

    /// **SECONDS VALIDATOR** - Non-zero timeouts up to one day
    pub fn seconds() -> Self {
        NumericRangeValidator::new(1..=86_400, "seconds")
    }
}

impl Validator for NumericRangeValidator<u64> {
    type Input = (String, JsonValue);
    type Output = u64;

    fn validate(&self, (option, value): Self::Input) -> ValidationResult<Self::Output> {
        let number = value.as_u64().ok_or_else(|| OptionViolation::OutOfRange {
            option: option.clone(),
            message: format!("expected a non-negative integer, got {}", value),
        })?;
        self.check(&option, number)
    }
}

// ================================================================================================
// OPTION SCHEMA VALIDATOR - Allowed keys, types and defaults
// ================================================================================================

/// **FIELD RULE**
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub name: String,
    pub json_type: JsonType,
    pub required: bool,
    /// Inserted when the option is absent. `None` leaves it absent.
    pub default: Option<JsonValue>,
    pub range: Option<NumericRangeValidator<u64>>,
}

/// **OPTION SCHEMA VALIDATOR**
///
/// **PURPOSE**: Normalizes an option mapping against a declared schema.
/// **GUARANTEE**: Output holds every declared field that is required or has a
/// default, in declaration order, followed by nothing else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSchemaValidator {
    fields: Vec<FieldRule>,
}

impl OptionSchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// **ADD REQUIRED FIELD**
    pub fn require_field(mut self, field: impl Into<String>, json_type: JsonType) -> Self {
        self.fields.push(FieldRule {
            name: field.into(),
            json_type,
            required: true,
            default: None,
            range: None,
        });
        self
    }

    /// **ADD OPTIONAL FIELD WITH DEFAULT**
    pub fn optional_field(
        mut self,
        field: impl Into<String>,
        json_type: JsonType,
        default: JsonValue,
    ) -> Self {
        self.fields.push(FieldRule {
            name: field.into(),
            json_type,
            required: false,
            default: Some(default),
            range: None,
        });
        self
    }

    /// **ADD OPTIONAL FIELD WITHOUT DEFAULT** - Nullable
    pub fn nullable_field(mut self, field: impl Into<String>, json_type: JsonType) -> Self {
        self.fields.push(FieldRule {
            name: field.into(),
            json_type,
            required: false,
            default: Some(JsonValue::Null),
            range: None,
        });
        self
    }

    /// **CONSTRAIN LAST FIELD** - Numeric range on the most recently added field
    pub fn in_range(mut self, range: NumericRangeValidator<u64>) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.range = Some(range);
        }
        self
    }

    fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }
}

impl Validator for OptionSchemaValidator {
    type Input = OptionMap;
    type Output = OptionMap;

    fn validate(&self, input: Self::Input) -> ValidationResult<Self::Output> {
        // **STEP 1**: Reject unknown options
        if let Some(unknown) = input.keys().find(|key| self.field(key).is_none()) {
            return Err(OptionViolation::Unknown {
                option: unknown.clone(),
            });
        }

        // **STEP 2**: Required fields, types, defaults and ranges
        let mut normalized = OptionMap::new();
        for rule in &self.fields {
            match input.get(&rule.name) {
                Some(value) => {
                    let nullable = !rule.required && rule.default == Some(JsonValue::Null);
                    if !(rule.json_type.matches(value) || (nullable && value.is_null())) {
                        return Err(OptionViolation::WrongType {
                            option: rule.name.clone(),
                            expected: rule.json_type,
                        });
                    }
                    if let Some(range) = &rule.range {
                        range.validate((rule.name.clone(), value.clone()))?;
                    }
                    normalized.insert(rule.name.clone(), value.clone());
                }
                None if rule.required => {
                    return Err(OptionViolation::Missing {
                        option: rule.name.clone(),
                    });
                }
                None => {
                    if let Some(default) = &rule.default {
                        normalized.insert(rule.name.clone(), default.clone());
                    }
                }
            }
        }

        Ok(normalized)
    }
}

// ================================================================================================
// UNIT TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: JsonValue) -> OptionMap {
        value.as_object().cloned().unwrap()
    }

    mod numeric_validator_tests {
        use super::*;

        #[test]
        fn test_port_boundaries() {
            let validator = NumericRangeValidator::port();
            assert!(validator.check("port", 1).is_ok());
            assert!(validator.check("port", 65_535).is_ok());
            assert!(validator.check("port", 0).is_err());
            assert!(validator.check("port", 65_536).is_err());
        }

        #[test]
        fn test_rejects_non_integer() {
            let validator = NumericRangeValidator::seconds();
            let result = validator.validate(("timeout".to_string(), json!("ninety")));
            assert!(matches!(result, Err(OptionViolation::OutOfRange { .. })));
        }

        #[test]
        fn test_accepts_integer_value() {
            let validator = NumericRangeValidator::seconds();
            assert_eq!(validator.validate(("timeout".to_string(), json!(90))), Ok(90));
        }
    }

    mod schema_validator_tests {
        use super::*;

        fn local_like() -> OptionSchemaValidator {
            OptionSchemaValidator::new()
                .require_field("directory", JsonType::String)
                .optional_field("lock", JsonType::Number, json!(0))
                .optional_field("skip_links", JsonType::Boolean, json!(false))
                .nullable_field("permissions", JsonType::Object)
        }

        #[test]
        fn test_defaults_are_filled() {
            let normalized = local_like()
                .validate(options(json!({"directory": "/srv"})))
                .unwrap();

            assert_eq!(normalized["directory"], json!("/srv"));
            assert_eq!(normalized["lock"], json!(0));
            assert_eq!(normalized["skip_links"], json!(false));
            assert_eq!(normalized["permissions"], JsonValue::Null);
        }

        #[test]
        fn test_output_follows_schema_order() {
            let normalized = local_like()
                .validate(options(json!({"skip_links": true, "directory": "/srv"})))
                .unwrap();
            let keys: Vec<&str> = normalized.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["directory", "lock", "skip_links", "permissions"]);
        }

        #[test]
        fn test_missing_required() {
            let result = local_like().validate(options(json!({"lock": 1})));
            assert_eq!(
                result,
                Err(OptionViolation::Missing {
                    option: "directory".into()
                })
            );
        }

        #[test]
        fn test_wrong_type() {
            let result = local_like().validate(options(json!({"directory": 42})));
            assert!(matches!(result, Err(OptionViolation::WrongType { .. })));
        }

        #[test]
        fn test_nullable_field_accepts_null() {
            let result =
                local_like().validate(options(json!({"directory": "/srv", "permissions": null})));
            assert!(result.is_ok());
        }

        #[test]
        fn test_unknown_rejected() {
            let result = local_like().validate(options(json!({"directory": "/srv", "colour": "red"})));
            assert_eq!(
                result,
                Err(OptionViolation::Unknown {
                    option: "colour".into()
                })
            );
        }

        #[test]
        fn test_range_on_last_field() {
            let schema = OptionSchemaValidator::new()
                .optional_field("port", JsonType::Number, json!(21))
                .in_range(NumericRangeValidator::port());

            assert!(schema.validate(options(json!({"port": 2121}))).is_ok());
            assert!(matches!(
                schema.validate(options(json!({"port": 70000}))),
                Err(OptionViolation::OutOfRange { .. })
            ));
        }

        #[test]
        fn test_empty_schema_accepts_empty_options() {
            let schema = OptionSchemaValidator::new();
            assert_eq!(schema.validate(OptionMap::new()), Ok(OptionMap::new()));
        }
    }
}
