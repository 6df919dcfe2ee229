//! Option schemas of the built-in adapter kinds.

use super::types::AdapterKind;
use crate::validation::{JsonType, NumericRangeValidator, OptionSchemaValidator};
use once_cell::sync::Lazy;
use serde_json::json;
use std::collections::HashMap;

static BUILTIN_SCHEMAS: Lazy<HashMap<AdapterKind, OptionSchemaValidator>> = Lazy::new(|| {
    AdapterKind::ALL
        .into_iter()
        .map(|kind| (kind, build_schema(kind)))
        .collect()
});

/// Declared option schema of a built-in kind.
pub fn schema_for(kind: AdapterKind) -> &'static OptionSchemaValidator {
    // Every kind is inserted when the table is built.
    &BUILTIN_SCHEMAS[&kind]
}

fn build_schema(kind: AdapterKind) -> OptionSchemaValidator {
    match kind {
        AdapterKind::Local => OptionSchemaValidator::new()
            .require_field("directory", JsonType::String)
            .optional_field("lock", JsonType::Number, json!(0))
            .optional_field("skip_links", JsonType::Boolean, json!(false))
            .nullable_field("permissions", JsonType::Object)
            .optional_field("lazy_root_creation", JsonType::Boolean, json!(false)),

        AdapterKind::Memory => OptionSchemaValidator::new(),

        AdapterKind::Aws => OptionSchemaValidator::new()
            .require_field("client", JsonType::String)
            .require_field("bucket", JsonType::String)
            .optional_field("prefix", JsonType::String, json!(""))
            .optional_field("streamReads", JsonType::Boolean, json!(true)),

        AdapterKind::AsyncAws => OptionSchemaValidator::new()
            .require_field("client", JsonType::String)
            .require_field("bucket", JsonType::String)
            .optional_field("prefix", JsonType::String, json!("")),

        AdapterKind::Azure => OptionSchemaValidator::new()
            .require_field("client", JsonType::String)
            .require_field("container", JsonType::String)
            .optional_field("prefix", JsonType::String, json!("")),

        AdapterKind::Gcloud => OptionSchemaValidator::new()
            .require_field("client", JsonType::String)
            .require_field("bucket", JsonType::String)
            .optional_field("prefix", JsonType::String, json!("")),

        AdapterKind::Ftp => OptionSchemaValidator::new()
            .require_field("host", JsonType::String)
            .require_field("username", JsonType::String)
            .require_field("password", JsonType::String)
            .optional_field("port", JsonType::Number, json!(21))
            .in_range(NumericRangeValidator::port())
            .optional_field("root", JsonType::String, json!(""))
            .optional_field("passive", JsonType::Boolean, json!(true))
            .optional_field("ssl", JsonType::Boolean, json!(false))
            .optional_field("timeout", JsonType::Number, json!(90))
            .in_range(NumericRangeValidator::seconds())
            .nullable_field("ignore_passive_address", JsonType::Boolean)
            .optional_field("utf8", JsonType::Boolean, json!(false)),

        AdapterKind::Sftp => OptionSchemaValidator::new()
            .require_field("host", JsonType::String)
            .require_field("username", JsonType::String)
            .nullable_field("password", JsonType::String)
            .nullable_field("privateKey", JsonType::String)
            .nullable_field("passphrase", JsonType::String)
            .optional_field("port", JsonType::Number, json!(22))
            .in_range(NumericRangeValidator::port())
            .optional_field("timeout", JsonType::Number, json!(90))
            .in_range(NumericRangeValidator::seconds())
            .optional_field("root", JsonType::String, json!("")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OptionMap;
    use crate::validation::{OptionViolation, Validator};

    fn options(value: serde_json::Value) -> OptionMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_every_kind_has_a_schema() {
        for kind in AdapterKind::ALL {
            let _ = schema_for(kind);
        }
    }

    #[test]
    fn test_memory_takes_no_options() {
        let schema = schema_for(AdapterKind::Memory);
        assert!(schema.validate(OptionMap::new()).unwrap().is_empty());
        assert!(schema.validate(options(json!({"directory": "/tmp"}))).is_err());
    }

    #[test]
    fn test_ftp_defaults() {
        let normalized = schema_for(AdapterKind::Ftp)
            .validate(options(json!({"host": "ftp.example.com", "username": "u", "password": "p"})))
            .unwrap();
        assert_eq!(normalized["port"], json!(21));
        assert_eq!(normalized["timeout"], json!(90));
        assert_eq!(normalized["passive"], json!(true));
    }

    #[test]
    fn test_sftp_port_out_of_range() {
        let result = schema_for(AdapterKind::Sftp)
            .validate(options(json!({"host": "h", "username": "u", "port": 0})));
        assert!(matches!(result, Err(OptionViolation::OutOfRange { .. })));
    }

    #[test]
    fn test_aws_requires_bucket() {
        let result = schema_for(AdapterKind::Aws).validate(options(json!({"client": "s3"})));
        assert_eq!(
            result,
            Err(OptionViolation::Missing {
                option: "bucket".into()
            })
        );
    }
}
