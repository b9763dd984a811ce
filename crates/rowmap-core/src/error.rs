// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for row conversion

use crate::types::TypeCode;
use thiserror::Error;

/// Errors raised while decoding or converting a row
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Two fields share the same non-empty name and duplicate checking is enabled
    #[error("duplicate field name: {name}")]
    DuplicateFieldName {
        /// First name found more than once
        name: String,
    },

    /// Field list and value list differ in length
    #[error("row has {fields} fields but {values} values")]
    ArityMismatch {
        /// Number of field descriptors
        fields: usize,
        /// Number of raw values
        values: usize,
    },

    /// Raw value has the wrong JSON shape for its type
    #[error("expected {expected} but found {found}")]
    TypeMismatch {
        /// Type the field declares
        expected: String,
        /// JSON kind actually present
        found: &'static str,
    },

    /// INT64 payload did not parse
    #[error("invalid INT64 value: {0}")]
    InvalidInt64(String),

    /// FLOAT64 payload did not parse
    #[error("invalid FLOAT64 value: {0}")]
    InvalidFloat64(String),

    /// BYTES payload is not valid base64
    #[error("invalid BYTES value: {0}")]
    InvalidBytes(String),

    /// TIMESTAMP payload is not RFC 3339
    #[error("invalid TIMESTAMP value: {0}")]
    InvalidTimestamp(String),

    /// DATE payload is not `YYYY-MM-DD`
    #[error("invalid DATE value: {0}")]
    InvalidDate(String),

    /// JSON payload is not a JSON document
    #[error("invalid JSON value: {0}")]
    InvalidJson(String),
}

impl ConvertError {
    pub(crate) fn mismatch(expected: TypeCode, found: &serde_json::Value) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: json_kind(found),
        }
    }
}

/// Short name of a JSON value's kind, used in error messages
#[must_use]
pub const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

/// Result type for rowmap operations
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConvertError::DuplicateFieldName {
            name: "id".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate field name: id");

        let err = ConvertError::ArityMismatch {
            fields: 3,
            values: 2,
        };
        assert_eq!(err.to_string(), "row has 3 fields but 2 values");
    }

    #[test]
    fn test_mismatch_names_kind() {
        let err = ConvertError::mismatch(TypeCode::Bool, &serde_json::json!("yes"));
        assert_eq!(err.to_string(), "expected BOOL but found string");
    }
}
