// SPDX-License-Identifier: MIT OR Apache-2.0
//! Type descriptors for row fields

use crate::field::Fields;
use std::fmt;

/// Scalar type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    /// Boolean
    Bool,
    /// Signed 64-bit integer, string-encoded on the wire
    Int64,
    /// IEEE 754 double
    Float64,
    /// UTF-8 string
    String,
    /// Binary data, base64 on the wire
    Bytes,
    /// RFC 3339 instant
    Timestamp,
    /// Calendar date
    Date,
    /// Arbitrary-precision decimal, kept textual
    Numeric,
    /// Embedded JSON document
    Json,
}

impl TypeCode {
    /// All scalar type codes, in declaration order
    pub const ALL: [Self; 9] = [
        Self::Bool,
        Self::Int64,
        Self::Float64,
        Self::String,
        Self::Bytes,
        Self::Timestamp,
        Self::Date,
        Self::Numeric,
        Self::Json,
    ];

    /// Wire name of the type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Int64 => "INT64",
            Self::Float64 => "FLOAT64",
            Self::String => "STRING",
            Self::Bytes => "BYTES",
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::Numeric => "NUMERIC",
            Self::Json => "JSON",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a single field: scalar, array, or nested struct
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Scalar value
    Scalar(TypeCode),
    /// Array of elements of the boxed type
    Array(Box<Self>),
    /// Nested row with its own fields
    Struct(Fields),
}

impl FieldType {
    /// Array of the given element type
    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Whether values of this type decode to nested rows
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }
}

impl From<TypeCode> for FieldType {
    fn from(code: TypeCode) -> Self {
        Self::Scalar(code)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(code) => write!(f, "{code}"),
            Self::Array(element) => write!(f, "ARRAY<{element}>"),
            Self::Struct(fields) => {
                f.write_str("STRUCT<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if field.name.is_empty() {
                        write!(f, "{}", field.field_type)?;
                    } else {
                        write!(f, "{} {}", field.name, field.field_type)?;
                    }
                }
                f.write_str(">")
            }
        }
    }
}
