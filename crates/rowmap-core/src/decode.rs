// SPDX-License-Identifier: MIT OR Apache-2.0
//! Raw value decoding
//!
//! Raw values arrive as JSON values. Every type accepts `null`. The other
//! encodings per type:
//!
//! | Type | Encoding |
//! |------|----------|
//! | BOOL | JSON bool |
//! | INT64 | decimal string (JSON integer also accepted) |
//! | FLOAT64 | JSON number, or `"NaN"`, `"Infinity"`, `"-Infinity"` |
//! | STRING | JSON string |
//! | BYTES | base64 string |
//! | TIMESTAMP | RFC 3339 string |
//! | DATE | `YYYY-MM-DD` string |
//! | NUMERIC | decimal string, kept textual |
//! | JSON | string holding a JSON document |
//! | ARRAY | JSON list |
//! | STRUCT | JSON list aligned with the struct's fields |

use crate::error::{ConvertError, Result, json_kind};
use crate::field::Fields;
use crate::row::Row;
use crate::types::{FieldType, TypeCode};
use crate::value::Value;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, Utc};

/// Raw wire value
pub type RawValue = serde_json::Value;

/// Decode `raw` against `field_type`
///
/// Struct values decode to [`Value::Row`] sharing the type's field list.
///
/// # Errors
///
/// Returns an error when `raw` has the wrong shape for `field_type` or its
/// payload does not parse.
pub fn decode(raw: &RawValue, field_type: &FieldType) -> Result<Value> {
    if raw.is_null() {
        return Ok(Value::Null);
    }
    match field_type {
        FieldType::Scalar(code) => decode_scalar(raw, *code),
        FieldType::Array(element) => {
            let items = expect_list(raw, field_type)?;
            items
                .iter()
                .map(|item| decode(item, element))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        FieldType::Struct(fields) => {
            let items = expect_list(raw, field_type)?;
            Row::new(fields.clone(), items.to_vec()).map(Value::Row)
        }
    }
}

/// Decode every value in `values` against the matching field in `fields`
///
/// # Errors
///
/// Returns an error on arity mismatch or when any value fails to decode.
pub fn decode_all(fields: &Fields, values: &[RawValue]) -> Result<Vec<Value>> {
    if fields.len() != values.len() {
        return Err(ConvertError::ArityMismatch {
            fields: fields.len(),
            values: values.len(),
        });
    }
    fields
        .iter()
        .zip(values)
        .map(|(field, raw)| decode(raw, &field.field_type))
        .collect()
}

/// Elements of a raw list value declared as `field_type`
///
/// # Errors
///
/// Returns [`ConvertError::TypeMismatch`] if `raw` is not a list.
pub fn expect_list<'a>(raw: &'a RawValue, field_type: &FieldType) -> Result<&'a [RawValue]> {
    raw.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ConvertError::TypeMismatch {
            expected: field_type.to_string(),
            found: json_kind(raw),
        })
}

fn expect_str(raw: &RawValue, code: TypeCode) -> Result<&str> {
    raw.as_str()
        .ok_or_else(|| ConvertError::mismatch(code, raw))
}

fn decode_scalar(raw: &RawValue, code: TypeCode) -> Result<Value> {
    match code {
        TypeCode::Bool => raw
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| ConvertError::mismatch(code, raw)),
        TypeCode::Int64 => decode_int64(raw),
        TypeCode::Float64 => decode_float64(raw),
        TypeCode::String => expect_str(raw, code).map(|s| Value::String(s.to_string())),
        TypeCode::Bytes => {
            let s = expect_str(raw, code)?;
            STANDARD
                .decode(s)
                .map(Value::Bytes)
                .map_err(|e| ConvertError::InvalidBytes(e.to_string()))
        }
        TypeCode::Timestamp => {
            let s = expect_str(raw, code)?;
            DateTime::parse_from_rfc3339(s)
                .map(|ts| Value::Timestamp(ts.with_timezone(&Utc)))
                .map_err(|_| ConvertError::InvalidTimestamp(s.to_string()))
        }
        TypeCode::Date => {
            let s = expect_str(raw, code)?;
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| ConvertError::InvalidDate(s.to_string()))
        }
        TypeCode::Numeric => expect_str(raw, code).map(|s| Value::Numeric(s.to_string())),
        TypeCode::Json => {
            let s = expect_str(raw, code)?;
            serde_json::from_str(s)
                .map(Value::Json)
                .map_err(|e| ConvertError::InvalidJson(e.to_string()))
        }
    }
}

fn decode_int64(raw: &RawValue) -> Result<Value> {
    match raw {
        RawValue::String(s) => s
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|_| ConvertError::InvalidInt64(s.clone())),
        RawValue::Number(n) => n
            .as_i64()
            .map(Value::Int64)
            .ok_or_else(|| ConvertError::InvalidInt64(n.to_string())),
        _ => Err(ConvertError::mismatch(TypeCode::Int64, raw)),
    }
}

fn decode_float64(raw: &RawValue) -> Result<Value> {
    match raw {
        RawValue::Number(n) => n
            .as_f64()
            .map(Value::Float64)
            .ok_or_else(|| ConvertError::InvalidFloat64(n.to_string())),
        RawValue::String(s) => match s.as_str() {
            "NaN" => Ok(Value::Float64(f64::NAN)),
            "Infinity" => Ok(Value::Float64(f64::INFINITY)),
            "-Infinity" => Ok(Value::Float64(f64::NEG_INFINITY)),
            _ => Err(ConvertError::InvalidFloat64(s.clone())),
        },
        _ => Err(ConvertError::mismatch(TypeCode::Float64, raw)),
    }
}
