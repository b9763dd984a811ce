// SPDX-License-Identifier: MIT OR Apache-2.0
//! Converted values, map keys, and the output map

use crate::row::Row;
use crate::symbol::Symbol;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use indexmap::IndexMap;
use std::fmt;

/// Key of one entry in a converted row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Interned field name
    Name(Symbol),
    /// Position of an unnamed field
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(symbol) => write!(f, "{symbol}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(crate::symbol::intern(name))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Insertion-ordered mapping produced by row conversion
pub type RowMap = IndexMap<Key, Value, ahash::RandomState>;

/// Empty [`RowMap`] with room for `capacity` entries
#[must_use]
pub fn new_row_map(capacity: usize) -> RowMap {
    RowMap::with_capacity_and_hasher(capacity, ahash::RandomState::new())
}

/// A decoded value
///
/// Decoding yields every variant except [`Value::Map`]. Converting a row
/// replaces struct values and struct elements directly inside an array with
/// [`Value::Map`]; rows nested inside inner arrays stay [`Value::Row`].
#[derive(Debug, Clone)]
pub enum Value {
    /// SQL NULL
    Null,
    /// BOOL
    Bool(bool),
    /// INT64
    Int64(i64),
    /// FLOAT64
    Float64(f64),
    /// STRING
    String(String),
    /// BYTES
    Bytes(Vec<u8>),
    /// TIMESTAMP
    Timestamp(DateTime<Utc>),
    /// DATE
    Date(NaiveDate),
    /// NUMERIC, kept in its decimal text form
    Numeric(String),
    /// JSON
    Json(serde_json::Value),
    /// ARRAY
    Array(Vec<Self>),
    /// Nested STRUCT before conversion
    Row(Row),
    /// Nested STRUCT after conversion
    Map(RowMap),
}

impl Value {
    /// Whether the value is NULL
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Nested row, if this is one
    #[must_use]
    pub const fn as_row(&self) -> Option<&Row> {
        match self {
            Self::Row(row) => Some(row),
            _ => None,
        }
    }

    /// Converted nested row, if this is one
    #[must_use]
    pub const fn as_map(&self) -> Option<&RowMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Equality that also requires nested maps to share key order
    #[must_use]
    pub fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Map(a), Self::Map(b)) => maps_identical(a, b),
            (Self::Array(a), Self::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.identical(y))
            }
            _ => self == other,
        }
    }

    /// Render as JSON, keys in map order
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as J;
        match self {
            Self::Null => J::Null,
            Self::Bool(b) => J::Bool(*b),
            Self::Int64(i) => J::from(*i),
            Self::Float64(f) => serde_json::Number::from_f64(*f)
                .map_or_else(|| J::String(f.to_string()), J::Number),
            Self::String(s) | Self::Numeric(s) => J::String(s.clone()),
            Self::Bytes(b) => J::String(STANDARD.encode(b)),
            Self::Timestamp(ts) => J::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Date(d) => J::String(d.format("%Y-%m-%d").to_string()),
            Self::Json(j) => j.clone(),
            Self::Array(items) => J::Array(items.iter().map(Self::to_json).collect()),
            Self::Row(row) => J::Array(row.raw_values().to_vec()),
            Self::Map(map) => map_to_json(map),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            // bitwise so NaN payloads compare equal to themselves
            (Self::Float64(a), Self::Float64(b)) => a.to_bits() == b.to_bits() || a == b,
            (Self::String(a), Self::String(b)) | (Self::Numeric(a), Self::Numeric(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Row(a), Self::Row(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Map equality that also requires identical key order at every level
#[must_use]
pub fn maps_identical(a: &RowMap, b: &RowMap) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|((ka, va), (kb, vb))| ka == kb && va.identical(vb))
}

/// Render a converted row as a JSON object, keys in map order
#[must_use]
pub fn map_to_json(map: &RowMap) -> serde_json::Value {
    let object: serde_json::Map<String, serde_json::Value> = map
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_json()))
        .collect();
    serde_json::Value::Object(object)
}
