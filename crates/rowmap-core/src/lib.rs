// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types, error handling, and value decoding for rowmap
//!
//! This crate provides the foundational types shared by every conversion
//! strategy:
//!
//! - [`error`] - Error types and Result alias
//! - [`types`] - Type descriptors (scalar, array, struct)
//! - [`field`] - Field descriptors and shared field lists
//! - [`symbol`] - Process-wide name interning
//! - [`value`] - Converted values, map keys, and the output map
//! - [`decode`] - Raw wire value to converted value decoding
//! - [`row`] - Typed rows and the canonical row-to-map conversion

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Raw value decoding against a type descriptor
pub mod decode;
/// Error types for rowmap operations
pub mod error;
/// Field descriptors and field lists
pub mod field;
/// Typed rows
pub mod row;
/// Interned field names
pub mod symbol;
/// Type descriptors
pub mod types;
/// Converted values, keys, and maps
pub mod value;

// Re-exports for convenience
pub use decode::{RawValue, decode, decode_all, expect_list};
pub use error::{ConvertError, Result};
pub use field::{Field, Fields, KeyBuf};
pub use row::{ConvertOptions, Row, convert_value, ensure_unique_names};
pub use symbol::{Symbol, intern};
pub use types::{FieldType, TypeCode};
pub use value::{Key, RowMap, Value, map_to_json, maps_identical, new_row_map};
