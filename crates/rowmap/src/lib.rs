// SPDX-License-Identifier: MIT OR Apache-2.0
//! # rowmap
//!
//! Typed rows (an ordered field list plus raw wire values) converted into
//! ordered name-to-value maps, with several interchangeable conversion
//! strategies that are verified to agree.
//!
//! ## Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`rowmap_core`] | types, raw value decoding, [`Row`] and the reference [`Row::to_map`] |
//! | [`rowmap_convert`] | the alternative [`Strategy`] implementations, [`verify`], [`fixtures`] |
//!
//! ## Example
//!
//! ```
//! use rowmap::{ConvertOptions, Field, Key, Row, Strategy, TypeCode, Value};
//! use serde_json::json;
//!
//! let row = Row::from_pairs(vec![
//!     (Field::new("id", TypeCode::Int64), json!("42")),
//!     (Field::unnamed(TypeCode::String), json!("hello")),
//! ]);
//!
//! let map = Strategy::Inlined.convert(&row, ConvertOptions::default()).unwrap();
//! assert_eq!(map[&Key::from("id")], Value::Int64(42));
//! assert_eq!(map[&Key::Index(1)], Value::from("hello"));
//!
//! // every strategy produces the same map
//! assert!(rowmap::verify(&row, ConvertOptions::default()).is_ok());
//! ```

#![doc(html_root_url = "https://docs.rs/rowmap/0.1.0")]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]

pub use rowmap_core as core;
pub use rowmap_convert as convert;

pub use rowmap_convert::{Disagreement, Outcome, Strategy, fixtures, outcomes_agree, verify};
pub use rowmap_core::{
    ConvertError, ConvertOptions, Field, FieldType, Fields, Key, RawValue, Result, Row, RowMap,
    TypeCode, Value, decode, map_to_json, maps_identical,
};
