// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sample rows
//!
//! Rows are deterministic for a given size, so every strategy and every
//! benchmark run sees identical input.

use rowmap_core::{Field, FieldType, Fields, RawValue, Row, TypeCode};
use serde_json::json;

/// Row widths the benchmarks and self-check use by default
pub const BENCH_SIZES: [usize; 4] = [5, 10, 20, 50];

/// Every seventh field is unnamed and keyed by position
pub const UNNAMED_EVERY: usize = 7;

/// Elements in each array-of-struct field
pub const STRUCT_ARRAY_LEN: usize = 3;

#[derive(Debug, Clone, Copy)]
enum Slot {
    String,
    Int64,
    Struct,
    Float64,
    StructArray,
    Bool,
    Timestamp,
    Bytes,
    Date,
    Numeric,
    Json,
    Int64Array,
}

const SLOTS: [Slot; 12] = [
    Slot::String,
    Slot::Int64,
    Slot::Struct,
    Slot::Float64,
    Slot::StructArray,
    Slot::Bool,
    Slot::Timestamp,
    Slot::Bytes,
    Slot::Date,
    Slot::Numeric,
    Slot::Json,
    Slot::Int64Array,
];

/// Fields of the nested struct used by [`sample_row`]
#[must_use]
pub fn address_fields() -> Fields {
    Fields::new(vec![
        Field::new("street", TypeCode::String),
        Field::new("number", TypeCode::Int64),
        Field::unnamed(TypeCode::Bool),
    ])
}

fn address(i: usize) -> RawValue {
    json!([format!("{i} Main St"), (i * 10).to_string(), i % 2 == 0])
}

/// Row of `size` fields cycling through every scalar type, a nested
/// struct, an array of structs, and an array of integers
///
/// Names are `field_<i>`, except every [`UNNAMED_EVERY`]th field which is
/// unnamed. All struct fields share one field list.
#[must_use]
pub fn sample_row(size: usize) -> Row {
    let nested = address_fields();
    let pairs = (0..size)
        .map(|i| {
            let (field_type, raw) = slot_value(SLOTS[i % SLOTS.len()], i, &nested);
            let field = if i % UNNAMED_EVERY == UNNAMED_EVERY - 1 {
                Field::unnamed(field_type)
            } else {
                Field::new(format!("field_{i}"), field_type)
            };
            (field, raw)
        })
        .collect();
    Row::from_pairs(pairs)
}

fn slot_value(slot: Slot, i: usize, nested: &Fields) -> (FieldType, RawValue) {
    match slot {
        Slot::String => (TypeCode::String.into(), json!(format!("value_{i}"))),
        Slot::Int64 => (TypeCode::Int64.into(), json!((i * 1000).to_string())),
        Slot::Struct => (FieldType::Struct(nested.clone()), address(i)),
        Slot::Float64 => (TypeCode::Float64.into(), json!(i as f64 * 0.5)),
        Slot::StructArray => (
            FieldType::array(FieldType::Struct(nested.clone())),
            RawValue::Array((0..STRUCT_ARRAY_LEN).map(|j| address(i + j)).collect()),
        ),
        Slot::Bool => (TypeCode::Bool.into(), json!(i % 3 == 0)),
        Slot::Timestamp => (
            TypeCode::Timestamp.into(),
            json!(format!("2024-01-15T10:30:{:02}Z", i % 60)),
        ),
        Slot::Bytes => (TypeCode::Bytes.into(), json!("cm93bWFwIGJ5dGVz")),
        Slot::Date => (
            TypeCode::Date.into(),
            json!(format!("2024-01-{:02}", i % 28 + 1)),
        ),
        Slot::Numeric => (TypeCode::Numeric.into(), json!(format!("{i}.25"))),
        Slot::Json => (
            TypeCode::Json.into(),
            json!(format!(r#"{{"id":{i},"tags":["a","b"]}}"#)),
        ),
        Slot::Int64Array => (
            FieldType::array(TypeCode::Int64.into()),
            json!([i.to_string(), null, (i + 1).to_string()]),
        ),
    }
}

/// Row `[(a, "x"), ("", "y"), (a, "z")]`: fails the duplicate-name check,
/// converts to `{a: "z", 1: "y"}` when the check is skipped
#[must_use]
pub fn duplicate_row() -> Row {
    Row::from_pairs(vec![
        (Field::new("a", TypeCode::String), json!("x")),
        (Field::unnamed(TypeCode::String), json!("y")),
        (Field::new("a", TypeCode::String), json!("z")),
    ])
}

/// Single field holding `len` structs that share one field list
#[must_use]
pub fn struct_array_row(len: usize) -> Row {
    let nested = address_fields();
    let items = (0..len).map(address).collect();
    Row::from_pairs(vec![(
        Field::new("addresses", FieldType::array(FieldType::Struct(nested))),
        RawValue::Array(items),
    )])
}

/// Structs nested `depth` levels deep, each level `{value, child}`
#[must_use]
pub fn deep_row(depth: usize) -> Row {
    let mut field_type = FieldType::from(TypeCode::Int64);
    let mut raw = json!("0");
    for level in 1..=depth {
        let fields = Fields::new(vec![
            Field::new("value", TypeCode::Int64),
            Field::new("child", field_type),
        ]);
        field_type = FieldType::Struct(fields);
        raw = json!([level.to_string(), raw]);
    }
    Row::from_pairs(vec![(Field::new("root", field_type), raw)])
}
