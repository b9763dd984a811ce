// SPDX-License-Identifier: MIT OR Apache-2.0
//! Iterator pipeline

use rowmap_core::{ConvertOptions, Result, Row, RowMap, Value, decode, ensure_unique_names};

/// Convert `row` as a single `collect` into `Result<RowMap>`
pub fn to_map(row: &Row, opts: ConvertOptions) -> Result<RowMap> {
    ensure_unique_names(row.fields(), opts)?;

    row.fields()
        .iter()
        .zip(row.raw_values())
        .enumerate()
        .map(|(i, (field, raw))| {
            decode(raw, &field.field_type)
                .and_then(|value| nested(value, opts))
                .map(|value| (field.key(i), value))
        })
        .collect()
}

fn nested(value: Value, opts: ConvertOptions) -> Result<Value> {
    match value {
        Value::Row(row) => to_map(&row, opts).map(Value::Map),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Row(row) => to_map(&row, opts).map(Value::Map),
                other => Ok(other),
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other),
    }
}
