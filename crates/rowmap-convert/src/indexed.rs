// SPDX-License-Identifier: MIT OR Apache-2.0
//! Explicit index loop

use rowmap_core::{
    ConvertOptions, Key, Result, Row, RowMap, Value, decode, ensure_unique_names, intern,
    new_row_map,
};

/// Convert `row` walking fields and values by position
#[allow(clippy::needless_range_loop)]
pub fn to_map(row: &Row, opts: ConvertOptions) -> Result<RowMap> {
    let fields = row.fields();
    let values = row.raw_values();
    ensure_unique_names(fields, opts)?;

    let mut map = new_row_map(values.len());
    for i in 0..values.len() {
        let field = &fields[i];
        let key = if field.name.is_empty() {
            Key::Index(i)
        } else {
            Key::Name(intern(&field.name))
        };

        let value = match decode(&values[i], &field.field_type)? {
            Value::Row(nested) => Value::Map(to_map(&nested, opts)?),
            Value::Array(mut items) => {
                for j in 0..items.len() {
                    let converted = match &items[j] {
                        Value::Row(nested) => Some(to_map(nested, opts)?),
                        _ => None,
                    };
                    if let Some(nested) = converted {
                        items[j] = Value::Map(nested);
                    }
                }
                Value::Array(items)
            }
            other => other,
        };
        map.insert(key, value);
    }
    Ok(map)
}
