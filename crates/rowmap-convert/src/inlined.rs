// SPDX-License-Identifier: MIT OR Apache-2.0
//! Nested-row handling inlined on the declared type
//!
//! Struct and array-of-struct fields are converted straight from their raw
//! lists, so no intermediate [`Row`] is built and no raw value is cloned.
//! Every other type goes through [`decode`], which cannot yield rows for it.

use rowmap_core::{
    ConvertError, ConvertOptions, FieldType, Fields, Key, RawValue, Result, Row, RowMap, Value,
    decode, ensure_unique_names, expect_list, intern, new_row_map,
};

/// Convert `row` dispatching on each field's declared type
pub fn to_map(row: &Row, opts: ConvertOptions) -> Result<RowMap> {
    convert_parts(row.fields(), row.raw_values(), opts)
}

fn convert_parts(fields: &Fields, values: &[RawValue], opts: ConvertOptions) -> Result<RowMap> {
    ensure_unique_names(fields, opts)?;

    let mut map = new_row_map(values.len());
    for (i, (field, raw)) in fields.iter().zip(values).enumerate() {
        let key = if field.name.is_empty() {
            Key::Index(i)
        } else {
            Key::Name(intern(&field.name))
        };

        let ty = &field.field_type;
        let value = match ty {
            _ if raw.is_null() => Value::Null,
            FieldType::Struct(nested) => {
                let items = struct_items(raw, ty, nested)?;
                Value::Map(convert_parts(nested, items, opts)?)
            }
            FieldType::Array(element_ty) => match element_ty.as_ref() {
                FieldType::Struct(nested) => {
                    let elements = expect_list(raw, ty)?;
                    // shape errors surface before any element converts
                    for item in elements.iter().filter(|e| !e.is_null()) {
                        struct_items(item, element_ty, nested)?;
                    }
                    let mut converted = Vec::with_capacity(elements.len());
                    for item in elements {
                        converted.push(if item.is_null() {
                            Value::Null
                        } else {
                            let items = struct_items(item, element_ty, nested)?;
                            Value::Map(convert_parts(nested, items, opts)?)
                        });
                    }
                    Value::Array(converted)
                }
                _ => decode(raw, ty)?,
            },
            FieldType::Scalar(_) => decode(raw, ty)?,
        };
        map.insert(key, value);
    }
    Ok(map)
}

fn struct_items<'a>(raw: &'a RawValue, ty: &FieldType, fields: &Fields) -> Result<&'a [RawValue]> {
    let items = expect_list(raw, ty)?;
    if items.len() != fields.len() {
        return Err(ConvertError::ArityMismatch {
            fields: fields.len(),
            values: items.len(),
        });
    }
    Ok(items)
}
