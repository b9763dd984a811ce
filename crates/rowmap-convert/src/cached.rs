// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-call key cache
//!
//! Elements of an array of structs share one field list. The first time a
//! list is seen its names are validated and its keys built; every sibling
//! reuses that entry. The cache lives for one top-level call.

use rowmap_core::{
    ConvertOptions, Fields, Key, Result, Row, RowMap, Value, decode, ensure_unique_names,
    new_row_map,
};
use smallvec::SmallVec;
use std::rc::Rc;
use tracing::trace;

#[derive(Default)]
struct KeyCache {
    entries: SmallVec<[(Fields, Rc<[Key]>); 4]>,
}

impl KeyCache {
    /// Keys for `fields`, validating names on first sight
    fn keys_for(&mut self, fields: &Fields, opts: ConvertOptions) -> Result<Rc<[Key]>> {
        if let Some((_, keys)) = self.entries.iter().find(|(f, _)| f.ptr_eq(fields)) {
            trace!(fields = fields.len(), "reusing cached keys");
            return Ok(Rc::clone(keys));
        }
        ensure_unique_names(fields, opts)?;
        let keys: Rc<[Key]> = fields.keys().into_iter().collect();
        self.entries.push((fields.clone(), Rc::clone(&keys)));
        Ok(keys)
    }
}

/// Convert `row`, building each field list's keys once
pub fn to_map(row: &Row, opts: ConvertOptions) -> Result<RowMap> {
    let mut cache = KeyCache::default();
    convert_row(row, opts, &mut cache)
}

fn convert_row(row: &Row, opts: ConvertOptions, cache: &mut KeyCache) -> Result<RowMap> {
    let fields = row.fields();
    let keys = cache.keys_for(fields, opts)?;

    let mut map = new_row_map(keys.len());
    for ((key, field), raw) in keys.iter().zip(fields).zip(row.raw_values()) {
        let value = match decode(raw, &field.field_type)? {
            Value::Row(nested) => Value::Map(convert_row(&nested, opts, cache)?),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Row(nested) => convert_row(&nested, opts, cache).map(Value::Map),
                        other => Ok(other),
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            other => other,
        };
        map.insert(key.clone(), value);
    }
    Ok(map)
}
