// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed rows and the row-to-map conversion
//!
//! A [`Row`] pairs a shared field list with raw values of equal length.
//! [`Row::to_map`] is the reference conversion every alternative strategy is
//! measured and verified against.

use crate::decode::{RawValue, decode, decode_all};
use crate::error::{ConvertError, Result};
use crate::field::{Field, Fields, KeyBuf};
use crate::value::{Key, RowMap, Value, new_row_map};
use tracing::debug;

/// Options for row conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Skip the duplicate-name check; colliding names then keep the last value
    pub skip_dup_check: bool,
}

impl ConvertOptions {
    /// Options with duplicate checking disabled
    #[must_use]
    pub const fn skip_dup_check() -> Self {
        Self {
            skip_dup_check: true,
        }
    }
}

/// Ordered field descriptors paired with raw values
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    fields: Fields,
    values: Vec<RawValue>,
}

impl Row {
    /// Build a row
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::ArityMismatch`] if the lengths differ.
    pub fn new(fields: Fields, values: Vec<RawValue>) -> Result<Self> {
        if fields.len() != values.len() {
            return Err(ConvertError::ArityMismatch {
                fields: fields.len(),
                values: values.len(),
            });
        }
        Ok(Self { fields, values })
    }

    /// Build a row from (field, value) pairs
    #[must_use]
    pub fn from_pairs(pairs: Vec<(Field, RawValue)>) -> Self {
        let (fields, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self {
            fields: Fields::new(fields),
            values,
        }
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field descriptors
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Raw values in field order
    #[must_use]
    pub fn raw_values(&self) -> &[RawValue] {
        &self.values
    }

    /// Map keys in field order
    #[must_use]
    pub fn keys(&self) -> KeyBuf {
        self.fields.keys()
    }

    /// Decode every value in field order, leaving nested rows as rows
    ///
    /// # Errors
    ///
    /// Returns an error if any value fails to decode.
    pub fn to_vec(&self) -> Result<Vec<Value>> {
        decode_all(&self.fields, &self.values)
    }

    /// Decode the value under `key`
    ///
    /// Names resolve to the first field carrying them; indexes resolve by
    /// position.
    ///
    /// # Errors
    ///
    /// Returns an error if the value fails to decode.
    pub fn get(&self, key: &Key) -> Result<Option<Value>> {
        let index = match key {
            Key::Name(name) => self.fields.index_of(name.as_str()),
            Key::Index(i) => (*i < self.len()).then_some(*i),
        };
        index
            .map(|i| decode(&self.values[i], &self.fields[i].field_type))
            .transpose()
    }

    /// Decode the value of the first field called `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the value fails to decode.
    pub fn get_by_name(&self, name: &str) -> Result<Option<Value>> {
        self.fields
            .index_of(name)
            .map(|i| decode(&self.values[i], &self.fields[i].field_type))
            .transpose()
    }

    /// Convert to a map keyed by field name, or by position for unnamed
    /// fields, converting nested rows recursively
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::DuplicateFieldName`] when two fields share a
    /// name and `opts` does not skip the check, or a decode error.
    pub fn to_map(&self, opts: ConvertOptions) -> Result<RowMap> {
        ensure_unique_names(&self.fields, opts)?;

        let mut map = new_row_map(self.len());
        for (i, (field, raw)) in self.fields.iter().zip(&self.values).enumerate() {
            let value = decode(raw, &field.field_type)?;
            map.insert(field.key(i), convert_value(value, opts)?);
        }
        Ok(map)
    }
}

/// Reject `fields` if two share a non-empty name, unless `opts` skips the check
///
/// # Errors
///
/// Returns [`ConvertError::DuplicateFieldName`] naming the first repeated name.
pub fn ensure_unique_names(fields: &Fields, opts: ConvertOptions) -> Result<()> {
    if opts.skip_dup_check {
        return Ok(());
    }
    if let Some(name) = fields.first_duplicate_name() {
        debug!(name, "rejecting row with duplicate field name");
        return Err(ConvertError::DuplicateFieldName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Replace nested rows in a decoded value with their maps
///
/// Array elements that are rows are converted; every other element is kept.
///
/// # Errors
///
/// Returns an error if a nested row fails to convert.
pub fn convert_value(value: Value, opts: ConvertOptions) -> Result<Value> {
    match value {
        Value::Row(row) => row.to_map(opts).map(Value::Map),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Row(row) => row.to_map(opts).map(Value::Map),
                other => Ok(other),
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::intern;
    use crate::types::{FieldType, TypeCode};
    use serde_json::json;

    fn string_field(name: &str) -> Field {
        Field::new(name, TypeCode::String)
    }

    fn duplicate_row() -> Row {
        Row::from_pairs(vec![
            (string_field("a"), json!("x")),
            (string_field(""), json!("y")),
            (string_field("a"), json!("z")),
        ])
    }

    #[test]
    fn test_new_checks_arity() {
        let fields = Fields::new(vec![string_field("a")]);
        assert_eq!(
            Row::new(fields, vec![]),
            Err(ConvertError::ArityMismatch {
                fields: 1,
                values: 0
            })
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = duplicate_row().to_map(ConvertOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ConvertError::DuplicateFieldName {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_names_last_wins_when_skipped() {
        let map = duplicate_row()
            .to_map(ConvertOptions::skip_dup_check())
            .unwrap();
        assert_eq!(map.len(), 2);
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries[0], (&Key::Name(intern("a")), &Value::from("z")));
        assert_eq!(entries[1], (&Key::Index(1), &Value::from("y")));
    }

    #[test]
    fn test_nested_struct_and_array_of_structs() {
        let inner = Fields::new(vec![
            Field::new("id", TypeCode::Int64),
            Field::unnamed(TypeCode::Bool),
        ]);
        let row = Row::from_pairs(vec![
            (
                Field::new("one", FieldType::Struct(inner.clone())),
                json!(["1", true]),
            ),
            (
                Field::new("many", FieldType::array(FieldType::Struct(inner))),
                json!([["2", false], null]),
            ),
            (
                Field::new("ints", FieldType::array(TypeCode::Int64.into())),
                json!(["3"]),
            ),
        ]);

        let map = row.to_map(ConvertOptions::default()).unwrap();
        let one = map[&Key::from("one")].as_map().unwrap();
        assert_eq!(one[&Key::from("id")], Value::Int64(1));
        assert_eq!(one[&Key::Index(1)], Value::Bool(true));

        let Value::Array(many) = &map[&Key::from("many")] else {
            panic!("expected array");
        };
        assert_eq!(many[0].as_map().unwrap()[&Key::from("id")], Value::Int64(2));
        assert_eq!(many[1], Value::Null);

        assert_eq!(
            map[&Key::from("ints")],
            Value::Array(vec![Value::Int64(3)])
        );
    }

    #[test]
    fn test_nested_duplicate_names_propagate_flag() {
        let inner = Fields::new(vec![string_field("k"), string_field("k")]);
        let row = Row::from_pairs(vec![(
            Field::new("s", FieldType::Struct(inner)),
            json!(["first", "second"]),
        )]);

        assert!(row.to_map(ConvertOptions::default()).is_err());
        let map = row.to_map(ConvertOptions::skip_dup_check()).unwrap();
        let nested = map[&Key::from("s")].as_map().unwrap();
        assert_eq!(nested[&Key::from("k")], Value::from("second"));
    }

    #[test]
    fn test_get_and_to_vec() {
        let row = duplicate_row();
        assert_eq!(row.get(&Key::from("a")).unwrap(), Some(Value::from("x")));
        assert_eq!(row.get(&Key::Index(2)).unwrap(), Some(Value::from("z")));
        assert_eq!(row.get(&Key::Index(3)).unwrap(), None);
        assert_eq!(row.get_by_name("missing").unwrap(), None);
        assert_eq!(
            row.to_vec().unwrap(),
            vec![Value::from("x"), Value::from("y"), Value::from("z")]
        );
    }

    #[test]
    fn test_rows_inside_inner_arrays_stay_rows() {
        let inner = Fields::new(vec![Field::new("n", TypeCode::Int64)]);
        let ty = FieldType::array(FieldType::array(FieldType::Struct(inner)));
        let row = Row::from_pairs(vec![(Field::new("g", ty), json!([[["7"]]]))]);

        let map = row.to_map(ConvertOptions::default()).unwrap();
        let Value::Array(outer) = &map[&Key::from("g")] else {
            panic!("expected array");
        };
        let Value::Array(inner) = &outer[0] else {
            panic!("expected inner array");
        };
        assert!(inner[0].as_row().is_some());
        assert!(inner[0].as_map().is_none());
    }

    #[test]
    fn test_empty_row() {
        let row = Row::from_pairs(vec![]);
        assert!(row.is_empty());
        assert!(row.to_map(ConvertOptions::default()).unwrap().is_empty());
    }
}
