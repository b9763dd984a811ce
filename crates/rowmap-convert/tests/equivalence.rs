// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property tests: every strategy agrees with the reference conversion

use proptest::prelude::*;
use rowmap_convert::{Strategy as Conversion, fixtures, outcomes_agree, verify};
use rowmap_core::{
    ConvertError, ConvertOptions, Field, FieldType, Fields, Key, RawValue, Row, TypeCode, Value,
    maps_identical,
};
use serde_json::json;

const NAMES: [&str; 5] = ["a", "b", "c", "id", ""];

fn arb_name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES.to_vec()).prop_map(str::to_string)
}

fn arb_type() -> impl Strategy<Value = FieldType> {
    let leaf = prop::sample::select(TypeCode::ALL.to_vec()).prop_map(FieldType::Scalar);
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(FieldType::array),
            prop::collection::vec((arb_name(), inner), 1..4).prop_map(|pairs| {
                FieldType::Struct(
                    pairs
                        .into_iter()
                        .map(|(name, ty)| Field::new(name, ty))
                        .collect(),
                )
            }),
        ]
    })
}

fn arb_scalar(code: TypeCode) -> BoxedStrategy<RawValue> {
    match code {
        TypeCode::Bool => any::<bool>().prop_map(|b| json!(b)).boxed(),
        TypeCode::Int64 => any::<i64>().prop_map(|i| json!(i.to_string())).boxed(),
        TypeCode::Float64 => (-1.0e9..1.0e9f64).prop_map(|f| json!(f)).boxed(),
        TypeCode::String => "[a-z ]{0,8}".prop_map(|s| json!(s)).boxed(),
        TypeCode::Bytes => prop::sample::select(vec!["", "aGk=", "cm93bWFw"])
            .prop_map(|s| json!(s))
            .boxed(),
        TypeCode::Timestamp => (0u32..60)
            .prop_map(|s| json!(format!("2024-03-01T12:00:{s:02}Z")))
            .boxed(),
        TypeCode::Date => (1u32..=28)
            .prop_map(|d| json!(format!("2024-02-{d:02}")))
            .boxed(),
        TypeCode::Numeric => any::<i32>().prop_map(|n| json!(format!("{n}.5"))).boxed(),
        TypeCode::Json => prop::sample::select(vec!["null", "[1,2]", r#"{"k":"v"}"#])
            .prop_map(|s| json!(s))
            .boxed(),
    }
}

fn arb_raw(ty: &FieldType) -> BoxedStrategy<RawValue> {
    let value = match ty {
        FieldType::Scalar(code) => arb_scalar(*code),
        FieldType::Array(element) => prop::collection::vec(arb_raw(element), 0..4)
            .prop_map(RawValue::Array)
            .boxed(),
        FieldType::Struct(fields) => fields
            .iter()
            .map(|f| arb_raw(&f.field_type))
            .collect::<Vec<_>>()
            .prop_map(RawValue::Array)
            .boxed(),
    };
    prop_oneof![1 => Just(RawValue::Null), 5 => value].boxed()
}

fn arb_row() -> impl Strategy<Value = Row> {
    prop::collection::vec((arb_name(), arb_type()), 0..8).prop_flat_map(|pairs| {
        let fields: Fields = pairs
            .into_iter()
            .map(|(name, ty)| Field::new(name, ty))
            .collect();
        let values = fields
            .iter()
            .map(|f| arb_raw(&f.field_type))
            .collect::<Vec<_>>();
        (Just(fields), values).prop_map(|(fields, values)| {
            Row::new(fields, values).expect("generated values match field count")
        })
    })
}

fn has_nested_duplicates(ty: &FieldType) -> bool {
    match ty {
        FieldType::Scalar(_) => false,
        FieldType::Array(element) => has_nested_duplicates(element),
        FieldType::Struct(fields) => {
            fields.has_duplicate_names()
                || fields.iter().any(|f| has_nested_duplicates(&f.field_type))
        }
    }
}

proptest! {
    #[test]
    fn prop_strategies_agree(row in arb_row(), skip in any::<bool>()) {
        let opts = ConvertOptions { skip_dup_check: skip };
        if let Err(disagreement) = verify(&row, opts) {
            return Err(TestCaseError::fail(disagreement.to_string()));
        }
    }

    #[test]
    fn prop_unique_names_give_one_entry_per_field(row in arb_row()) {
        prop_assume!(!row.fields().has_duplicate_names());
        prop_assume!(!row.fields().iter().any(|f| has_nested_duplicates(&f.field_type)));
        for strategy in Conversion::ALL {
            let map = strategy.convert(&row, ConvertOptions::default()).unwrap();
            prop_assert_eq!(map.len(), row.len());
            let keys: Vec<Key> = map.keys().cloned().collect();
            prop_assert_eq!(keys, row.keys().to_vec());
        }
    }

    #[test]
    fn prop_duplicates_rejected_unless_skipped(row in arb_row()) {
        prop_assume!(row.fields().has_duplicate_names());
        for strategy in Conversion::ALL {
            let err = strategy.convert(&row, ConvertOptions::default()).unwrap_err();
            let is_duplicate = matches!(err, ConvertError::DuplicateFieldName { .. });
            prop_assert!(is_duplicate);
        }
        let map = row.to_map(ConvertOptions::skip_dup_check()).unwrap();
        let distinct: std::collections::HashSet<Key> = row.keys().into_iter().collect();
        prop_assert_eq!(map.len(), distinct.len());
    }

    #[test]
    fn prop_conversion_is_deterministic(row in arb_row()) {
        let opts = ConvertOptions::skip_dup_check();
        for strategy in Conversion::ALL {
            let first = strategy.convert(&row, opts);
            let second = strategy.convert(&row, opts);
            prop_assert!(outcomes_agree(&first, &second));
        }
    }

    #[test]
    fn prop_values_match_independent_decode(row in arb_row()) {
        let opts = ConvertOptions::skip_dup_check();
        prop_assume!(!row.fields().has_duplicate_names());
        let map = row.to_map(opts).unwrap();
        let decoded = row.to_vec().unwrap();
        for ((key, converted), value) in map.iter().zip(decoded) {
            match value {
                Value::Row(nested) => {
                    let expected = nested.to_map(opts).unwrap();
                    prop_assert!(maps_identical(converted.as_map().unwrap(), &expected), "key {}", key);
                }
                Value::Array(items) if items.iter().any(|v| v.as_row().is_some()) => {
                    let Value::Array(converted) = converted else {
                        return Err(TestCaseError::fail("array lost"));
                    };
                    prop_assert_eq!(converted.len(), items.len());
                    for (c, item) in converted.iter().zip(items) {
                        prop_assert!(c.as_row().is_none());
                        match item {
                            Value::Row(nested) => {
                                let expected = nested.to_map(opts).unwrap();
                                prop_assert!(maps_identical(c.as_map().unwrap(), &expected));
                            }
                            other => prop_assert_eq!(c, &other),
                        }
                    }
                }
                other => prop_assert_eq!(converted, &other),
            }
        }
    }
}

#[test]
fn test_duplicate_name_example() {
    let row = fixtures::duplicate_row();
    for strategy in Conversion::ALL {
        assert_eq!(
            strategy.convert(&row, ConvertOptions::default()),
            Err(ConvertError::DuplicateFieldName {
                name: "a".to_string()
            }),
            "{strategy}"
        );
        let map = strategy
            .convert(&row, ConvertOptions::skip_dup_check())
            .unwrap();
        let entries: Vec<_> = map.into_iter().collect();
        assert_eq!(
            entries,
            vec![
                (Key::from("a"), Value::from("z")),
                (Key::Index(1), Value::from("y")),
            ],
            "{strategy}"
        );
    }
}

#[test]
fn test_decode_errors_agree() {
    let inner = Fields::new(vec![
        Field::new("n", TypeCode::Int64),
        Field::new("m", TypeCode::Int64),
    ]);
    let ty = FieldType::array(FieldType::Struct(inner));
    // element 0 fails inside, element 1 has the wrong arity
    let row = Row::from_pairs(vec![(Field::new("s", ty), json!([["x", "1"], ["2"]]))]);
    let expected = Err(ConvertError::ArityMismatch {
        fields: 2,
        values: 1,
    });
    for strategy in Conversion::ALL {
        assert_eq!(
            strategy.convert(&row, ConvertOptions::default()),
            expected,
            "{strategy}"
        );
    }
}

#[test]
fn test_struct_array_cache_matches_baseline() {
    let row = fixtures::struct_array_row(64);
    let baseline = row.to_map(ConvertOptions::default()).unwrap();
    let cached = Conversion::CachedKeys
        .convert(&row, ConvertOptions::default())
        .unwrap();
    assert!(maps_identical(&baseline, &cached));
}

#[test]
fn test_rows_inside_inner_arrays_agree() {
    let inner = Fields::new(vec![Field::new("n", TypeCode::Int64)]);
    let ty = FieldType::array(FieldType::array(FieldType::Struct(inner)));
    let row = Row::from_pairs(vec![(Field::new("g", ty), json!([[["7"]]]))]);
    let baseline = row.to_map(ConvertOptions::default()).unwrap();
    for strategy in Conversion::ALL {
        let map = strategy.convert(&row, ConvertOptions::default()).unwrap();
        assert!(maps_identical(&baseline, &map), "{strategy}");
        let Value::Array(outer) = &map[&Key::from("g")] else {
            panic!("{strategy}: expected array");
        };
        let Value::Array(items) = &outer[0] else {
            panic!("{strategy}: expected inner array");
        };
        assert!(items[0].as_row().is_some(), "{strategy}");
    }
}
