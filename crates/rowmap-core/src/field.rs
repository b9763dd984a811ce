// SPDX-License-Identifier: MIT OR Apache-2.0
//! Field descriptors
//!
//! A [`Fields`] list is reference counted. Every element of an array of
//! structs points at the same list, which lets converters recognise
//! siblings with [`Fields::ptr_eq`].

use crate::symbol::intern;
use crate::types::FieldType;
use crate::value::Key;
use ahash::AHashSet;
use smallvec::SmallVec;
use std::ops::Index;
use std::sync::Arc;

/// Name and type of one slot in a row
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name; empty when the field is unnamed
    pub name: String,
    /// Declared type
    pub field_type: FieldType,
}

impl Field {
    /// Named field
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// Unnamed field, keyed by position
    pub fn unnamed(field_type: impl Into<FieldType>) -> Self {
        Self::new(String::new(), field_type)
    }

    /// Map key for this field at position `index`
    #[must_use]
    pub fn key(&self, index: usize) -> Key {
        if self.name.is_empty() {
            Key::Index(index)
        } else {
            Key::Name(intern(&self.name))
        }
    }
}

/// Keys for a field list, inline for typical row widths
pub type KeyBuf = SmallVec<[Key; 16]>;

/// Shared, ordered list of field descriptors
#[derive(Debug, Clone, Default)]
pub struct Fields(Arc<[Field]>);

impl Fields {
    /// Build a field list
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self(fields.into())
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in order
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.0.iter()
    }

    /// Fields as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Field] {
        &self.0
    }

    /// Field names in order, empty for unnamed fields
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|f| f.name.as_str())
    }

    /// Map keys in field order
    #[must_use]
    pub fn keys(&self) -> KeyBuf {
        self.0
            .iter()
            .enumerate()
            .map(|(i, f)| f.key(i))
            .collect()
    }

    /// Position of the first field called `name`
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.0.iter().position(|f| f.name == name)
    }

    /// First non-empty name that appears more than once
    #[must_use]
    pub fn first_duplicate_name(&self) -> Option<&str> {
        let mut seen = AHashSet::with_capacity(self.0.len());
        self.names()
            .filter(|name| !name.is_empty())
            .find(|name| !seen.insert(*name))
    }

    /// Whether any two fields share a non-empty name
    #[must_use]
    pub fn has_duplicate_names(&self) -> bool {
        self.first_duplicate_name().is_some()
    }

    /// Whether both lists are the same allocation
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Fields {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Index<usize> for Fields {
    type Output = Field;

    fn index(&self, index: usize) -> &Field {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeCode;

    fn fields(names: &[&str]) -> Fields {
        names
            .iter()
            .map(|n| Field::new(*n, TypeCode::String))
            .collect()
    }

    #[test]
    fn test_duplicate_names_detected() {
        let f = fields(&["a", "b", "a"]);
        assert!(f.has_duplicate_names());
        assert_eq!(f.first_duplicate_name(), Some("a"));
    }

    #[test]
    fn test_empty_names_never_collide() {
        let f = fields(&["", "x", ""]);
        assert!(!f.has_duplicate_names());
    }

    #[test]
    fn test_keys_use_index_for_unnamed() {
        let f = fields(&["a", "", "c"]);
        let keys = f.keys();
        assert_eq!(keys[0], Key::Name(intern("a")));
        assert_eq!(keys[1], Key::Index(1));
        assert_eq!(keys[2], Key::Name(intern("c")));
    }

    #[test]
    fn test_index_of() {
        let f = fields(&["a", "", "b", "b"]);
        assert_eq!(f.index_of("b"), Some(2));
        assert_eq!(f.index_of(""), None);
        assert_eq!(f.index_of("z"), None);
    }

    #[test]
    fn test_clone_shares_allocation() {
        let f = fields(&["a"]);
        let g = f.clone();
        assert!(f.ptr_eq(&g));
        assert_eq!(f, fields(&["a"]));
        assert!(!f.ptr_eq(&fields(&["a"])));
    }
}
