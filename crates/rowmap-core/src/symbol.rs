// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interned field names
//!
//! Field names become map keys. Interning hands out one shared allocation
//! per distinct name, so building a key is a reference-count bump once a
//! name has been seen.

use dashmap::DashMap;
use std::borrow::Borrow;
use std::fmt;
use std::sync::{Arc, LazyLock};

static INTERNER: LazyLock<DashMap<Arc<str>, (), ahash::RandomState>> =
    LazyLock::new(|| DashMap::with_hasher(ahash::RandomState::new()));

/// An interned name
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// The name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether both symbols share one allocation
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Intern `name`, returning the shared symbol for it
#[must_use]
pub fn intern(name: &str) -> Symbol {
    if let Some(entry) = INTERNER.get(name) {
        return Symbol(Arc::clone(entry.key()));
    }
    let entry = INTERNER.entry(Arc::from(name)).or_insert(());
    Symbol(Arc::clone(entry.key()))
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        intern(name)
    }
}
