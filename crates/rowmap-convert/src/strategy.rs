// SPDX-License-Identifier: MIT OR Apache-2.0
//! Strategy selection

use crate::{cached, functional, indexed, inlined};
use rowmap_core::{ConvertOptions, Result, Row, RowMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Signature shared by every conversion strategy
pub type ConvertFn = fn(&Row, ConvertOptions) -> Result<RowMap>;

/// A row-to-map conversion implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Reference conversion, [`Row::to_map`]
    Baseline,
    /// Explicit index loop
    Indexed,
    /// Keys and name validation cached per field list
    CachedKeys,
    /// Nested-row handling inlined on the declared type
    Inlined,
    /// Iterator pipeline
    Functional,
}

impl Strategy {
    /// Every strategy, reference first
    pub const ALL: [Self; 5] = [
        Self::Baseline,
        Self::Indexed,
        Self::CachedKeys,
        Self::Inlined,
        Self::Functional,
    ];

    /// Short name used on the command line and in reports
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Indexed => "indexed",
            Self::CachedKeys => "cached_keys",
            Self::Inlined => "inlined",
            Self::Functional => "functional",
        }
    }

    /// One-line description of the technique
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Baseline => "enumerate + zip, post-process decoded values",
            Self::Indexed => "explicit index loop",
            Self::CachedKeys => "keys cached per field list",
            Self::Inlined => "nested branches inlined on declared type",
            Self::Functional => "iterator pipeline collected into Result",
        }
    }

    /// Function pointer for this strategy
    #[must_use]
    pub fn as_fn(self) -> ConvertFn {
        match self {
            Self::Baseline => Row::to_map,
            Self::Indexed => indexed::to_map,
            Self::CachedKeys => cached::to_map,
            Self::Inlined => inlined::to_map,
            Self::Functional => functional::to_map,
        }
    }

    /// Convert `row` with this strategy
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::DuplicateFieldName`](rowmap_core::ConvertError::DuplicateFieldName)
    /// when names collide and `opts` does not skip the check, or a decode error.
    pub fn convert(self, row: &Row, opts: ConvertOptions) -> Result<RowMap> {
        (self.as_fn())(row, opts)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown strategy name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown strategy `{0}` (expected one of: baseline, indexed, cached_keys, inlined, functional)")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == normalized)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}
