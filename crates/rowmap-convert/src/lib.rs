// SPDX-License-Identifier: MIT OR Apache-2.0
//! # Row-to-Map Conversion Strategies
//!
//! Functionally identical implementations of row-to-map conversion, kept
//! side by side so they can be verified against each other and benchmarked.
//!
//! | Strategy | Technique |
//! |----------|-----------|
//! | [`Strategy::Baseline`] | [`Row::to_map`](rowmap_core::Row::to_map): `enumerate` + `zip`, post-processes decoded values |
//! | [`Strategy::Indexed`] | explicit index loop |
//! | [`Strategy::CachedKeys`] | keys and name validation computed once per field list, shared by sibling rows |
//! | [`Strategy::Inlined`] | nested-row branches inlined on the declared type, no intermediate rows |
//! | [`Strategy::Functional`] | iterator pipeline collected into `Result` |
//!
//! [`verify`] runs every strategy on one row and reports the first
//! disagreement. [`fixtures`] builds the rows the benchmarks use.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

mod cached;
mod functional;
mod indexed;
mod inlined;
mod strategy;
mod verify;

/// Sample rows for verification and benchmarking
pub mod fixtures;

pub use strategy::{ConvertFn, ParseStrategyError, Strategy};
pub use verify::{Disagreement, Outcome, outcomes_agree, verify, verify_with};
