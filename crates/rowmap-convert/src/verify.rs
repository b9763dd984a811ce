// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cross-strategy verification

use crate::strategy::Strategy;
use rowmap_core::{ConvertError, ConvertOptions, Row, RowMap, map_to_json, maps_identical};
use std::fmt;
use tracing::debug;

/// Result of one conversion
pub type Outcome = Result<RowMap, ConvertError>;

/// Two strategies produced different outcomes for the same row
#[derive(Debug)]
pub struct Disagreement {
    /// Strategy whose outcome is taken as reference
    pub expected_strategy: Strategy,
    /// Reference outcome
    pub expected: Outcome,
    /// Strategy that disagreed
    pub actual_strategy: Strategy,
    /// Disagreeing outcome
    pub actual: Outcome,
}

impl fmt::Display for Disagreement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} and {} disagree",
            self.expected_strategy, self.actual_strategy
        )?;
        writeln!(f, "  {}: {}", self.expected_strategy, render(&self.expected))?;
        write!(f, "  {}: {}", self.actual_strategy, render(&self.actual))
    }
}

impl std::error::Error for Disagreement {}

fn render(outcome: &Outcome) -> String {
    match outcome {
        Ok(map) => map_to_json(map).to_string(),
        Err(e) => format!("error: {e}"),
    }
}

/// Whether two outcomes match: equal maps in identical key order, or equal errors
#[must_use]
pub fn outcomes_agree(a: &Outcome, b: &Outcome) -> bool {
    match (a, b) {
        (Ok(a), Ok(b)) => maps_identical(a, b),
        (Err(a), Err(b)) => a == b,
        _ => false,
    }
}

/// Run every strategy on `row` and return the agreed outcome
///
/// # Errors
///
/// Returns the first [`Disagreement`] against [`Strategy::Baseline`].
pub fn verify(row: &Row, opts: ConvertOptions) -> Result<Outcome, Box<Disagreement>> {
    verify_with(&Strategy::ALL, row, opts)
}

/// Run `strategies` on `row`; the first one is the reference
///
/// An empty list agrees trivially and yields the baseline outcome.
///
/// # Errors
///
/// Returns the first [`Disagreement`] against the reference strategy.
pub fn verify_with(
    strategies: &[Strategy],
    row: &Row,
    opts: ConvertOptions,
) -> Result<Outcome, Box<Disagreement>> {
    let Some((&reference, rest)) = strategies.split_first() else {
        return Ok(row.to_map(opts));
    };
    let expected = reference.convert(row, opts);

    for &strategy in rest {
        let actual = strategy.convert(row, opts);
        if !outcomes_agree(&expected, &actual) {
            debug!(%reference, %strategy, "strategies disagree");
            return Err(Box::new(Disagreement {
                expected_strategy: reference,
                expected,
                actual_strategy: strategy,
                actual,
            }));
        }
    }
    debug!(strategies = strategies.len(), fields = row.len(), "strategies agree");
    Ok(expected)
}
