// SPDX-License-Identifier: MIT OR Apache-2.0
//! Self-check: every strategy must agree before anything is measured
//!
//! [`self_check`] verifies the sample rows for each requested size, an
//! array-of-struct row, a deeply nested row, and the duplicate-name row with
//! the check both on and off. It stops at the first disagreement.

use rowmap_convert::{Disagreement, Outcome, Strategy, fixtures, verify_with};
use rowmap_core::{ConvertOptions, Row, map_to_json};
use tracing::debug;

/// Lines produced by a self-check run
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// One line per row on which every strategy agreed
    pub agreed: Vec<String>,
    /// The first disagreement, rendered with both results
    pub failure: Option<String>,
}

impl CheckReport {
    /// Whether every row agreed
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Process exit status: 0 when every row agreed, 1 otherwise
    #[must_use]
    pub fn status(&self) -> u8 {
        u8::from(!self.passed())
    }
}

/// Rows the self-check covers: sample rows per size plus nesting-heavy shapes
#[must_use]
pub fn check_rows(sizes: &[usize]) -> Vec<(String, Row)> {
    let mut rows: Vec<(String, Row)> = sizes
        .iter()
        .map(|&size| (format!("sample_{size}"), fixtures::sample_row(size)))
        .collect();
    rows.push(("struct_array_16".to_string(), fixtures::struct_array_row(16)));
    rows.push(("deep_8".to_string(), fixtures::deep_row(8)));
    rows
}

/// Verify `strategies` agree on every check row; the first is the reference
#[must_use]
pub fn self_check(sizes: &[usize], strategies: &[Strategy], opts: ConvertOptions) -> CheckReport {
    self_check_with(sizes, opts, |row, opts| verify_with(strategies, row, opts))
}

/// [`self_check`] with the verification step supplied by the caller
#[must_use]
pub fn self_check_with<F>(sizes: &[usize], opts: ConvertOptions, verify: F) -> CheckReport
where
    F: Fn(&Row, ConvertOptions) -> Result<Outcome, Box<Disagreement>>,
{
    let mut report = CheckReport::default();
    for (name, row) in check_rows(sizes) {
        match verify(&row, opts) {
            Ok(outcome) => {
                debug!(row = %name, ok = outcome.is_ok(), "verified");
                report.agreed.push(format!("{name}: strategies agree"));
            }
            Err(disagreement) => {
                report.failure = Some(format!("{name}: {disagreement}"));
                return report;
            }
        }
    }

    // the duplicate-name row must agree with the check on and off
    let row = fixtures::duplicate_row();
    for opts in [ConvertOptions::default(), ConvertOptions::skip_dup_check()] {
        match verify(&row, opts) {
            Ok(outcome) => {
                let shown = outcome.map_or_else(
                    |e| format!("error: {e}"),
                    |map| map_to_json(&map).to_string(),
                );
                report.agreed.push(format!(
                    "duplicate_names (skip_dup_check={}): strategies agree: {shown}",
                    opts.skip_dup_check
                ));
            }
            Err(disagreement) => {
                report.failure = Some(format!("duplicate_names: {disagreement}"));
                return report;
            }
        }
    }
    report
}
