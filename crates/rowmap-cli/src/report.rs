// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wall-clock measurement and the comparison table

use crate::alloc::{AllocSnapshot, CountingAllocator};
use rowmap_convert::Strategy;
use rowmap_core::{ConvertError, ConvertOptions, Row};
use serde::Serialize;
use std::fmt::Write as _;
use std::hint::black_box;
use std::time::Instant;

/// Throughput and allocations of one strategy on one row size
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    /// Strategy name
    pub strategy: &'static str,
    /// Fields in the measured row
    pub size: usize,
    /// Timed conversions
    pub iterations: u64,
    /// Total time of the timed conversions
    pub elapsed_ns: u64,
    /// Allocations during the timed conversions
    pub allocs: AllocSnapshot,
}

impl Measurement {
    /// Conversions per second
    #[must_use]
    pub fn ops_per_sec(&self) -> f64 {
        if self.elapsed_ns == 0 {
            return f64::INFINITY;
        }
        self.iterations as f64 * 1e9 / self.elapsed_ns as f64
    }

    /// Nanoseconds per conversion
    #[must_use]
    pub fn ns_per_op(&self) -> f64 {
        self.per_op(self.elapsed_ns as f64)
    }

    /// Allocations per conversion
    #[must_use]
    pub fn allocs_per_op(&self) -> f64 {
        self.per_op(self.allocs.count as f64)
    }

    /// Bytes allocated per conversion
    #[must_use]
    pub fn bytes_per_op(&self) -> f64 {
        self.per_op(self.allocs.bytes as f64)
    }

    // zero when nothing was timed
    fn per_op(&self, total: f64) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        total / self.iterations as f64
    }
}

/// Time `iterations` conversions of `row` with `strategy`
///
/// A tenth of `iterations` (at least one) runs first as warm-up.
///
/// # Errors
///
/// Returns the conversion error if `row` does not convert.
pub fn measure(
    strategy: Strategy,
    row: &Row,
    opts: ConvertOptions,
    iterations: u64,
    counter: &CountingAllocator,
) -> Result<Measurement, ConvertError> {
    let convert = strategy.as_fn();
    for _ in 0..(iterations / 10).max(1) {
        black_box(convert(black_box(row), opts)?);
    }

    let before = counter.snapshot();
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(convert(black_box(row), opts)?);
    }
    let elapsed = start.elapsed();
    let allocs = counter.snapshot() - before;

    Ok(Measurement {
        strategy: strategy.name(),
        size: row.len(),
        iterations,
        elapsed_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
        allocs,
    })
}

/// Measurements for a set of strategies and sizes
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Measurements in run order
    pub measurements: Vec<Measurement>,
}

impl Report {
    /// Add a measurement
    pub fn push(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    /// Throughput of `m` relative to the baseline run at the same size
    ///
    /// `None` without a baseline run or when either rate is not a finite,
    /// positive number (e.g. zero timed iterations).
    #[must_use]
    pub fn speedup(&self, m: &Measurement) -> Option<f64> {
        let baseline = self
            .measurements
            .iter()
            .find(|b| b.size == m.size && b.strategy == Strategy::Baseline.name())?;
        let (rate, base) = (m.ops_per_sec(), baseline.ops_per_sec());
        let usable = |r: f64| r.is_finite() && r > 0.0;
        (usable(rate) && usable(base)).then(|| rate / base)
    }

    /// Fixed-width comparison table, one line per measurement
    #[must_use]
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<12} {:>5} {:>14} {:>10} {:>10} {:>10} {:>8}",
            "strategy", "size", "ops/sec", "ns/op", "allocs/op", "bytes/op", "speedup"
        );
        for m in &self.measurements {
            let speedup = self
                .speedup(m)
                .map_or_else(|| "-".to_string(), |s| format!("{s:.2}x"));
            let _ = writeln!(
                out,
                "{:<12} {:>5} {:>14.0} {:>10.1} {:>10.1} {:>10.1} {:>8}",
                m.strategy,
                m.size,
                m.ops_per_sec(),
                m.ns_per_op(),
                m.allocs_per_op(),
                m.bytes_per_op(),
                speedup
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_convert::fixtures;

    fn measurement(strategy: Strategy, size: usize, elapsed_ns: u64) -> Measurement {
        Measurement {
            strategy: strategy.name(),
            size,
            iterations: 1000,
            elapsed_ns,
            allocs: AllocSnapshot {
                count: 5000,
                bytes: 64_000,
            },
        }
    }

    #[test]
    fn test_rates() {
        let m = measurement(Strategy::Baseline, 5, 2_000_000);
        assert!((m.ops_per_sec() - 500_000.0).abs() < 1e-6);
        assert!((m.ns_per_op() - 2000.0).abs() < 1e-9);
        assert!((m.allocs_per_op() - 5.0).abs() < 1e-9);
        assert!((m.bytes_per_op() - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_speedup_against_same_size_baseline() {
        let mut report = Report::default();
        report.push(measurement(Strategy::Baseline, 5, 2_000_000));
        report.push(measurement(Strategy::Baseline, 10, 4_000_000));
        report.push(measurement(Strategy::Inlined, 5, 1_000_000));
        report.push(measurement(Strategy::Indexed, 20, 1_000_000));

        let inlined = &report.measurements[2];
        assert!((report.speedup(inlined).unwrap() - 2.0).abs() < 1e-9);
        assert!(report.speedup(&report.measurements[3]).is_none());
    }

    #[test]
    fn test_speedup_without_timed_iterations() {
        let mut report = Report::default();
        let mut idle = measurement(Strategy::Baseline, 5, 139);
        idle.iterations = 0;
        report.push(idle);
        report.push(measurement(Strategy::Inlined, 5, 1_000_000));

        assert!(report.speedup(&report.measurements[0]).is_none());
        assert!(report.speedup(&report.measurements[1]).is_none());
        assert!(report.measurements[0].ns_per_op().abs() < f64::EPSILON);
        let table = report.render_table();
        assert!(!table.contains("NaN"));
        assert!(!table.contains("inf"));
    }

    #[test]
    fn test_table_lines() {
        let mut report = Report::default();
        report.push(measurement(Strategy::Baseline, 5, 2_000_000));
        report.push(measurement(Strategy::CachedKeys, 5, 1_000_000));
        let table = report.render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("strategy"));
        assert!(lines[1].starts_with("baseline"));
        assert!(lines[1].ends_with("1.00x"));
        assert!(lines[2].starts_with("cached_keys"));
        assert!(lines[2].ends_with("2.00x"));
    }

    #[test]
    fn test_measure_runs_conversion() {
        let counter = CountingAllocator::new();
        let row = fixtures::sample_row(5);
        let m = measure(
            Strategy::Functional,
            &row,
            ConvertOptions::default(),
            20,
            &counter,
        )
        .unwrap();
        assert_eq!(m.strategy, "functional");
        assert_eq!(m.size, 5);
        assert_eq!(m.iterations, 20);
        // not registered as the global allocator
        assert_eq!(m.allocs, AllocSnapshot::default());
    }

    #[test]
    fn test_measure_propagates_error() {
        let counter = CountingAllocator::new();
        let row = fixtures::duplicate_row();
        let err = measure(
            Strategy::Baseline,
            &row,
            ConvertOptions::default(),
            10,
            &counter,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::DuplicateFieldName { .. }));
    }
}
