// SPDX-License-Identifier: MIT OR Apache-2.0
//! # rowmap-cli
//!
//! Command-line harness comparing row-to-map conversion strategies.
//!
//! ## Usage
//!
//! ```bash
//! # Verify every strategy produces identical output
//! rowmap check
//!
//! # Throughput and allocation table for the default row sizes
//! rowmap bench
//!
//! # Only two strategies, custom sizes, JSON output
//! rowmap bench --strategy baseline --strategy inlined --sizes 5,50 --format json
//!
//! # Print one converted sample row
//! rowmap show --size 10 --strategy cached_keys
//! ```
//!
//! ## Subcommands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Self-check: exit non-zero if any two strategies disagree |
//! | `bench` | Self-check, then ops/sec, ns/op, allocations/op, bytes/op per strategy and size |
//! | `show` | Pretty-print a converted sample row |

#![doc(html_root_url = "https://docs.rs/rowmap-cli/0.1.0")]
#![warn(missing_docs)]

/// Allocation counting global allocator
pub mod alloc;
/// Cross-strategy self-check run before measuring
pub mod check;
/// Wall-clock measurement and report rendering
pub mod report;

/// Re-export of rowmap-core for core types.
pub use rowmap_core as core;

/// Re-export of rowmap-convert for strategies.
pub use rowmap_convert as convert;
