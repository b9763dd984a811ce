// SPDX-License-Identifier: MIT OR Apache-2.0
//! rowmap CLI binary - self-check and comparison table for row-to-map strategies

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rowmap_cli::alloc::CountingAllocator;
use rowmap_cli::check::{CheckReport, self_check};
use rowmap_cli::report::{Report, measure};
use rowmap_convert::{Strategy, fixtures};
use rowmap_core::{ConvertOptions, map_to_json};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator::new();

#[derive(Parser)]
#[command(name = "rowmap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Skip the duplicate field name check during conversion
    #[arg(long, global = true)]
    skip_dup_check: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for rowmap CLI
#[derive(Subcommand)]
enum Commands {
    /// Verify every strategy produces identical output
    Check {
        /// Row sizes to verify
        #[arg(long, value_delimiter = ',', default_values_t = fixtures::BENCH_SIZES)]
        sizes: Vec<usize>,
    },
    /// Measure throughput and allocations per strategy
    Bench {
        /// Row sizes to measure
        #[arg(long, value_delimiter = ',', default_values_t = fixtures::BENCH_SIZES)]
        sizes: Vec<usize>,
        /// Timed conversions per strategy and size
        #[arg(short = 'n', long, default_value_t = 10_000, value_parser = clap::value_parser!(u64).range(1..))]
        iterations: u64,
        /// Strategies to run (default: all)
        #[arg(long = "strategy")]
        strategies: Vec<Strategy>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print one converted sample row as JSON
    Show {
        /// Fields in the sample row
        #[arg(long, default_value_t = 5)]
        size: usize,
        /// Strategy used for the conversion
        #[arg(long, default_value_t = Strategy::Baseline)]
        strategy: Strategy,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let opts = ConvertOptions {
        skip_dup_check: args.skip_dup_check,
    };
    let result = match &args.command {
        Commands::Check { sizes } => Ok(run_check(sizes, opts)),
        Commands::Bench {
            sizes,
            iterations,
            strategies,
            format,
        } => run_bench(sizes, *iterations, strategies, *format, opts),
        Commands::Show { size, strategy } => run_show(*size, *strategy, opts),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the self-check and return whether it passed
fn print_check(report: &CheckReport, quiet: bool) -> bool {
    if !quiet {
        for line in &report.agreed {
            println!("{line}");
        }
    }
    if let Some(failure) = &report.failure {
        eprintln!("{failure}");
    }
    report.passed()
}

fn run_check(sizes: &[usize], opts: ConvertOptions) -> ExitCode {
    let report = self_check(sizes, &Strategy::ALL, opts);
    print_check(&report, false);
    ExitCode::from(report.status())
}

fn run_bench(
    sizes: &[usize],
    iterations: u64,
    strategies: &[Strategy],
    format: OutputFormat,
    opts: ConvertOptions,
) -> anyhow::Result<ExitCode> {
    let strategies = if strategies.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        strategies.to_vec()
    };

    let check = self_check(sizes, &Strategy::ALL, opts);
    if !print_check(&check, true) {
        return Ok(ExitCode::from(check.status()));
    }

    let mut report = Report::default();
    for &size in sizes {
        let row = fixtures::sample_row(size);
        for &strategy in &strategies {
            let m = measure(strategy, &row, opts, iterations, &ALLOC)
                .with_context(|| format!("{strategy} failed on a {size}-field row"))?;
            info!(
                %strategy,
                size,
                ns_per_op = m.ns_per_op(),
                allocs_per_op = m.allocs_per_op(),
                "measured"
            );
            report.push(m);
        }
    }

    match format {
        OutputFormat::Table => print!("{}", report.render_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn run_show(size: usize, strategy: Strategy, opts: ConvertOptions) -> anyhow::Result<ExitCode> {
    let row = fixtures::sample_row(size);
    let map = strategy
        .convert(&row, opts)
        .with_context(|| format!("{strategy} failed on a {size}-field row"))?;
    println!("{}", serde_json::to_string_pretty(&map_to_json(&map))?);
    Ok(ExitCode::SUCCESS)
}
