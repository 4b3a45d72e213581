//! Command-line sweep over the built-in kernels.
//!
//! Usage:
//!   sdot-bench                          # 2^16..=2^24, 10 cycles, time-derived seed
//!   sdot-bench --exponents 16-30        # up to 2^30 elements (4 GiB per vector)
//!   sdot-bench --sizes 1000,50000 --cycles 30 --seed 7
//!   sdot-bench --list                   # List available kernels
//!   sdot-bench --sanity-only            # Correctness check only

use clap::{Parser, ValueEnum};
use sdot_bench::prelude::*;
use sdot_bench::{logging, tui};
use std::process::ExitCode;
use tracing::{error, warn};

#[derive(Parser, Debug)]
#[command(name = "sdot-bench")]
#[command(about = "Time and compare single-precision dot product kernels")]
struct Args {
    /// Comma-separated vector sizes (overrides --exponents)
    #[arg(long, value_delimiter = ',')]
    sizes: Vec<usize>,

    /// Power-of-two sweep as LO-HI, e.g. 16-24
    #[arg(long, default_value = "16-24", value_parser = parse_exponents)]
    exponents: (u32, u32),

    /// Timed cycles per kernel and size
    #[arg(long, default_value_t = 10)]
    cycles: usize,

    /// Fixed seed for reproducible inputs (default: time-derived)
    #[arg(long)]
    seed: Option<u64>,

    /// How vector elements are drawn
    #[arg(long, value_enum, default_value_t = Fill::Uniform)]
    fill: Fill,

    /// Kernel invocation order
    #[arg(long, value_enum, default_value_t = Order::Interleaved)]
    schedule: Order,

    /// Untimed calls per kernel before each size's timed cycles
    #[arg(long, default_value_t = 0)]
    warmup: usize,

    /// Pin the measuring thread to its current CPU core
    #[arg(long)]
    pin: bool,

    /// Refuse vectors longer than this many elements
    #[arg(long)]
    max_elements: Option<usize>,

    /// Only run these kernels (the reference always runs)
    #[arg(long, value_delimiter = ',')]
    kernels: Vec<String>,

    /// Export raw samples to a CSV file
    #[arg(long)]
    csv: Option<String>,

    /// List available kernels and exit
    #[arg(long, short)]
    list: bool,

    /// Run the correctness check and exit
    #[arg(long)]
    sanity_only: bool,

    /// Debug-level logging for this crate
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Fill {
    /// Uniform over [0, 100)
    Uniform,
    /// Non-negative 31-bit integers scaled by 1/5
    FullRange,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    Interleaved,
    Blocked,
}

fn parse_exponents(s: &str) -> std::result::Result<(u32, u32), String> {
    let (lo, hi) = s
        .split_once('-')
        .ok_or_else(|| format!("expected LO-HI, got '{s}'"))?;
    let lo = lo.trim().parse().map_err(|e| format!("bad LO: {e}"))?;
    let hi = hi.trim().parse().map_err(|e| format!("bad HI: {e}"))?;
    Ok((lo, hi))
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "sweep aborted");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether everything passed.
fn run(args: Args) -> sdot_bench::Result<bool> {
    let mut registry = build_registry();
    if !args.kernels.is_empty() {
        registry.retain_names(&args.kernels);
    }

    if args.list {
        tui::print_available_kernels(&registry);
        return Ok(true);
    }

    let sweep = if args.sizes.is_empty() {
        let (lo, hi) = args.exponents;
        SweepConfig::powers_of_two(lo, hi, args.cycles)?
    } else {
        SweepConfig::new(args.sizes.clone(), args.cycles)
    };
    sweep.validate()?;

    let seed_mode = args.seed.map_or(SeedMode::TimeDerived, SeedMode::Fixed);
    let fill = match args.fill {
        Fill::Uniform => FillPolicy::default(),
        Fill::FullRange => FillPolicy::FullRange,
    };
    let mut factory = VectorFactory::new(seed_mode, fill);
    if let Some(limit) = args.max_elements {
        factory = factory.with_element_limit(limit);
    }

    let mut table = tui::TableSink::new();
    tui::print_header();

    let sanity = run_sanity_check(&registry, factory.seed())?;
    table.sanity(&sanity)?;
    if let Err(e) = sanity.ensure_passed() {
        warn!(error = %e, "sanity check failed");
    }
    if args.sanity_only {
        return Ok(sanity.passed());
    }

    let config = RunnerConfig {
        schedule: match args.schedule {
            Order::Interleaved => Schedule::Interleaved,
            Order::Blocked => Schedule::Blocked,
        },
        warmup: args.warmup,
        pin_cpu: args.pin,
    };

    let mut runner = BenchmarkRunner::new(registry, factory, config);
    let report = runner.run_with_sink(&sweep, &mut table)?;

    if let Some(path) = args.csv.as_deref() {
        let mut csv = CsvSink::create(path)?;
        csv.sweep(&report)?;
        println!("  Raw samples exported to: {}", path);
    }

    println!("Note: speedup and relative error are against the first kernel ('reference').");
    Ok(sanity.passed() && report.all_succeeded())
}
