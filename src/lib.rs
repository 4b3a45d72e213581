//! # SDOT Bench
//!
//! Micro-benchmark harness comparing interchangeable single-precision dot
//! product kernels over large vectors.
//!
//! ```no_run
//! use sdot_bench::prelude::*;
//!
//! let factory = VectorFactory::new(SeedMode::Fixed(42), FillPolicy::default());
//! let mut runner = BenchmarkRunner::new(build_registry(), factory, RunnerConfig::default());
//! let report = runner.run(&SweepConfig::new(vec![1 << 16, 1 << 20], 10)).unwrap();
//! for size in &report.sizes {
//!     for k in size.kernels() {
//!         println!("{} {} {:.3e} ± {:.1e}", size.size, k.kernel, k.stats.mean, k.stats.std_dev);
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod kernels;
pub mod logging;
pub mod registry;
pub mod report;
pub mod runner;
pub mod sanity;
pub mod tui;
pub mod utils;
pub mod vector;

pub use error::{BenchError, Result};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::config::{FillPolicy, RunnerConfig, Schedule, SeedMode, SweepConfig};
    pub use crate::error::{BenchError, Result};
    pub use crate::registry::{build_registry, Kernel, KernelRegistry, KernelVariant};
    pub use crate::report::{
        CsvSink, KernelStats, ReportSink, Sample, SizeOutcome, SizeReport, SweepReport,
    };
    pub use crate::runner::BenchmarkRunner;
    pub use crate::sanity::{run_sanity_check, SanityReport};
    pub use crate::utils::stats::{reduce, AggregateStats};
    pub use crate::utils::timer::{Timer, TimerHandle};
    pub use crate::vector::{Vector, VectorFactory};
}

#[cfg(test)]
mod tests {
    use crate::registry::build_registry;
    use crate::sanity::run_sanity_check;

    #[test]
    fn test_all_kernels_registry_verify() {
        let registry = build_registry();
        let report = run_sanity_check(&registry, 0xC0FFEE).unwrap();

        println!("Verifying {} kernels...", registry.len());

        let failure = report.failures().next();
        if let Some((case, check)) = failure {
            panic!(
                "  ❌ Kernel '{}' failed '{}': expected {}, got {}",
                check.kernel, case.case, case.expected, check.value
            );
        }
        assert!(report.passed());
    }
}
