//! Sweep and runner configuration.
//!
//! The engine never parses anything: the embedding program builds these
//! values (the `sdot-bench` binary does it from command-line flags).

use crate::error::{BenchError, Result};

/// Sizes to sweep and how many timed cycles to run per size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    /// Vector lengths, tested in this order
    pub sizes: Vec<usize>,
    /// Timed repetitions per (kernel, size)
    pub cycles: usize,
}

impl SweepConfig {
    pub fn new(sizes: Vec<usize>, cycles: usize) -> Self {
        Self { sizes, cycles }
    }

    /// Powers of two `2^lo ..= 2^hi`.
    pub fn powers_of_two(lo: u32, hi: u32, cycles: usize) -> Result<Self> {
        if lo > hi || hi >= usize::BITS {
            return Err(BenchError::Config(format!(
                "invalid exponent range {lo}..={hi}"
            )));
        }
        Ok(Self::new((lo..=hi).map(|e| 1usize << e).collect(), cycles))
    }

    /// Check the invariants: at least one size, every size > 0 and listed
    /// once, cycles >= 1.
    pub fn validate(&self) -> Result<()> {
        if self.cycles == 0 {
            return Err(BenchError::Config("cycle count must be >= 1".into()));
        }
        if self.sizes.is_empty() {
            return Err(BenchError::Config("sweep has no sizes".into()));
        }
        if let Some(index) = self.sizes.iter().position(|&s| s == 0) {
            return Err(BenchError::Config(format!(
                "size at position {index} must be > 0"
            )));
        }
        for (index, size) in self.sizes.iter().enumerate() {
            if self.sizes[..index].contains(size) {
                return Err(BenchError::Config(format!(
                    "size {size} is listed more than once (position {index})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SweepConfig {
    /// 2^16 ..= 2^24 elements, 10 cycles
    fn default() -> Self {
        Self::new((16..=24).map(|e| 1usize << e).collect(), 10)
    }
}

/// Where the input generator's seed comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeedMode {
    /// Deterministic inputs, reproducible across runs
    Fixed(u64),
    /// Seed from the system clock; the resolved value is reported
    #[default]
    TimeDerived,
}

impl SeedMode {
    /// The concrete seed for this run.
    pub fn resolve(self) -> u64 {
        match self {
            SeedMode::Fixed(seed) => seed,
            SeedMode::TimeDerived => crate::utils::time_seed(),
        }
    }
}

/// How vector elements are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillPolicy {
    /// Uniform over `[low, high)`
    Uniform { low: f32, high: f32 },
    /// Non-negative 31-bit integers scaled by 1/5
    FullRange,
    /// All zeros. Normalizing this input is degenerate.
    Zeros,
}

impl Default for FillPolicy {
    fn default() -> Self {
        FillPolicy::Uniform {
            low: 0.0,
            high: 100.0,
        }
    }
}

impl FillPolicy {
    pub fn validate(&self) -> Result<()> {
        match *self {
            FillPolicy::Uniform { low, high }
                if !(low.is_finite() && high.is_finite() && low < high) =>
            {
                Err(BenchError::Config(format!(
                    "uniform fill needs finite low < high, got [{low}, {high})"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Order in which kernels are invoked across cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Schedule {
    /// Every cycle runs all kernels in registry order
    #[default]
    Interleaved,
    /// Each kernel runs all of its cycles before the next kernel starts
    Blocked,
}

/// Runner settings that are not part of the sweep itself.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    pub schedule: Schedule,
    /// Untimed kernel calls per size before the first timed cycle
    pub warmup: usize,
    /// Pin the measuring thread to its current core for the whole sweep
    pub pin_cpu: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            schedule: Schedule::default(),
            warmup: 0,
            pin_cpu: false,
        }
    }
}
