//! Utility modules for measurement.

pub mod cpu_affinity;
pub mod stats;
pub mod timer;

// Re-export commonly used items
pub use cpu_affinity::CpuPinGuard;
pub use stats::{reduce, relative_error, AggregateStats};
pub use timer::{Timer, TimerHandle};

/// C compiler name detected at build time
pub const C_COMPILER_NAME: Option<&str> = option_env!("C_COMPILER_NAME");

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}
