//! Sweep orchestration.
//!
//! For each configured size the runner walks
//! `Idle -> VectorsAllocated -> VectorsPopulated -> Cycling -> VectorsFreed -> Idle`:
//! inputs are generated once per size outside any timed window, every kernel
//! is timed `cycles` times on the same pair, and the pair is dropped before
//! the next size so working sets never pile up. A size that aborts part way
//! is reported with the phase it reached and its phase is reset to `Idle`.
//!
//! Everything runs on the calling thread. The timer brackets the kernel call
//! and nothing else.

use crate::config::{RunnerConfig, Schedule, SweepConfig};
use crate::error::{BenchError, Result};
use crate::registry::{Kernel, KernelRegistry};
use crate::report::{KernelStats, ReportSink, Sample, SampleKey, SizeOutcome, SizeReport, SweepReport};
use crate::utils::cpu_affinity::CpuPinGuard;
use crate::utils::stats::reduce;
use crate::utils::timer::Timer;
use crate::vector::{Vector, VectorFactory};
use std::collections::BTreeMap;
use std::hint::black_box;
use tracing::{debug, info, warn};

/// Lifecycle of one size within a sweep
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizePhase {
    Idle,
    VectorsAllocated,
    VectorsPopulated,
    Cycling,
    VectorsFreed,
}

impl SizePhase {
    fn advance(&mut self, size: usize) {
        let next = match *self {
            SizePhase::Idle => SizePhase::VectorsAllocated,
            SizePhase::VectorsAllocated => SizePhase::VectorsPopulated,
            SizePhase::VectorsPopulated => SizePhase::Cycling,
            SizePhase::Cycling => SizePhase::VectorsFreed,
            SizePhase::VectorsFreed => SizePhase::Idle,
        };
        let from = *self;
        debug!(size, from = ?from, to = ?next, "size phase");
        *self = next;
    }

    /// Close out a size. The vectors are dropped by the time `run_size`
    /// returns, so any phase short of `Idle` passes through `VectorsFreed`.
    fn finish(&mut self, size: usize) {
        if *self == SizePhase::Idle {
            return;
        }
        if *self != SizePhase::VectorsFreed {
            let from = *self;
            debug!(size, from = ?from, to = ?SizePhase::VectorsFreed, "size phase");
            *self = SizePhase::VectorsFreed;
        }
        self.advance(size);
    }
}

/// Drives kernels from a registry over a size sweep.
pub struct BenchmarkRunner {
    registry: KernelRegistry,
    factory: VectorFactory,
    config: RunnerConfig,
}

impl BenchmarkRunner {
    pub fn new(registry: KernelRegistry, factory: VectorFactory, config: RunnerConfig) -> Self {
        Self {
            registry,
            factory,
            config,
        }
    }

    pub fn registry(&self) -> &KernelRegistry {
        &self.registry
    }

    pub fn factory(&self) -> &VectorFactory {
        &self.factory
    }

    /// Run the whole sweep.
    ///
    /// Configuration errors are returned. Per-size failures (allocation) are
    /// recorded in the report and the sweep moves on to the next size.
    pub fn run(&mut self, sweep: &SweepConfig) -> Result<SweepReport> {
        sweep.validate()?;
        self.factory.fill_policy().validate()?;
        if self.registry.is_empty() {
            return Err(BenchError::Config("no kernels registered".into()));
        }

        info!(
            seed = self.factory.seed(),
            fill = ?self.factory.fill_policy(),
            schedule = ?self.config.schedule,
            cycles = sweep.cycles,
            sizes = sweep.sizes.len(),
            kernels = ?self.registry.names(),
            "starting sweep"
        );

        let pin = self.config.pin_cpu.then(CpuPinGuard::new);
        if let Some(core) = pin.as_ref().and_then(CpuPinGuard::core_id) {
            info!(core, "pinned measurement thread");
        }

        let mut samples = BTreeMap::new();
        let mut sizes = Vec::with_capacity(sweep.sizes.len());

        for &size in &sweep.sizes {
            let mut phase = SizePhase::Idle;
            let outcome = match self.run_size(size, sweep.cycles, &mut samples, &mut phase) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(size, phase = ?phase, error = %e, "size aborted, continuing sweep");
                    SizeOutcome::Failed(e)
                }
            };
            phase.finish(size);
            sizes.push(SizeReport { size, outcome });
        }

        Ok(SweepReport {
            seed: self.factory.seed(),
            fill: self.factory.fill_policy(),
            schedule: self.config.schedule,
            cycles: sweep.cycles,
            sizes,
            samples,
        })
    }

    /// [`run`](Self::run), then hand the report to `sink`.
    pub fn run_with_sink(
        &mut self,
        sweep: &SweepConfig,
        sink: &mut dyn ReportSink,
    ) -> Result<SweepReport> {
        let report = self.run(sweep)?;
        sink.sweep(&report)?;
        Ok(report)
    }

    fn run_size(
        &mut self,
        size: usize,
        cycles: usize,
        book: &mut BTreeMap<SampleKey, Vec<Sample>>,
        phase: &mut SizePhase,
    ) -> Result<SizeOutcome> {
        info!(size, "measuring size");

        let mut a = self.factory.allocate(size)?;
        let mut b = self.factory.allocate(size)?;
        phase.advance(size);

        self.factory.populate(&mut a);
        self.factory.populate(&mut b);
        let norm_a = VectorFactory::normalize(&mut a);
        let norm_b = VectorFactory::normalize(&mut b);
        let degenerate_input = norm_a.degenerate || norm_b.degenerate;
        if degenerate_input {
            warn!(
                size,
                norm_a = norm_a.norm,
                norm_b = norm_b.norm,
                "{}",
                BenchError::DegenerateInput { size }
            );
        }
        phase.advance(size);

        self.warmup(size, &a, &b);
        phase.advance(size);

        let kernels = self.registry.all();
        let series = match self.config.schedule {
            Schedule::Interleaved => interleaved(kernels, size, cycles, &a, &b),
            Schedule::Blocked => blocked(kernels, size, cycles, &a, &b),
        };

        let mut stats = Vec::with_capacity(series.len());
        for (kernel, (samples, result)) in kernels.iter().zip(series) {
            let times: Vec<f64> = samples.iter().map(|s| s.seconds).collect();
            let aggregate = reduce(&times);
            debug!(
                size,
                kernel = kernel.name(),
                mean = aggregate.mean,
                std_dev = aggregate.std_dev,
                "kernel reduced"
            );
            stats.push(KernelStats {
                kernel: kernel.name(),
                stats: aggregate,
                result,
            });
            book.insert((kernel.name(), size), samples);
        }

        drop(a);
        drop(b);
        phase.advance(size);

        Ok(SizeOutcome::Measured {
            degenerate_input,
            kernels: stats,
        })
    }

    fn warmup(&self, size: usize, a: &Vector, b: &Vector) {
        for kernel in self.registry.all() {
            for _ in 0..self.config.warmup {
                black_box(kernel.dot(size, black_box(a), black_box(b)));
            }
        }
    }
}

/// Time one call. Only the kernel runs between start and stop.
#[inline(always)]
fn timed_call(kernel: &dyn Kernel, size: usize, a: &[f32], b: &[f32]) -> (f64, f32) {
    let handle = Timer::start();
    let result = black_box(kernel.dot(size, black_box(a), black_box(b)));
    (Timer::stop(handle), result)
}

type Series = (Vec<Sample>, f32);

fn empty_series(count: usize, cycles: usize) -> Vec<Series> {
    (0..count)
        .map(|_| (Vec::with_capacity(cycles), 0.0))
        .collect()
}

/// Every cycle runs all kernels in registry order.
fn interleaved(
    kernels: &[Box<dyn Kernel>],
    size: usize,
    cycles: usize,
    a: &[f32],
    b: &[f32],
) -> Vec<Series> {
    let mut series = empty_series(kernels.len(), cycles);
    for cycle in 0..cycles {
        for (kernel, (samples, last)) in kernels.iter().zip(series.iter_mut()) {
            let (seconds, result) = timed_call(kernel.as_ref(), size, a, b);
            samples.push(Sample {
                kernel: kernel.name(),
                size,
                cycle,
                seconds,
            });
            *last = result;
        }
    }
    series
}

/// Each kernel completes all its cycles before the next one starts.
fn blocked(
    kernels: &[Box<dyn Kernel>],
    size: usize,
    cycles: usize,
    a: &[f32],
    b: &[f32],
) -> Vec<Series> {
    let mut series = empty_series(kernels.len(), cycles);
    for (kernel, (samples, last)) in kernels.iter().zip(series.iter_mut()) {
        for cycle in 0..cycles {
            let (seconds, result) = timed_call(kernel.as_ref(), size, a, b);
            samples.push(Sample {
                kernel: kernel.name(),
                size,
                cycle,
                seconds,
            });
            *last = result;
        }
    }
    series
}
