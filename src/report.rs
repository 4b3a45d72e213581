//! Structured sweep results and the sinks that consume them.
//!
//! The runner never prints. It returns a [`SweepReport`] and hands it to
//! whatever [`ReportSink`] the embedding program chose: the terminal table in
//! [`crate::tui`], the CSV export below, or a test double.

use crate::config::{FillPolicy, Schedule};
use crate::error::{BenchError, Result};
use crate::sanity::SanityReport;
use crate::utils::stats::AggregateStats;
use std::collections::BTreeMap;
use std::io::Write;

/// One timed kernel invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub kernel: &'static str,
    pub size: usize,
    pub cycle: usize,
    pub seconds: f64,
}

/// Samples are grouped by (kernel name, vector size).
pub type SampleKey = (&'static str, usize);

/// Aggregated timings of one kernel at one size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelStats {
    pub kernel: &'static str,
    pub stats: AggregateStats,
    /// Dot product returned by the last timed cycle
    pub result: f32,
}

#[derive(Debug)]
pub enum SizeOutcome {
    Measured {
        /// Normalization produced non-finite inputs; timings are not comparable
        degenerate_input: bool,
        /// One entry per kernel, in registry order
        kernels: Vec<KernelStats>,
    },
    /// The size was skipped; the sweep went on
    Failed(BenchError),
}

#[derive(Debug)]
pub struct SizeReport {
    pub size: usize,
    pub outcome: SizeOutcome,
}

impl SizeReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, SizeOutcome::Failed(_))
    }

    /// Stats of every kernel, empty for failed sizes.
    pub fn kernels(&self) -> &[KernelStats] {
        match &self.outcome {
            SizeOutcome::Measured { kernels, .. } => kernels,
            SizeOutcome::Failed(_) => &[],
        }
    }
}

/// Everything one sweep produced.
#[derive(Debug)]
pub struct SweepReport {
    /// Seed the inputs were generated from
    pub seed: u64,
    pub fill: FillPolicy,
    pub schedule: Schedule,
    pub cycles: usize,
    /// One entry per configured size, in sweep order
    pub sizes: Vec<SizeReport>,
    /// Raw per-cycle samples
    pub samples: BTreeMap<SampleKey, Vec<Sample>>,
}

impl SweepReport {
    /// Raw samples of `kernel` at `size`, in cycle order.
    pub fn samples_for(&self, kernel: &str, size: usize) -> Option<&[Sample]> {
        self.samples
            .iter()
            .find(|((k, s), _)| *k == kernel && *s == size)
            .map(|(_, v)| v.as_slice())
    }

    pub fn stats_for(&self, kernel: &str, size: usize) -> Option<&AggregateStats> {
        self.size(size)?
            .kernels()
            .iter()
            .find(|k| k.kernel == kernel)
            .map(|k| &k.stats)
    }

    pub fn size(&self, size: usize) -> Option<&SizeReport> {
        self.sizes.iter().find(|r| r.size == size)
    }

    /// Sizes that were skipped, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &BenchError)> {
        self.sizes.iter().filter_map(|r| match &r.outcome {
            SizeOutcome::Failed(e) => Some((r.size, e)),
            SizeOutcome::Measured { .. } => None,
        })
    }

    /// Sizes whose inputs were degenerate.
    pub fn degenerate_sizes(&self) -> Vec<usize> {
        self.sizes
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    SizeOutcome::Measured {
                        degenerate_input: true,
                        ..
                    }
                )
            })
            .map(|r| r.size)
            .collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none() && self.degenerate_sizes().is_empty()
    }
}

/// Consumer of structured results.
pub trait ReportSink {
    fn sweep(&mut self, report: &SweepReport) -> Result<()>;

    fn sanity(&mut self, _report: &SanityReport) -> Result<()> {
        Ok(())
    }
}

/// Writes every raw sample as one CSV row.
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvSink<std::io::BufWriter<std::fs::File>> {
    /// Create (or truncate) a CSV file at `path`.
    pub fn create(path: &str) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(std::io::BufWriter::new(file)))
    }
}

impl<W: Write> ReportSink for CsvSink<W> {
    fn sweep(&mut self, report: &SweepReport) -> Result<()> {
        writeln!(self.writer, "kernel,compiler,size,cycle,seconds,seed")?;

        for samples in report.samples.values() {
            for sample in samples {
                let compiler = if sample.kernel.starts_with("c-") {
                    crate::utils::C_COMPILER_NAME.unwrap_or("Unknown")
                } else {
                    ""
                };
                writeln!(
                    self.writer,
                    "{},{},{},{},{:e},{}",
                    sample.kernel, compiler, sample.size, sample.cycle, sample.seconds, report.seed
                )?;
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}
