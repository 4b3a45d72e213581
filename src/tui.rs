//! Text User Interface (TUI) utilities.
//!
//! Terminal rendering of sweep and sanity reports.

use crate::error::Result;
use crate::registry::KernelRegistry;
use crate::report::{KernelStats, ReportSink, SizeOutcome, SweepReport};
use crate::sanity::SanityReport;
use crate::utils::stats::relative_error;
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Human-readable duration from seconds
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() {
        format!("{}", seconds)
    } else if seconds >= 1.0 {
        format!("{:.3} s", seconds)
    } else if seconds >= 1e-3 {
        format!("{:.3} ms", seconds * 1e3)
    } else if seconds >= 1e-6 {
        format!("{:.3} µs", seconds * 1e6)
    } else {
        format!("{:.0} ns", seconds * 1e9)
    }
}

fn display_name(kernel: &str) -> String {
    if kernel.starts_with("c-") {
        match crate::utils::C_COMPILER_NAME {
            Some(c) => format!("{} ({})", kernel, c),
            None => kernel.to_string(),
        }
    } else {
        kernel.to_string()
    }
}

/// Prints reports as tables on stdout.
#[derive(Default)]
pub struct TableSink;

impl TableSink {
    pub fn new() -> Self {
        Self
    }

    fn print_kernel_table(&self, kernels: &[KernelStats]) {
        let term_width = get_term_width();
        // 12+12+12+9+9+12+10 = 76 chars + 7 spaces + 2 indent
        let fixed_width = 85;
        let kernel_col_width = term_width.saturating_sub(fixed_width).max(15);
        let table_width = kernel_col_width + 76 + 7;

        let baseline = kernels.first();
        let baseline_mean = baseline.map(|k| k.stats.mean).unwrap_or(0.0);
        let baseline_result = baseline.map(|k| k.result as f64).unwrap_or(0.0);

        println!("  {}", "─".repeat(table_width));
        println!(
            "  {:<k_width$} {:>12} {:>12} {:>12} {:>9} {:>9} {:>12} {:>10}",
            "Kernel",
            "Mean",
            "Std Dev",
            "Min",
            "Speedup",
            "CV",
            "Result",
            "Rel. Error",
            k_width = kernel_col_width
        );
        println!("  {}", "─".repeat(table_width));

        for k in kernels {
            let speedup = if k.stats.mean > 0.0 {
                baseline_mean / k.stats.mean
            } else {
                0.0
            };
            println!(
                "  {:<k_width$} {:>12} {:>12} {:>12} {:>8.2}x {:>8.2}% {:>12.6} {:>10.2e}",
                truncate(&display_name(k.kernel), kernel_col_width),
                format_seconds(k.stats.mean),
                format_seconds(k.stats.std_dev),
                format_seconds(k.stats.min),
                speedup,
                k.stats.coefficient_of_variation() * 100.0,
                k.result,
                relative_error(k.result as f64, baseline_result),
                k_width = kernel_col_width
            );
        }
        println!();
    }
}

impl ReportSink for TableSink {
    fn sweep(&mut self, report: &SweepReport) -> Result<()> {
        println!(
            "  Seed: {}  Fill: {:?}  Schedule: {:?}  Cycles: {}",
            report.seed, report.fill, report.schedule, report.cycles
        );
        println!();

        for size_report in &report.sizes {
            match &size_report.outcome {
                SizeOutcome::Measured {
                    degenerate_input,
                    kernels,
                } => {
                    let flag = if *degenerate_input {
                        " [degenerate input: timings unreliable]"
                    } else {
                        ""
                    };
                    println!("  Size: {}{}", size_report.size, flag);
                    self.print_kernel_table(kernels);
                }
                SizeOutcome::Failed(e) => {
                    println!("  Size: {}  FAILED: {}", size_report.size, e);
                    println!();
                }
            }
        }
        Ok(())
    }

    fn sanity(&mut self, report: &SanityReport) -> Result<()> {
        println!("  Sanity check (tolerance floor {:.0e})", report.tolerance);
        for case in &report.cases {
            println!(
                "    {} (expected {}, tolerance {:.1e})",
                case.case, case.expected, case.tolerance
            );
            for check in &case.checks {
                println!(
                    "      {} {:<24} {:>14.6} {:>10.2e}",
                    if check.passed { "ok  " } else { "FAIL" },
                    truncate(&display_name(check.kernel), 24),
                    check.value,
                    check.relative_error
                );
            }
        }
        println!();
        Ok(())
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " SDOT Kernel Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the list of registered kernels
pub fn print_available_kernels(registry: &KernelRegistry) {
    println!("Available kernels:");
    println!();
    for kernel in registry.all() {
        println!(
            "  {:<20} - {}",
            display_name(kernel.name()),
            kernel.description()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds_units() {
        assert_eq!(format_seconds(2.5), "2.500 s");
        assert_eq!(format_seconds(0.0125), "12.500 ms");
        assert_eq!(format_seconds(3.0e-6), "3.000 µs");
        assert_eq!(format_seconds(4.0e-8), "40 ns");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("reference", 20), "reference");
        assert_eq!(truncate("x86_64-avx2-long-name", 10), "x86_64-...");
    }
}
