//! Correctness check run through every kernel, separate from the timed sweep.
//!
//! Hand-picked cases have known answers; the random case compares every
//! kernel against the reference kernel on seeded data.

use crate::error::{BenchError, Result};
use crate::registry::KernelRegistry;
use crate::utils::stats::relative_error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Relative error floor allowed between a kernel and the expected value
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Relative error allowed for an `n`-element dot product of non-negative terms.
///
/// Two kernels summing `n` products in different orders in single precision
/// can each drift by up to `n * u` (`u = f32::EPSILON / 2`) from the exact
/// value, so the allowed gap is `n * f32::EPSILON`, never below
/// [`DEFAULT_TOLERANCE`].
pub fn dot_tolerance(n: usize) -> f64 {
    (n as f64 * f32::EPSILON as f64).max(DEFAULT_TOLERANCE)
}

/// Length of the seeded cross-check against the reference kernel
pub const CROSS_CHECK_LEN: usize = 1023;

/// One input pair. `expected = None` means "whatever the reference returns".
#[derive(Clone, Debug)]
pub struct SanityCase {
    pub name: &'static str,
    pub a: Vec<f32>,
    pub b: Vec<f32>,
    pub expected: Option<f32>,
}

/// The hand-picked cases with known dot products.
pub fn fixed_cases() -> Vec<SanityCase> {
    vec![
        SanityCase {
            name: "hand-picked-5",
            a: vec![3.2, 5.6, 10.0, 2.5, 1.7],
            b: vec![6.2, -7.9, 2.3, 7.0, 4.6],
            // 19.84 - 44.24 + 23.0 + 17.5 + 7.82
            expected: Some(23.92),
        },
        SanityCase {
            name: "orthogonal-3",
            a: vec![1.0, 0.0, 0.0],
            b: vec![0.0, 1.0, 0.0],
            expected: Some(0.0),
        },
        SanityCase {
            name: "empty",
            a: Vec::new(),
            b: Vec::new(),
            expected: Some(0.0),
        },
    ]
}

/// Seeded random pair checked against the reference kernel.
///
/// Values lie in `[0.5, 1.5)` so the sum stays far from zero and the
/// relative error is meaningful.
pub fn cross_check_case(len: usize, seed: u64) -> SanityCase {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = (0..len).map(|_| rng.random_range(0.5..1.5)).collect();
    let b = (0..len).map(|_| rng.random_range(0.5..1.5)).collect();
    SanityCase {
        name: "cross-check",
        a,
        b,
        expected: None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KernelCheck {
    pub kernel: &'static str,
    pub value: f32,
    pub relative_error: f64,
    pub passed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaseResult {
    pub case: &'static str,
    /// Known answer, or the reference kernel's output
    pub expected: f32,
    pub tolerance: f64,
    pub checks: Vec<KernelCheck>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SanityReport {
    /// Tolerance floor; long cases widen it with [`dot_tolerance`]
    pub tolerance: f64,
    pub cases: Vec<CaseResult>,
}

impl SanityReport {
    pub fn passed(&self) -> bool {
        self.cases
            .iter()
            .all(|c| c.checks.iter().all(|k| k.passed))
    }

    /// (case, failed check) pairs
    pub fn failures(&self) -> impl Iterator<Item = (&CaseResult, &KernelCheck)> {
        self.cases
            .iter()
            .flat_map(|c| c.checks.iter().filter(|k| !k.passed).map(move |k| (c, k)))
    }

    /// First failure as an error.
    pub fn ensure_passed(&self) -> Result<()> {
        match self.failures().next() {
            None => Ok(()),
            Some((case, check)) => Err(BenchError::KernelMismatch {
                kernel: check.kernel.to_string(),
                case: case.case.to_string(),
                expected: case.expected,
                actual: check.value,
            }),
        }
    }
}

/// Run a single case through every kernel.
pub fn check_case(registry: &KernelRegistry, case: &SanityCase, tolerance: f64) -> Result<CaseResult> {
    let n = case.a.len();
    if case.b.len() != n {
        return Err(BenchError::Config(format!(
            "sanity case '{}' has vectors of different lengths",
            case.name
        )));
    }

    let expected = match case.expected {
        Some(value) => value,
        None => registry
            .reference()
            .ok_or_else(|| BenchError::Config("no kernels registered".into()))?
            .dot(n, &case.a, &case.b),
    };

    let checks = registry
        .all()
        .iter()
        .map(|kernel| {
            let value = kernel.dot(n, &case.a, &case.b);
            let error = relative_error(value as f64, expected as f64);
            KernelCheck {
                kernel: kernel.name(),
                value,
                relative_error: error,
                passed: error <= tolerance,
            }
        })
        .collect();

    Ok(CaseResult {
        case: case.name,
        expected,
        tolerance,
        checks,
    })
}

/// Fixed cases plus a seeded cross-check, each held to [`dot_tolerance`] of its length.
pub fn run_sanity_check(registry: &KernelRegistry, seed: u64) -> Result<SanityReport> {
    let mut cases = fixed_cases();
    cases.push(cross_check_case(CROSS_CHECK_LEN, seed));

    let results = cases
        .iter()
        .map(|case| check_case(registry, case, dot_tolerance(case.a.len())))
        .collect::<Result<Vec<_>>>()?;

    Ok(SanityReport {
        tolerance: DEFAULT_TOLERANCE,
        cases: results,
    })
}
