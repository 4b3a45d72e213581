//! Reduction of per-cycle timing samples into summary statistics.

/// Summary of one (kernel, size) sample series. All values in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AggregateStats {
    /// Number of samples reduced
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator), 0.0 for a single sample
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Upper median (`sorted[len / 2]`)
    pub median: f64,
}

impl AggregateStats {
    /// Coefficient of variation (`std_dev / mean`), 0.0 when the mean is zero.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean.abs() < f64::EPSILON {
            0.0
        } else {
            self.std_dev / self.mean
        }
    }
}

/// Reduce samples to mean, sample standard deviation, min, max and median.
///
/// An empty slice yields all-zero stats. A single sample has a standard
/// deviation of exactly 0.0 instead of the 0/0 the estimator would give.
pub fn reduce(samples: &[f64]) -> AggregateStats {
    if samples.is_empty() {
        return AggregateStats::default();
    }

    let count = samples.len();
    let mean = samples.iter().sum::<f64>() / count as f64;

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    AggregateStats {
        count,
        mean,
        std_dev: sample_std_dev(samples, mean),
        min: sorted[0],
        max: sorted[count - 1],
        median: sorted[count / 2],
    }
}

/// Sample standard deviation around a precomputed mean.
pub fn sample_std_dev(samples: &[f64], mean: f64) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    let variance = samples
        .iter()
        .map(|x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / (samples.len() - 1) as f64;

    variance.sqrt()
}

/// Relative error of `value` against `baseline`, falling back to the
/// absolute error when the baseline is (close to) zero.
pub fn relative_error(value: f64, baseline: f64) -> f64 {
    let diff = (value - baseline).abs();
    if baseline.abs() > 1e-9 {
        diff / baseline.abs()
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_dataset() {
        let stats = reduce(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.count, 8);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        // sqrt(32 / 7)
        assert!((stats.std_dev - 2.138_089_935).abs() < 1e-6);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn test_single_sample() {
        let stats = reduce(&[0.25]);
        assert_eq!(stats.mean, 0.25);
        assert_eq!(stats.std_dev, 0.0);
        assert!(!stats.std_dev.is_nan());
    }

    #[test]
    fn test_empty() {
        assert_eq!(reduce(&[]), AggregateStats::default());
    }

    #[test]
    fn test_constant_samples_have_zero_spread() {
        let stats = reduce(&[1.5; 10]);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.coefficient_of_variation(), 0.0);
    }

    #[test]
    fn test_cv() {
        let stats = reduce(&[1.0, 3.0]);
        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.coefficient_of_variation() - stats.std_dev / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_relative_error() {
        assert!((relative_error(101.0, 100.0) - 0.01).abs() < 1e-12);
        assert_eq!(relative_error(0.5, 0.0), 0.5);
    }
}
