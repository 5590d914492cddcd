// Welch's t-test over timing sample populations
//
// The decision statistic is the TVLA form of Welch's t: absolute difference
// of class means over the combined standard error. No p-value or degrees of
// freedom are computed; the verdict layer compares the statistic directly
// against a fixed threshold.
//
// Numerics are deliberately plain: two-pass mean/variance in f64 with the
// unbiased (n - 1) divisor. At 100k samples of sub-millisecond durations
// the two-pass form is exact enough that anything fancier would change no
// verdict, and it keeps the formulas recognizable against the references.

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};
use crate::input::InputClass;

/// One class's collected timing measurements, in seconds.
///
/// Immutable after construction; at least 2 samples so the unbiased
/// variance is defined.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    class: InputClass,
    samples: Vec<f64>,
}

impl SampleSet {
    /// Wrap collected samples for `class`.
    ///
    /// Rejects fewer than 2 samples since the t-test is undefined there.
    pub fn new(class: InputClass, samples: Vec<f64>) -> Result<Self> {
        if samples.len() < 2 {
            return Err(HarnessError::InvalidConfig(format!(
                "{class} class needs at least 2 samples for a t-test, got {}",
                samples.len()
            )));
        }
        Ok(Self { class, samples })
    }

    pub fn class(&self) -> InputClass {
        self.class
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction guarantees >= 2, kept for API completeness
        self.samples.is_empty()
    }

    /// Descriptive statistics for this set, computed on demand.
    pub fn stats(&self) -> SampleStats {
        let n = self.samples.len();
        let sum: f64 = self.samples.iter().sum();
        let mean = sum / n as f64;

        let sum_sq_dev: f64 = self
            .samples
            .iter()
            .map(|s| {
                let dev = s - mean;
                dev * dev
            })
            .sum();
        let variance = sum_sq_dev / (n - 1) as f64;

        let min = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .samples
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        SampleStats {
            n,
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }
}

/// Summary statistics of one sample set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Number of samples
    pub n: usize,
    /// Arithmetic mean, seconds
    pub mean: f64,
    /// Unbiased sample variance (n - 1 divisor)
    pub variance: f64,
    /// Square root of the variance, seconds
    pub std_dev: f64,
    /// Smallest sample, seconds
    pub min: f64,
    /// Largest sample, seconds
    pub max: f64,
}

/// Welch's t statistic between two sample sets.
///
/// Symmetric in its arguments. Returns 0.0 when both variances are zero,
/// treating two perfectly constant populations as showing no detectable
/// difference rather than as an error.
pub fn welch_t(x: &SampleSet, y: &SampleSet) -> f64 {
    welch_t_stats(&x.stats(), &y.stats())
}

/// Welch's t from precomputed summary statistics.
pub fn welch_t_stats(x: &SampleStats, y: &SampleStats) -> f64 {
    let std_err = (x.variance / x.n as f64 + y.variance / y.n as f64).sqrt();
    if std_err == 0.0 {
        return 0.0;
    }
    (x.mean - y.mean).abs() / std_err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(class: InputClass, values: &[f64]) -> SampleSet {
        SampleSet::new(class, values.to_vec()).unwrap()
    }

    #[test]
    fn test_rejects_fewer_than_two_samples() {
        assert!(SampleSet::new(InputClass::Fixed, vec![]).is_err());
        assert!(SampleSet::new(InputClass::Fixed, vec![1.0]).is_err());
        assert!(SampleSet::new(InputClass::Fixed, vec![1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_stats_known_values() {
        let stats = set(InputClass::Fixed, &[1.0, 2.0, 3.0]).stats();
        assert_eq!(stats.n, 3);
        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.variance - 1.0).abs() < 1e-12);
        assert!((stats.std_dev - 1.0).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
    }

    #[test]
    fn test_stats_constant_samples_have_zero_variance() {
        let stats = set(InputClass::Random, &[10.0, 10.0, 10.0]).stats();
        assert_eq!(stats.mean, 10.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_stats_order_invariant() {
        let a = set(InputClass::Fixed, &[1.0, 2.0, 3.0]).stats();
        let b = set(InputClass::Fixed, &[3.0, 1.0, 2.0]).stats();
        assert_eq!(a.mean, b.mean);
        assert_eq!(a.variance, b.variance);
        assert_eq!(a.min, b.min);
        assert_eq!(a.max, b.max);
    }

    #[test]
    fn test_welch_t_identical_constant_sets_is_zero() {
        // Both variances zero: zero standard error is "no difference",
        // not a divide error
        let x = set(InputClass::Fixed, &[10.0, 10.0, 10.0]);
        let y = set(InputClass::Random, &[10.0, 10.0, 10.0]);
        assert_eq!(welch_t(&x, &y), 0.0);
    }

    #[test]
    fn test_welch_t_constant_sets_different_means() {
        // Still zero standard error, so still 0.0 even with distinct means
        let x = set(InputClass::Fixed, &[10.0, 10.0, 10.0]);
        let y = set(InputClass::Random, &[12.0, 12.0, 12.0]);
        assert_eq!(welch_t(&x, &y), 0.0);
    }

    #[test]
    fn test_welch_t_hand_computed() {
        // x: mean 3, var 2.5; y: mean 6, var 10
        // t = 3 / sqrt(2.5/5 + 10/5) = 3 / sqrt(2.5)
        let x = set(InputClass::Fixed, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let y = set(InputClass::Random, &[2.0, 4.0, 6.0, 8.0, 10.0]);
        let expected = 3.0 / 2.5f64.sqrt();
        assert!((welch_t(&x, &y) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_welch_t_one_sided_variance() {
        // x constant, y varying: t = 2 / sqrt(4/3) = sqrt(3)
        let x = set(InputClass::Fixed, &[10.0, 10.0, 10.0]);
        let y = set(InputClass::Random, &[10.0, 12.0, 14.0]);
        assert!((welch_t(&x, &y) - 3.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_welch_t_symmetric() {
        let x = set(InputClass::Fixed, &[1.0, 2.0, 3.0, 4.0]);
        let y = set(InputClass::Random, &[2.0, 3.0, 5.0, 8.0]);
        assert_eq!(welch_t(&x, &y), welch_t(&y, &x));
    }

    #[test]
    fn test_welch_t_is_nonnegative() {
        // Absolute-value numerator: direction of the difference is discarded
        let x = set(InputClass::Fixed, &[1.0, 2.0, 3.0]);
        let y = set(InputClass::Random, &[100.0, 101.0, 102.0]);
        assert!(welch_t(&x, &y) > 0.0);
        assert!(welch_t(&y, &x) > 0.0);
    }

    #[test]
    fn test_welch_t_scales_with_separation() {
        let x = set(InputClass::Fixed, &[1.0, 2.0, 3.0]);
        let near = set(InputClass::Random, &[2.0, 3.0, 4.0]);
        let far = set(InputClass::Random, &[10.0, 11.0, 12.0]);
        assert!(welch_t(&x, &far) > welch_t(&x, &near));
    }

    #[test]
    fn test_welch_t_unequal_sample_counts() {
        // Welch's form does not assume equal n
        let x = set(InputClass::Fixed, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let y = set(InputClass::Random, &[4.0, 5.0]);
        let xs = x.stats();
        let ys = y.stats();
        let expected =
            (xs.mean - ys.mean).abs() / (xs.variance / 6.0 + ys.variance / 2.0).sqrt();
        assert!((welch_t(&x, &y) - expected).abs() < 1e-12);
    }
}
