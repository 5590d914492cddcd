// Leak verdict from the t statistic
//
// The decision rule is a single threshold comparison: a run is flagged only
// when the absolute t statistic strictly exceeds the configured cutoff.
// Landing exactly on the threshold does not flag. There is no notion of
// severity; one bit of verdict plus the statistic itself is the output.

use serde::{Deserialize, Serialize};

use crate::kem::KemAlgorithm;
use crate::statistics::SampleStats;

/// Outcome of one leak detection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// |t| exceeded the threshold: timing distinguishable between classes
    LeakSuspected,
    /// |t| within the threshold: no significant timing difference
    NoLeak,
}

impl Verdict {
    /// Human-readable verdict line
    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::LeakSuspected => "❌  Potential timing difference detected!",
            Verdict::NoLeak => "✅  No significant timing difference detected.",
        }
    }

    pub fn is_leak(&self) -> bool {
        matches!(self, Verdict::LeakSuspected)
    }
}

/// Apply the threshold decision rule to a computed t statistic.
pub fn classify(t_statistic: f64, threshold: f64) -> Verdict {
    if t_statistic > threshold {
        Verdict::LeakSuspected
    } else {
        Verdict::NoLeak
    }
}

/// Complete result of one run: decision inputs, verdict, and per-class
/// summaries for the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Parameter set that was measured
    pub algorithm: KemAlgorithm,
    /// Samples collected per class
    pub sample_count: usize,
    /// Decision threshold in effect
    pub threshold: f64,
    /// Welch's t between the fixed and random classes
    pub t_statistic: f64,
    /// Threshold decision
    pub verdict: Verdict,
    /// Summary of the fixed-class samples
    pub fixed: SampleStats,
    /// Summary of the random-class samples
    pub random: SampleStats,
}
