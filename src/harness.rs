// Run orchestration: config to verdict
//
// `run` owns the whole measurement lifecycle. Validation happens before any
// resource is acquired; the KEM backend and optional CPU pin are scoped to
// this function and released on every exit path, error or not. The fixed
// class is always collected before the random class, so the two populations
// sit in distinct but adjacent time windows. Slow drift between those
// windows (thermal ramp, frequency scaling) is a known source of false
// positives at high sample counts; interleaving is a possible future
// refinement, not current behavior.

use crate::affinity::AffinityGuard;
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::input::ClassInput;
use crate::kem::KemBackend;
use crate::sampler;
use crate::statistics::welch_t_stats;
use crate::verdict::{classify, TestResult};

/// Execute one full leak detection run.
pub fn run(config: &HarnessConfig) -> Result<TestResult> {
    config.validate()?;

    tracing::info!(
        algorithm = %config.algorithm,
        samples = config.sample_count,
        threshold = config.threshold,
        "starting leak detection run"
    );

    let backend = KemBackend::init(config.algorithm)?;
    let _pin = match config.pin_cpu {
        Some(cpu) => Some(AffinityGuard::pin(cpu)?),
        None => None,
    };

    let fixed_input = ClassInput::fixed(config.fixed_len);
    let random_input = ClassInput::random(config.fixed_len, config.seed);

    let provider = backend.provider();
    let fixed = sampler::collect(provider, &fixed_input, config.sample_count)?;
    let random = sampler::collect(provider, &random_input, config.sample_count)?;

    let fixed_stats = fixed.stats();
    let random_stats = random.stats();
    let t_statistic = welch_t_stats(&fixed_stats, &random_stats);
    let verdict = classify(t_statistic, config.threshold);

    tracing::info!(t_statistic, verdict = ?verdict, "run complete");

    Ok(TestResult {
        algorithm: config.algorithm,
        sample_count: config.sample_count,
        threshold: config.threshold,
        t_statistic,
        verdict,
        fixed: fixed_stats,
        random: random_stats,
    })
}
