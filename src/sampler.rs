// Timing sample collection
//
// One collection run measures `sample_count` encapsulate/decapsulate cycles
// against a single keypair and returns the wall-clock durations in seconds.
// The keypair is generated before the timed loop so key generation cost
// never contaminates the measurements. Timing uses the monotonic clock via
// `Instant`; wall-clock adjustments cannot produce negative samples.
//
// The timed region spans both KEM calls, including their output buffer
// allocation. That overhead is identical for the fixed and random classes,
// so the differential statistic cancels it.

use std::hint::black_box;
use std::time::Instant;

use crate::error::{HarnessError, Result};
use crate::input::ClassInput;
use crate::kem::KemProvider;
use crate::statistics::SampleSet;

/// Measure `sample_count` KEM cycles and return the per-cycle durations.
///
/// Any provider error aborts the collection; partially collected samples
/// are discarded, never returned or merged.
pub fn collect(
    provider: &dyn KemProvider,
    input: &ClassInput,
    sample_count: usize,
) -> Result<SampleSet> {
    if sample_count < 2 {
        return Err(HarnessError::InvalidConfig(format!(
            "sample_count must be >= 2 for a t-test, got {sample_count}"
        )));
    }

    let mut samples: Vec<f64> = Vec::new();
    samples
        .try_reserve_exact(sample_count)
        .map_err(|e| HarnessError::Allocation {
            samples: sample_count,
            detail: e.to_string(),
        })?;

    tracing::debug!(
        algorithm = %provider.algorithm(),
        class = %input.class(),
        input_len = input.len(),
        samples = sample_count,
        "collecting timing samples (class buffer labels the population; measured calls do not read it)"
    );

    let keypair = provider.generate_keypair()?;
    let collection_started = Instant::now();

    for _ in 0..sample_count {
        let started = Instant::now();
        let enc = provider.encapsulate(keypair.public_key())?;
        let shared = provider.decapsulate(keypair.secret_key(), &enc.ciphertext)?;
        let elapsed = started.elapsed().as_secs_f64();

        black_box(shared);
        samples.push(elapsed);
    }

    tracing::debug!(
        class = %input.class(),
        elapsed_s = collection_started.elapsed().as_secs_f64(),
        "collection finished"
    );

    SampleSet::new(input.class(), samples)
}
