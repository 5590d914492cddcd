//! Error taxonomy for the timing harness
//!
//! Every variant is fatal for the whole run: a failed collection would bias
//! the downstream statistic, so nothing here is retried or downgraded to a
//! warning.

use thiserror::Error;

/// Errors raised while configuring or running a measurement
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The KEM backend could not be initialized or failed its self-check.
    #[error("KEM backend initialization failed: {0}")]
    ProviderInit(String),

    /// A keypair/encapsulate/decapsulate call failed mid-collection.
    /// The partial sample buffer is discarded, never reported.
    #[error("KEM {operation} failed: {detail}")]
    ProviderOperation {
        operation: &'static str,
        detail: String,
    },

    /// The sample buffer could not be reserved up front.
    #[error("failed to allocate sample buffer for {samples} samples: {detail}")]
    Allocation { samples: usize, detail: String },

    /// Rejected before any measurement begins.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An explicitly requested CPU pin could not be satisfied.
    #[error("CPU affinity pinning failed: {0}")]
    Affinity(String),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
