//! CLI argument parsing for Fuga

use clap::{Parser, ValueEnum};

use crate::config::HarnessConfig;
use crate::kem::KemAlgorithm;

/// Output format for run results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Two-line human-readable verdict (default)
    Text,
    /// Full result document for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "fuga")]
#[command(version)]
#[command(about = "Timing side-channel detector for post-quantum KEMs", long_about = None)]
pub struct Cli {
    /// KEM parameter set to measure
    #[arg(short = 'a', long = "algorithm", value_enum, default_value = "kyber512")]
    pub algorithm: KemAlgorithm,

    /// Timing samples to collect per input class
    #[arg(short = 'n', long = "samples", value_name = "N", default_value = "100000")]
    pub samples: usize,

    /// Decision threshold on the absolute t statistic
    #[arg(short = 't', long = "threshold", value_name = "T", default_value = "5.0")]
    pub threshold: f64,

    /// Length in bytes of the fixed-class input buffer
    #[arg(long = "fixed-len", value_name = "BYTES", default_value = "32")]
    pub fixed_len: usize,

    /// Seed for the random-class input bytes (default: OS entropy)
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Pin the measurement thread to this CPU core (Linux only)
    #[arg(long = "pin-cpu", value_name = "CPU")]
    pub pin_cpu: Option<usize>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print a per-class timing summary table to stderr
    #[arg(short = 'c', long = "summary")]
    pub summary: bool,

    /// Exit with status 2 when a timing difference is detected
    #[arg(long = "fail-on-leak")]
    pub fail_on_leak: bool,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Fold the parsed flags into a harness configuration.
    ///
    /// Range validation happens in `HarnessConfig::validate`, not here.
    pub fn to_config(&self) -> HarnessConfig {
        HarnessConfig {
            algorithm: self.algorithm,
            sample_count: self.samples,
            threshold: self.threshold,
            fixed_len: self.fixed_len,
            seed: self.seed,
            pin_cpu: self.pin_cpu,
        }
    }
}
