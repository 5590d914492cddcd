//! Fuga - Timing side-channel detector for post-quantum KEMs
//!
//! This library measures encapsulate/decapsulate cycles of a KEM under two
//! input classes (fixed and random) and applies a TVLA-style Welch t-test
//! to decide whether the timing distributions are distinguishable.

pub mod affinity;
pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
pub mod input;
pub mod kem;
pub mod report;
pub mod sampler;
pub mod statistics;
pub mod verdict;
