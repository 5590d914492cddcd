// Input classes for fixed-vs-random timing comparison
//
// A leak test compares two populations of measurements that differ only in
// their labeled input: one class holds a constant buffer, the other a
// buffer of generated random bytes.
//
// Known limitation, inherited deliberately: the class buffer is carried
// through collection for labeling and logging, but Kyber encapsulation
// draws its randomness internally and decapsulation consumes only the
// resulting ciphertext, so neither measured operation ever reads these
// bytes. Both classes therefore drive identical code paths, and the test
// functions as a null experiment that validates the statistics pipeline
// against a known no-leak condition. Wiring the buffer into the measured
// computation would change what is being tested and is left to the caller.

use std::fmt;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use serde::{Deserialize, Serialize};

/// Which population a measurement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputClass {
    /// Constant zero-filled buffer, identical across all samples
    Fixed,
    /// Random bytes, drawn once per run
    Random,
}

impl fmt::Display for InputClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputClass::Fixed => f.write_str("fixed"),
            InputClass::Random => f.write_str("random"),
        }
    }
}

/// One class's labeled input buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInput {
    class: InputClass,
    bytes: Vec<u8>,
}

impl ClassInput {
    /// The fixed class: `len` zero bytes.
    pub fn fixed(len: usize) -> Self {
        Self {
            class: InputClass::Fixed,
            bytes: vec![0u8; len],
        }
    }

    /// The random class: `len` bytes from a seeded or OS-entropy RNG.
    ///
    /// A seed makes the buffer reproducible across runs for debugging; it
    /// has no effect on the timing measurements themselves.
    pub fn random(len: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut bytes = vec![0u8; len];
        rng.fill_bytes(&mut bytes);
        Self {
            class: InputClass::Random,
            bytes,
        }
    }

    pub fn class(&self) -> InputClass {
        self.class
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
