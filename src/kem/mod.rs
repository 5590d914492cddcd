// KEM capability provider for the timing harness
//
// The cryptography itself is external: this module wraps the PQClean Kyber
// implementations (pqcrypto-kyber) behind a byte-oriented trait so the
// sampler measures an opaque encapsulate/decapsulate capability rather than
// a concrete library. All key/ciphertext/shared-secret buffers are sized at
// runtime from the selected parameter set and heap-owned, never
// stack-declared from a size expression.
//
// Backend lifecycle: `KemBackend` is the scoped stand-in for a global
// init/teardown pair. At most one backend is active per process; `init`
// probes the provider with a full keypair/encapsulate/decapsulate round
// trip, and dropping the guard releases the backend on every exit path.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

mod kyber;

pub use kyber::KyberProvider;

/// Supported KEM parameter sets.
///
/// `kyber512` matches the parameter set this harness historically targeted;
/// the larger sets are selectable for cross-checking whether an observed
/// timing signal scales with the polynomial dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KemAlgorithm {
    /// ML-KEM-512 (Kyber-512), NIST level 1
    #[default]
    Kyber512,
    /// ML-KEM-768 (Kyber-768), NIST level 3
    Kyber768,
    /// ML-KEM-1024 (Kyber-1024), NIST level 5
    Kyber1024,
}

impl fmt::Display for KemAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KemAlgorithm::Kyber512 => "kyber512",
            KemAlgorithm::Kyber768 => "kyber768",
            KemAlgorithm::Kyber1024 => "kyber1024",
        };
        f.write_str(name)
    }
}

/// Buffer lengths for one parameter set, known only after algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KemSizes {
    pub public_key: usize,
    pub secret_key: usize,
    pub ciphertext: usize,
    pub shared_secret: usize,
}

/// One keypair plus its algorithm tag.
///
/// Generated once per sample collection and owned exclusively by the sampler
/// for the collection's duration; both key buffers are runtime-sized.
pub struct KemKeypair {
    algorithm: KemAlgorithm,
    public_key: Vec<u8>,
    secret_key: Vec<u8>,
}

impl KemKeypair {
    pub fn new(algorithm: KemAlgorithm, public_key: Vec<u8>, secret_key: Vec<u8>) -> Self {
        Self {
            algorithm,
            public_key,
            secret_key,
        }
    }

    pub fn algorithm(&self) -> KemAlgorithm {
        self.algorithm
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }
}

// Keep secret key material out of debug output
impl fmt::Debug for KemKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KemKeypair")
            .field("algorithm", &self.algorithm)
            .field("public_key_len", &self.public_key.len())
            .field("secret_key_len", &self.secret_key.len())
            .finish()
    }
}

/// Output of one encapsulation: ciphertext plus the sender-side shared secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encapsulation {
    pub ciphertext: Vec<u8>,
    pub shared_secret: Vec<u8>,
}

/// The opaque cryptographic capability the sampler measures.
///
/// Implementations must be deterministic in their failure behavior: any error
/// is final for the current collection, never retried by the harness.
pub trait KemProvider {
    /// The parameter set this provider is bound to.
    fn algorithm(&self) -> KemAlgorithm;

    /// Buffer lengths for the bound parameter set.
    fn sizes(&self) -> KemSizes;

    /// Generate a fresh keypair with runtime-sized owned buffers.
    fn generate_keypair(&self) -> Result<KemKeypair>;

    /// Encapsulate against `public_key`, yielding ciphertext and shared secret.
    fn encapsulate(&self, public_key: &[u8]) -> Result<Encapsulation>;

    /// Decapsulate `ciphertext` with `secret_key`, yielding the shared secret.
    fn decapsulate(&self, secret_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>;
}

static BACKEND_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Scoped KEM backend lifetime.
///
/// Acquired exactly once per harness run, bracketing all measurement; the
/// backend is released when the guard drops, including on early error paths.
/// A second concurrent `init` in the same process is refused.
#[derive(Debug)]
pub struct KemBackend {
    provider: KyberProvider,
}

impl KemBackend {
    /// Bring the backend up for `algorithm` and verify it is actually usable.
    ///
    /// The probe runs one full keypair/encapsulate/decapsulate cycle and
    /// checks that both sides derive the same shared secret, so a provider
    /// that "starts" but cannot round-trip is rejected here instead of
    /// surfacing mid-collection.
    pub fn init(algorithm: KemAlgorithm) -> Result<Self> {
        if BACKEND_ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(HarnessError::ProviderInit(
                "another KEM backend is already active in this process".to_string(),
            ));
        }

        // From here on the guard owns the active flag; returning Err drops
        // it and releases the backend.
        let backend = Self {
            provider: KyberProvider::new(algorithm),
        };
        backend.self_check()?;

        let sizes = backend.provider.sizes();
        tracing::debug!(
            algorithm = %algorithm,
            public_key = sizes.public_key,
            secret_key = sizes.secret_key,
            ciphertext = sizes.ciphertext,
            shared_secret = sizes.shared_secret,
            "KEM backend ready"
        );
        Ok(backend)
    }

    /// The provider bound to this backend's algorithm.
    pub fn provider(&self) -> &dyn KemProvider {
        &self.provider
    }

    fn self_check(&self) -> Result<()> {
        let probe = |e: HarnessError| HarnessError::ProviderInit(format!("self-check: {e}"));

        let keypair = self.provider.generate_keypair().map_err(probe)?;
        let enc = self
            .provider
            .encapsulate(keypair.public_key())
            .map_err(probe)?;
        let shared = self
            .provider
            .decapsulate(keypair.secret_key(), &enc.ciphertext)
            .map_err(probe)?;

        if shared != enc.shared_secret {
            return Err(HarnessError::ProviderInit(format!(
                "self-check: {} round trip produced mismatched shared secrets",
                self.provider.algorithm()
            )));
        }
        Ok(())
    }
}

impl Drop for KemBackend {
    fn drop(&mut self) {
        BACKEND_ACTIVE.store(false, Ordering::SeqCst);
        tracing::debug!("KEM backend released");
    }
}
