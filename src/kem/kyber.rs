// Kyber provider backed by the PQClean reference implementations
//
// pqcrypto-kyber exposes each parameter set as its own module with
// monomorphic key/ciphertext types, so the three sets are bridged into one
// byte-oriented provider here. All conversions from caller-supplied slices
// go through pqcrypto's length-checked `from_bytes`, and the rejected slice
// surfaces as a provider operation error rather than a panic.

use pqcrypto_traits::kem::{Ciphertext as _, PublicKey as _, SecretKey as _, SharedSecret as _};

use crate::error::{HarnessError, Result};
use crate::kem::{Encapsulation, KemAlgorithm, KemKeypair, KemProvider, KemSizes};

/// Expands `$body` once per parameter set, with `$m` bound to the matching
/// pqcrypto module.
macro_rules! dispatch {
    ($alg:expr, $m:ident => $body:expr) => {
        match $alg {
            KemAlgorithm::Kyber512 => {
                use pqcrypto_kyber::kyber512 as $m;
                $body
            }
            KemAlgorithm::Kyber768 => {
                use pqcrypto_kyber::kyber768 as $m;
                $body
            }
            KemAlgorithm::Kyber1024 => {
                use pqcrypto_kyber::kyber1024 as $m;
                $body
            }
        }
    };
}

fn op_error(operation: &'static str, err: pqcrypto_traits::Error) -> HarnessError {
    HarnessError::ProviderOperation {
        operation,
        detail: err.to_string(),
    }
}

/// Byte-oriented KEM provider over the PQClean Kyber parameter sets
#[derive(Debug, Clone, Copy)]
pub struct KyberProvider {
    algorithm: KemAlgorithm,
}

impl KyberProvider {
    pub fn new(algorithm: KemAlgorithm) -> Self {
        Self { algorithm }
    }
}

impl KemProvider for KyberProvider {
    fn algorithm(&self) -> KemAlgorithm {
        self.algorithm
    }

    fn sizes(&self) -> KemSizes {
        dispatch!(self.algorithm, m => KemSizes {
            public_key: m::public_key_bytes(),
            secret_key: m::secret_key_bytes(),
            ciphertext: m::ciphertext_bytes(),
            shared_secret: m::shared_secret_bytes(),
        })
    }

    fn generate_keypair(&self) -> Result<KemKeypair> {
        dispatch!(self.algorithm, m => {
            let (pk, sk) = m::keypair();
            Ok(KemKeypair::new(
                self.algorithm,
                pk.as_bytes().to_vec(),
                sk.as_bytes().to_vec(),
            ))
        })
    }

    fn encapsulate(&self, public_key: &[u8]) -> Result<Encapsulation> {
        dispatch!(self.algorithm, m => {
            let pk = m::PublicKey::from_bytes(public_key)
                .map_err(|e| op_error("encapsulate", e))?;
            let (shared_secret, ciphertext) = m::encapsulate(&pk);
            Ok(Encapsulation {
                ciphertext: ciphertext.as_bytes().to_vec(),
                shared_secret: shared_secret.as_bytes().to_vec(),
            })
        })
    }

    fn decapsulate(&self, secret_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        dispatch!(self.algorithm, m => {
            let sk = m::SecretKey::from_bytes(secret_key)
                .map_err(|e| op_error("decapsulate", e))?;
            let ct = m::Ciphertext::from_bytes(ciphertext)
                .map_err(|e| op_error("decapsulate", e))?;
            let shared_secret = m::decapsulate(&ct, &sk);
            Ok(shared_secret.as_bytes().to_vec())
        })
    }
}
