//! # Ephemeral Ed25519 Keys
//!
//! The origin node generates one ephemeral admin keypair per bootstrap run.
//! The private seed is handed to the run-scoped signer and published inside
//! the kickstart bundle; at the end of the origin stage its on-ledger
//! authority is lowered, not deleted. Seeds travel hex-encoded.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroize;

use crate::KeyError;

/// A hex-encoded Ed25519 public key.
pub type PublicKeyHex = String;

/// Ed25519 keypair with a zeroizing drop.
pub struct EphemeralKeyPair {
    signing_key: SigningKey,
}

impl EphemeralKeyPair {
    /// Generate a random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Rebuild a keypair from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        Self { signing_key }
    }

    /// Rebuild a keypair from a hex-encoded secret seed.
    pub fn from_seed_hex(seed_hex: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(seed_hex)
            .map_err(|e| KeyError::InvalidEncoding(e.to_string()))?;
        let seed: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
            KeyError::InvalidSeedLength {
                expected: 32,
                actual: v.len(),
            }
        })?;
        Ok(Self::from_seed(seed))
    }

    /// Hex-encoded public key.
    pub fn public_key_hex(&self) -> PublicKeyHex {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }

    /// Hex-encoded secret seed.
    ///
    /// Callers own the lifetime of the returned string; it is the payload
    /// that ends up inside the kickstart bundle.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// Sign a message (deterministic, no RNG needed).
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for EphemeralKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemeralKeyPair")
            .field("signing_key", &"<redacted>")
            .finish()
    }
}

impl Drop for EphemeralKeyPair {
    fn drop(&mut self) {
        let mut bytes = self.signing_key.to_bytes();
        bytes.zeroize();
    }
}

/// Verify a signature against a hex-encoded public key.
pub fn verify_hex(
    public_key_hex: &str,
    message: &[u8],
    signature: &[u8; 64],
) -> Result<(), KeyError> {
    let bytes = hex::decode(public_key_hex)
        .map_err(|e| KeyError::InvalidEncoding(e.to_string()))?;
    let key_bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|_| KeyError::InvalidPublicKey)?;
    let verifying_key =
        VerifyingKey::from_bytes(&key_bytes).map_err(|_| KeyError::InvalidPublicKey)?;
    let sig = ed25519_dalek::Signature::from_bytes(signature);
    verifying_key
        .verify(message, &sig)
        .map_err(|_| KeyError::VerificationFailed)
}
