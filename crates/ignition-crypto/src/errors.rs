//! Key error types.

use thiserror::Error;

/// Key-handling errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Hex decoding of a key string failed
    #[error("invalid key encoding: {0}")]
    InvalidEncoding(String),

    /// Seed had the wrong length
    #[error("invalid seed length: expected {expected}, got {actual}")]
    InvalidSeedLength {
        /// Expected seed length in bytes
        expected: usize,
        /// Actual seed length in bytes
        actual: usize,
    },

    /// Public key bytes did not decode to a valid curve point
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Signature verification failed
    #[error("signature verification failed")]
    VerificationFailed,
}
