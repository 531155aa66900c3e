//! # Ignition Crypto - Bootstrap Key Material
//!
//! Ed25519 key handling for the bootstrap coordinator.
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `keys` | Ed25519 | Ephemeral admin key, endorsement signing |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency after keygen
//! - Secret seeds are zeroized on drop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod keys;

pub use errors::KeyError;
pub use keys::{EphemeralKeyPair, PublicKeyHex};
