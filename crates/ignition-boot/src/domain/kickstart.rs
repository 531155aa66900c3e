//! Kickstart Payloads
//!
//! The origin publishes a kickstart bundle out-of-band so delegates can
//! locate and validate the new network. Delegates that pass verification
//! endorse the bundle with a signed attestation carrying their own
//! reachable address; followers consume delegate-relayed bundles. Transit
//! encryption and encoding are transport concerns behind the receiver
//! ports; this module fixes the shapes and the signing digest.

use ignition_types::AccountName;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The payload the origin publishes so delegates can join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickstartBundle {
    /// The origin node's reachable peer address
    pub p2p_address: String,
    /// The target ledger's chain identifier, hex-encoded
    pub chain_id: String,
    /// The ephemeral admin private key, hex-encoded
    pub ephemeral_private_key: String,
}

impl KickstartBundle {
    /// Digest delegates sign when endorsing the bundle.
    ///
    /// Fields are length-prefixed so adjacent fields cannot be confused.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for field in [&self.p2p_address, &self.chain_id, &self.ephemeral_private_key] {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
        hasher.finalize().into()
    }
}

/// A delegate's signed attestation endorsing the kickstart bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endorsement {
    /// The endorsing delegate's account
    pub account: AccountName,
    /// The delegate's own reachable peer address
    pub p2p_address: String,
    /// Signature over the bundle digest, hex-encoded
    pub signature: String,
}

/// A delegate-relayed bundle a follower consumes.
///
/// References the same ephemeral key material as the origin's bundle, but
/// arrives via a delegate rather than the origin directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayMessage {
    /// The original kickstart bundle
    pub bundle: KickstartBundle,
    /// The relaying delegate's endorsement
    pub endorsement: Endorsement,
}
