//! Genesis Document
//!
//! The document new-network nodes consume to start from the same initial
//! state. Derived solely from the shuffle timestamp, the ephemeral admin
//! public key, and the target ledger's chain identifier; immutable once
//! built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The genesis document wire shape.
///
/// The timestamp is truncated to second precision and rendered without a
/// timezone suffix (implicit UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisDocument {
    /// UTC timestamp, second precision, no offset suffix
    pub initial_timestamp: String,
    /// The ephemeral admin public key
    pub initial_key: String,
    /// The target ledger's chain identifier, hex-encoded
    pub initial_chain_id: String,
}

impl GenesisDocument {
    /// Build the genesis document. Pure and total for well-formed inputs.
    pub fn build(timestamp: DateTime<Utc>, public_key: &str, chain_id: &[u8]) -> Self {
        Self {
            initial_timestamp: timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            initial_key: public_key.to_owned(),
            initial_chain_id: hex::encode(chain_id),
        }
    }

    /// Render the JSON wire form.
    pub fn to_json(&self) -> String {
        // a struct of three strings cannot fail to serialize
        serde_json::to_string(self).expect("genesis document serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_has_no_offset_suffix() {
        let t = Utc.with_ymd_and_hms(2026, 6, 1, 12, 34, 56).unwrap();
        let genesis = GenesisDocument::build(t, "aabbcc", &[0xde, 0xad]);
        assert_eq!(genesis.initial_timestamp, "2026-06-01T12:34:56");
        assert!(!genesis.initial_timestamp.ends_with('Z'));
        assert!(!genesis.initial_timestamp.contains('+'));
    }

    #[test]
    fn test_subsecond_precision_is_truncated() {
        let t = Utc
            .with_ymd_and_hms(2026, 6, 1, 12, 34, 56)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(987))
            .unwrap();
        let genesis = GenesisDocument::build(t, "k", &[]);
        assert_eq!(genesis.initial_timestamp, "2026-06-01T12:34:56");
    }

    #[test]
    fn test_json_round_trip() {
        let t = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let genesis = GenesisDocument::build(t, "0a0b0c", &[0x12, 0x34, 0xff]);

        let json = genesis.to_json();
        assert!(json.contains("\"initial_timestamp\""));
        assert!(json.contains("\"initial_key\""));
        assert!(json.contains("\"initial_chain_id\":\"1234ff\""));

        let parsed: GenesisDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, genesis);
    }
}
