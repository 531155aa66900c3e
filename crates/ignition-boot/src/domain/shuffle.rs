//! Deterministic Roster Shuffle
//!
//! Computes the launch permutation of the candidate roster from an external
//! entropy commitment. The permutation is a pure function of
//! `(roster, commitment, timestamp)`: any observer holding the same inputs
//! re-derives the same order bit-for-bit. Unpredictability comes from the
//! commitment being fixed by an event no operator controls, after the
//! roster is finalized and before the shuffle is computed; that sourcing is
//! policy outside this module.

use chrono::{DateTime, Utc};
use ignition_types::{Operator, Roster};
use sha2::{Digest, Sha256};

/// Zero-filled sentinel commitment recorded by `no_shuffle` runs.
pub const ZERO_COMMITMENT: [u8; 32] = [0u8; 32];

/// The shuffled roster plus the inputs it was derived from.
///
/// Computed once per run and immutable thereafter; all role queries derive
/// from it. Index 0 is the origin operator, indices 1..=21 (as available)
/// are delegates, the rest are followers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleResult {
    /// Timestamp of the entropy commitment (or `now` for `no_shuffle`)
    pub timestamp: DateTime<Utc>,
    /// The entropy commitment the permutation was derived from
    pub entropy_commitment: Vec<u8>,
    /// The permuted roster
    pub shuffled: Vec<Operator>,
}

impl ShuffleResult {
    /// The origin operator, if the roster was non-empty.
    pub fn origin(&self) -> Option<&Operator> {
        self.shuffled.first()
    }

    /// The delegate operators: at most [`crate::MAX_DELEGATES`] entries
    /// following the origin.
    pub fn delegates(&self) -> &[Operator] {
        let end = self.shuffled.len().min(crate::MAX_DELEGATES + 1);
        if self.shuffled.len() < 2 {
            return &[];
        }
        &self.shuffled[1..end]
    }
}

/// Shuffle the roster.
///
/// With `no_shuffle` set the roster passes through unpermuted, the
/// timestamp is `now`, and the commitment is the zero sentinel: a
/// development mode with no fairness guarantee. Otherwise the permutation
/// is a Fisher-Yates pass driven by a SHA-256 counter stream seeded from
/// the commitment and timestamp.
pub fn shuffle_roster(
    roster: &Roster,
    entropy_commitment: &[u8],
    timestamp: DateTime<Utc>,
    no_shuffle: bool,
) -> ShuffleResult {
    if no_shuffle {
        return ShuffleResult {
            timestamp: Utc::now(),
            entropy_commitment: ZERO_COMMITMENT.to_vec(),
            shuffled: roster.as_slice().to_vec(),
        };
    }

    let mut shuffled = roster.as_slice().to_vec();
    let mut stream = DigestStream::new(entropy_commitment, timestamp);
    // Fisher-Yates, back to front
    for i in (1..shuffled.len()).rev() {
        let j = stream.uniform_below(i as u64 + 1) as usize;
        shuffled.swap(i, j);
    }

    ShuffleResult {
        timestamp,
        entropy_commitment: entropy_commitment.to_vec(),
        shuffled,
    }
}

/// SHA-256 counter-mode stream over `(commitment, timestamp)`.
struct DigestStream {
    seed: [u8; 32],
    counter: u64,
    block: [u8; 32],
    offset: usize,
}

impl DigestStream {
    fn new(commitment: &[u8], timestamp: DateTime<Utc>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(commitment);
        hasher.update(timestamp.timestamp().to_le_bytes());
        Self {
            seed: hasher.finalize().into(),
            counter: 0,
            block: [0u8; 32],
            offset: 32, // force a refill on first draw
        }
    }

    fn next_u64(&mut self) -> u64 {
        if self.offset + 8 > self.block.len() {
            let mut hasher = Sha256::new();
            hasher.update(self.seed);
            hasher.update(self.counter.to_le_bytes());
            self.block = hasher.finalize().into();
            self.counter += 1;
            self.offset = 0;
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.block[self.offset..self.offset + 8]);
        self.offset += 8;
        u64::from_le_bytes(bytes)
    }

    /// Unbiased draw in `[0, bound)` via rejection sampling.
    fn uniform_below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        // 2^64 mod bound; draws below this would skew the distribution
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let v = self.next_u64();
            if v >= threshold {
                return v % bound;
            }
        }
    }
}
