//! Seeded Account Names
//!
//! Snapshot holders receive accounts derived from their 1-based snapshot
//! position. Ledger account names pack 12 five-bit characters plus one
//! four-bit character into a u64; the seeded base name `genesis.` has its
//! first four little-endian bytes free, and the position is written there
//! big-endian, yielding a distinct short name per position.

use ignition_types::AccountName;

/// Ledger name charset: 5-bit characters, `.` is the zero pad.
const NAME_CHARS: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Base account bytes for seeded names. The high four bytes spell
/// `genesis.` once the low four are zero.
const SEEDED_BASE: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x3b, 0xac, 0xa6, 0x62];

/// Render a packed u64 as a ledger account name.
///
/// The most significant 60 bits hold 12 characters of 5 bits each; the
/// final 4 bits hold a 13th character restricted to `.1-5a-j`. Trailing
/// pad dots are trimmed.
pub fn name_to_string(value: u64) -> String {
    let mut chars = [b'.'; 13];
    let mut tmp = value;
    for i in 0..13 {
        let (mask, shift) = if i == 0 { (0x0f_u64, 4) } else { (0x1f_u64, 5) };
        chars[12 - i] = NAME_CHARS[(tmp & mask) as usize];
        tmp >>= shift;
    }
    let name: String = chars.iter().map(|&b| b as char).collect();
    name.trim_end_matches('.').to_owned()
}

/// Derive the seeded account name for a holder's 1-based snapshot
/// position.
///
/// Positions are pairwise distinct within the u32 namespace: distinct
/// positions produce distinct packed values, and the packing is injective.
pub fn seeded_account_name(position: u32) -> AccountName {
    debug_assert!(position >= 1, "snapshot positions are 1-based");
    let mut bytes = SEEDED_BASE;
    bytes[..4].copy_from_slice(&position.to_be_bytes());
    AccountName::from(name_to_string(u64::from_le_bytes(bytes)))
}
