//! # Launch Entities
//!
//! The roster and snapshot inputs consumed by the bootstrap core. Both are
//! ordered sequences whose file order is load-bearing: roster order feeds
//! the shuffle, snapshot order fixes seeded-account derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::TokenAmount;

/// A ledger account name.
///
/// Account names follow the base-32 ledger naming rules (lowercase letters,
/// digits `1-5`, dots, at most 13 characters). The newtype keeps account
/// names from being confused with public keys or addresses in signatures.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    /// Create an account name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// View as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty name.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for AccountName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A candidate operator from the launch roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// The operator's ledger account name.
    pub account: AccountName,
    /// The operator's public key, hex-encoded.
    pub public_key: String,
    /// The operator's published endpoint, used for candidate registration.
    #[serde(default)]
    pub url: String,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.account, self.public_key)
    }
}

/// The ordered candidate-operator list, fixed before shuffling.
///
/// Order is launch-file order and is immutable for the run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<Operator>);

impl Roster {
    /// Build a roster from an ordered operator list.
    pub fn new(operators: Vec<Operator>) -> Self {
        Self(operators)
    }

    /// Number of candidate operators.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no operators were listed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate operators in launch-file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Operator> {
        self.0.iter()
    }

    /// Operators as a slice, launch-file order.
    pub fn as_slice(&self) -> &[Operator] {
        &self.0
    }

    /// Find the operator definition for an account, if listed.
    pub fn find(&self, account: &AccountName) -> Option<&Operator> {
        self.0.iter().find(|op| &op.account == account)
    }
}

/// An external holder whose balance is seeded at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    /// The holder's address on the external source chain.
    pub external_address: String,
    /// The holder's public key on the new ledger, hex-encoded.
    pub public_key: String,
    /// The balance to seed.
    pub balance: TokenAmount,
}

/// The ordered list of external holders, snapshot-file order.
///
/// Order determines seeded-account derivation: holder N receives the
/// account derived from position N (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<Holder>);

impl Snapshot {
    /// Build a snapshot from an ordered holder list.
    pub fn new(holders: Vec<Holder>) -> Self {
        Self(holders)
    }

    /// Number of holders.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate holders in snapshot order.
    pub fn iter(&self) -> std::slice::Iter<'_, Holder> {
        self.0.iter()
    }
}
