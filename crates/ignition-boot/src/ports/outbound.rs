//! Outbound ports (driven side - SPI)
//!
//! The bootstrap core consumes its collaborators through these traits:
//! the ledger that executes on-chain mutations, the notifier that fans out
//! lifecycle events, the run-scoped signer, the out-of-band kickstart and
//! relay inputs, and peer networking. Transports live in adapters.

use std::time::Duration;

use async_trait::async_trait;
use ignition_types::{AccountName, TokenAmount};
use thiserror::Error;

use crate::domain::kickstart::{KickstartBundle, RelayMessage};
use crate::events::LifecycleEvent;

/// Result type alias for ledger calls
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors surfaced by ledger calls.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The account already exists. Re-runs treat this as
    /// success-equivalent where the sequence allows it.
    #[error("account {0} already exists")]
    AccountExists(AccountName),

    /// The ledger rejected the transaction
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// Transport-level failure reaching the ledger
    #[error("ledger connection: {0}")]
    Connection(String),
}

impl LedgerError {
    /// True for "already exists" outcomes that a re-run tolerates.
    pub fn is_account_exists(&self) -> bool {
        matches!(self, Self::AccountExists(_))
    }
}

/// Receipt for an accepted ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Transaction identifier assigned by the ledger
    pub transaction_id: String,
}

/// On-ledger account state returned by [`Ledger::get_account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    /// The account name
    pub account: AccountName,
    /// Hex-encoded owner-permission key
    pub owner_key: String,
    /// Hex-encoded active-permission key
    pub active_key: String,
    /// Owner-permission threshold
    pub owner_threshold: u32,
    /// Active-permission threshold
    pub active_threshold: u32,
}

/// A wire action included in a signed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Update a named permission's authority on an account
    UpdateAuth {
        /// Account whose authority changes
        account: AccountName,
        /// Permission being updated (`"active"`, `"owner"`)
        permission: String,
        /// Parent permission (empty for `"owner"`)
        parent: String,
        /// New signing threshold
        threshold: u32,
        /// Key retained in the authority, hex-encoded
        key: String,
        /// Weight of the retained key
        weight: u16,
    },
}

/// Port: execute on-ledger mutations.
///
/// Calls are blocking from the sequencer's point of view: the next stage
/// never starts until the previous call returned. Ordering is part of the
/// observable contract.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// The target ledger's chain identifier.
    async fn chain_id(&self) -> LedgerResult<Vec<u8>>;

    /// Deploy the system contract artifacts to an account.
    async fn deploy_system_contract(
        &self,
        account: &AccountName,
        code: &[u8],
        abi: &[u8],
    ) -> LedgerResult<TxReceipt>;

    /// Create a new account keyed to `owner_key`.
    async fn create_account(
        &self,
        creator: &AccountName,
        new_account: &AccountName,
        owner_key: &str,
    ) -> LedgerResult<TxReceipt>;

    /// Issue tokens to an account.
    async fn issue(&self, to: &AccountName, amount: &TokenAmount) -> LedgerResult<TxReceipt>;

    /// Transfer tokens between accounts with a human-readable memo.
    async fn transfer(
        &self,
        from: &AccountName,
        to: &AccountName,
        amount: &TokenAmount,
        memo: &str,
    ) -> LedgerResult<TxReceipt>;

    /// Sign and broadcast a batch of actions atomically.
    async fn sign_and_broadcast(&self, actions: &[Action]) -> LedgerResult<TxReceipt>;

    /// Fetch an account's current keys and thresholds.
    async fn get_account(&self, account: &AccountName) -> LedgerResult<AccountInfo>;

    /// Announce an account as a candidate operator.
    async fn register_operator(
        &self,
        account: &AccountName,
        public_key: &str,
        url: &str,
    ) -> LedgerResult<TxReceipt>;
}

/// Errors surfaced by notification dispatch.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The dispatch transport failed
    #[error("{0}")]
    Dispatch(String),
}

/// Port: fire-and-forget dispatch of lifecycle events.
///
/// Failures are reported but do not abort the bootstrap unless the call
/// site treats them as fatal by policy.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Dispatch one lifecycle event with its structured payload.
    async fn dispatch(&self, event: LifecycleEvent) -> Result<(), NotificationError>;
}

/// Errors surfaced by the signer.
#[derive(Debug, Error)]
pub enum SignerError {
    /// No key registered for the given public key
    #[error("no key registered for {0}")]
    UnknownKey(String),

    /// The private key could not be imported
    #[error("key import failed: {0}")]
    ImportFailed(String),
}

/// Port: the local signer's key set, scoped to the run.
///
/// The origin imports its ephemeral key here once; every subsequent sign
/// in the same run uses it. Shared mutable state, one run in flight.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Import a hex-encoded private key; returns the derived public key.
    async fn import_key(&self, private_key_hex: &str) -> Result<String, SignerError>;

    /// Sign a 32-byte digest with the key registered for `public_key`.
    async fn sign_digest(
        &self,
        public_key: &str,
        digest: &[u8; 32],
    ) -> Result<Vec<u8>, SignerError>;

    /// Whether a key is registered for `public_key`.
    async fn has_key(&self, public_key: &str) -> bool;
}

/// Errors surfaced by bounded waits on external input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaitError {
    /// The wait expired before input arrived
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// The input source shut down
    #[error("input source closed")]
    Closed,
}

/// Port: out-of-band kickstart input for delegates.
#[async_trait]
pub trait KickstartSource: Send + Sync {
    /// Block until a kickstart bundle arrives, up to `timeout`.
    async fn await_kickstart(&self, timeout: Duration) -> Result<KickstartBundle, WaitError>;
}

/// Port: delegate-relayed bundle input for followers.
#[async_trait]
pub trait RelaySource: Send + Sync {
    /// Block until a relay message arrives, up to `timeout`.
    async fn await_relay(&self, timeout: Duration) -> Result<RelayMessage, WaitError>;
}

/// Errors surfaced by peer networking.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connecting to a peer failed
    #[error("connect {address}: {reason}")]
    Connect {
        /// The peer address
        address: String,
        /// Transport-level reason
        reason: String,
    },

    /// The node did not sync within the allowed window
    #[error("sync did not complete within {0:?}")]
    SyncTimeout(Duration),
}

/// Port: peer connectivity for the handshake's network legs.
#[async_trait]
pub trait PeerNetwork: Send + Sync {
    /// Establish connectivity to a peer address.
    async fn connect(&self, address: &str) -> Result<(), NetworkError>;

    /// Block until the local node is synced with the network.
    async fn await_synced(&self, timeout: Duration) -> Result<(), NetworkError>;
}
