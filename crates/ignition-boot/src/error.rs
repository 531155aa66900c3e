//! Error types for the bootstrap engine

use ignition_types::AccountName;
use thiserror::Error;

use crate::ports::outbound::{
    LedgerError, NetworkError, NotificationError, SignerError, WaitError,
};

/// Result type alias for bootstrap operations
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Errors that abort a bootstrap run.
///
/// The first failure is fatal: no stage retries automatically and no
/// partial-progress checkpoint exists. A failed run restarts from the
/// beginning; already-applied ledger mutations are not rolled back, so
/// re-runs tolerate `AccountExists`-style outcomes where applicable.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Local identity absent from the launch roster; raised before any
    /// ledger action
    #[error("account {0} is not in the launch roster")]
    NotInRoster(AccountName),

    /// A ledger call failed, wrapped with the originating stage label
    #[error("{stage}: {source}")]
    Ledger {
        /// Stage label, e.g. `"newaccount genesis.1111"`
        stage: String,
        /// The underlying ledger failure
        #[source]
        source: LedgerError,
    },

    /// A policy-fatal notification dispatch failed
    #[error("notification dispatch failed: {0}")]
    Notification(#[from] NotificationError),

    /// Signer could not import or use a key
    #[error("signer: {0}")]
    Signer(#[from] SignerError),

    /// A bounded wait on external input expired or was cut off
    #[error("waiting for {phase}: {source}")]
    Wait {
        /// What was being waited for (`"kickstart"`, `"relay"`)
        phase: &'static str,
        /// The underlying wait failure
        #[source]
        source: WaitError,
    },

    /// Network connectivity or sync failure
    #[error("network: {0}")]
    Network(#[from] NetworkError),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BootstrapError {
    /// Wrap a ledger failure with its originating stage label.
    pub fn ledger(stage: impl Into<String>, source: LedgerError) -> Self {
        Self::Ledger {
            stage: stage.into(),
            source,
        }
    }

    /// Wrap a wait failure with the phase that was blocked.
    pub fn wait(phase: &'static str, source: WaitError) -> Self {
        Self::Wait { phase, source }
    }
}
