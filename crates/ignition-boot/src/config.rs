//! Configuration types for the bootstrap run

use chrono::{DateTime, Utc};
use ignition_types::{AccountName, Symbol, TokenAmount};
use serde::Deserialize;

use crate::error::{BootstrapError, Result};

/// Runtime configuration for a single bootstrap attempt.
///
/// One attempt is in flight per node; the configuration is read-only for
/// the duration of the run.
#[derive(Clone, Debug, Deserialize)]
pub struct BootConfig {
    /// The local operator's account name
    pub account: AccountName,

    /// Skip the shuffle: identity permutation, zero entropy sentinel.
    /// Development/test determinism mode, no fairness guarantee.
    #[serde(default)]
    pub no_shuffle: bool,

    /// Hex-encoded entropy commitment driving the shuffle. Required unless
    /// `no_shuffle` is set; sourced from an event no operator controls.
    #[serde(default)]
    pub entropy_commitment: Option<String>,

    /// Timestamp of the entropy commitment. Required unless `no_shuffle`.
    #[serde(default)]
    pub shuffle_time: Option<DateTime<Utc>>,

    /// The well-known system account receiving code and supply
    #[serde(default = "default_system_account")]
    pub system_account: AccountName,

    /// Token issuance parameters
    #[serde(default)]
    pub token: TokenConfig,

    /// This node's reachable peer address, published in kickstart and
    /// endorsement payloads
    pub p2p_address: String,

    /// Cap on snapshot holders to seed. `None` seeds the full snapshot;
    /// a cap is logged loudly when active.
    #[serde(default)]
    pub seed_limit: Option<usize>,

    /// Seconds a delegate waits for the kickstart bundle
    #[serde(default = "default_wait_secs")]
    pub kickstart_timeout_secs: u64,

    /// Seconds a follower waits for a relay message
    #[serde(default = "default_wait_secs")]
    pub relay_timeout_secs: u64,

    /// Seconds a follower waits for network sync after connecting
    #[serde(default = "default_sync_secs")]
    pub sync_timeout_secs: u64,

    /// Authority threshold applied to the system account at lockdown.
    /// Must be above the ephemeral key's weight of 1.
    #[serde(default = "default_lockdown_threshold")]
    pub lockdown_threshold: u32,

    /// Register this node as a candidate operator at the end of its
    /// sequence (followers may opt out)
    #[serde(default = "default_true")]
    pub register_as_candidate: bool,

    /// Whether sabotage-capable mode is active for this run; forwarded in
    /// the `ConfigReady` payload
    #[serde(default = "default_true")]
    pub sabotage_enabled: bool,

    /// System contract artifacts, loaded by the outer shell
    #[serde(skip)]
    pub contract: ContractArtifacts,
}

impl BootConfig {
    /// Validate invariants that serde defaults cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.account.is_empty() {
            return Err(BootstrapError::InvalidConfig("account is empty".into()));
        }
        if self.p2p_address.is_empty() {
            return Err(BootstrapError::InvalidConfig("p2p_address is empty".into()));
        }
        if !self.no_shuffle && self.entropy_commitment.is_none() {
            return Err(BootstrapError::InvalidConfig(
                "entropy_commitment is required unless no_shuffle is set".into(),
            ));
        }
        if !self.no_shuffle && self.shuffle_time.is_none() {
            return Err(BootstrapError::InvalidConfig(
                "shuffle_time is required unless no_shuffle is set".into(),
            ));
        }
        if self.lockdown_threshold < 2 {
            return Err(BootstrapError::InvalidConfig(
                "lockdown_threshold must leave the ephemeral key insufficient alone".into(),
            ));
        }
        Symbol::try_new(&self.token.symbol_code, self.token.precision)
            .map_err(|e| BootstrapError::InvalidConfig(e.to_string()))?;
        Ok(())
    }
}

/// Token issuance parameters.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenConfig {
    /// Token symbol code
    pub symbol_code: String,

    /// Decimal precision
    pub precision: u8,

    /// Total initial supply, in base units
    pub total_supply_units: u64,
}

impl TokenConfig {
    /// The configured symbol.
    pub fn symbol(&self) -> Symbol {
        Symbol::new(&self.symbol_code, self.precision)
    }

    /// The total initial supply as an amount.
    pub fn total_supply(&self) -> TokenAmount {
        TokenAmount::new(self.total_supply_units, self.symbol())
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            symbol_code: "IGN".into(),
            precision: 4,
            // 1,000,000,000.0000 IGN
            total_supply_units: 10_000_000_000_000,
        }
    }
}

/// System contract artifacts deployed to the system account.
#[derive(Clone, Debug, Default)]
pub struct ContractArtifacts {
    /// Compiled contract code
    pub code: Vec<u8>,
    /// Contract ABI
    pub abi: Vec<u8>,
}

fn default_system_account() -> AccountName {
    AccountName::from("ignition")
}

fn default_wait_secs() -> u64 {
    crate::DEFAULT_WAIT_TIMEOUT_SECS
}

fn default_sync_secs() -> u64 {
    600
}

fn default_lockdown_threshold() -> u32 {
    crate::DEFAULT_LOCKDOWN_THRESHOLD
}

fn default_true() -> bool {
    true
}
