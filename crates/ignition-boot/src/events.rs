//! Lifecycle Events
//!
//! Structured payloads dispatched through the [`crate::ports::Notifier`]
//! at each bootstrap lifecycle point. Payloads are snapshots of the state
//! relevant to the event: external consumers (webhooks, dashboards,
//! operator tooling) key off `event` and read the rest.

use ignition_types::AccountName;
use serde::{Deserialize, Serialize};

use crate::domain::genesis::GenesisDocument;
use crate::domain::kickstart::{Endorsement, KickstartBundle};
use crate::domain::roles::Role;

/// One bootstrap lifecycle event with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// Setup is done and the run is starting
    Init {
        /// Genesis preview built from the local operator's key
        genesis: GenesisDocument,
        /// The local operator's account
        account: AccountName,
    },

    /// The origin's configuration is ready; carries the ephemeral keypair
    ConfigReady {
        /// The genesis document the network will start from
        genesis: GenesisDocument,
        /// The origin operator's account
        origin: AccountName,
        /// Ephemeral admin public key, hex-encoded
        public_key: String,
        /// Ephemeral admin private key, hex-encoded
        private_key: String,
        /// Whether sabotage-capable mode is active for this run
        sabotage_enabled: bool,
    },

    /// A delegate or follower is connecting to a published peer address
    ConnectingToOrigin {
        /// The connecting node's account
        account: AccountName,
        /// The address being dialed
        p2p_address: String,
    },

    /// The origin published the kickstart bundle
    KickstartPublished {
        /// The bundle delegates consume
        bundle: KickstartBundle,
    },

    /// A delegate endorsed the kickstart bundle
    EndorsementPublished {
        /// The signed attestation, including the delegate's own address
        endorsement: Endorsement,
    },

    /// A delegate refused to endorse a bundle that failed verification
    SabotageDeclared {
        /// The sabotaging delegate's account
        account: AccountName,
        /// The first verification mismatch observed
        reason: String,
    },

    /// The role-specific sequence finished
    BootstrapComplete {
        /// The local operator's account
        account: AccountName,
        /// The role the node played
        role: Role,
    },
}

impl LifecycleEvent {
    /// Stable event name, the `event` tag of the wire form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::ConfigReady { .. } => "config_ready",
            Self::ConnectingToOrigin { .. } => "connecting_to_origin",
            Self::KickstartPublished { .. } => "kickstart_published",
            Self::EndorsementPublished { .. } => "endorsement_published",
            Self::SabotageDeclared { .. } => "sabotage_declared",
            Self::BootstrapComplete { .. } => "bootstrap_complete",
        }
    }
}
