//! Adapter wiring.
//!
//! Builds the port set for a rehearsal run: the in-memory ledger and
//! signer, the tracing notifier, the loopback network, and channel-backed
//! kickstart/relay inputs. Real ledger and transport clients implement
//! the same ports and slot in here.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use ignition_boot::adapters::{
    ChannelKickstartSource, ChannelRelaySource, InMemoryLedger, InMemorySigner, LoopbackNetwork,
    TracingNotifier,
};
use ignition_boot::domain::kickstart::{KickstartBundle, RelayMessage};
use ignition_boot::ports::Signer;
use ignition_boot::{shuffle_roster, BootConfig, BootPorts, ShuffleResult};
use ignition_types::Roster;
use tokio::sync::mpsc;
use tracing::info;

use crate::loader::NodeConfig;

/// Rehearsal chain identifier for the in-memory ledger.
const REHEARSAL_CHAIN_ID: [u8; 4] = [0x19, 0x77, 0x00, 0x01];

/// The wired ports plus the input senders the shell keeps alive.
pub struct Wiring {
    /// Ports handed to the orchestrator
    pub ports: BootPorts,
    /// Feeds kickstart bundles to a delegate run
    pub kickstart_tx: mpsc::Sender<KickstartBundle>,
    /// Feeds relay messages to a follower run
    pub relay_tx: mpsc::Sender<RelayMessage>,
}

/// Build the rehearsal port set.
pub async fn build(config: &NodeConfig) -> Result<Wiring> {
    let signer = Arc::new(InMemorySigner::new());
    if let Some(key) = &config.private_key {
        let public_key = signer
            .import_key(key)
            .await
            .context("importing operator private key")?;
        info!("[node] operator key {public_key} imported into the run signer");
    }

    let (kickstart_tx, kickstart) = ChannelKickstartSource::new();
    let (relay_tx, relay) = ChannelRelaySource::new();

    let ports = BootPorts {
        ledger: Arc::new(InMemoryLedger::new(REHEARSAL_CHAIN_ID.to_vec())),
        notifier: Arc::new(TracingNotifier::new()),
        signer,
        network: Arc::new(LoopbackNetwork::new()),
        kickstart: Arc::new(kickstart),
        relay: Arc::new(relay),
    };
    Ok(Wiring {
        ports,
        kickstart_tx,
        relay_tx,
    })
}

/// Compute the run's shuffle from configuration.
pub fn compute_shuffle(boot: &BootConfig, roster: &Roster) -> Result<ShuffleResult> {
    if boot.no_shuffle {
        info!("[node] no_shuffle set: identity permutation, zero entropy sentinel");
        return Ok(shuffle_roster(roster, &[], Utc::now(), true));
    }
    let commitment_hex = boot
        .entropy_commitment
        .as_ref()
        .context("entropy_commitment is required unless no_shuffle is set")?;
    let commitment =
        hex::decode(commitment_hex).context("entropy_commitment is not valid hex")?;
    let timestamp = boot
        .shuffle_time
        .context("shuffle_time is required unless no_shuffle is set")?;
    Ok(shuffle_roster(roster, &commitment, timestamp, false))
}
