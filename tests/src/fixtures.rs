//! Shared fixtures: rosters, snapshots, and wired port sets.

use std::sync::Arc;

use ignition_boot::adapters::{
    ChannelKickstartSource, ChannelRelaySource, InMemoryLedger, InMemorySigner, LoopbackNetwork,
    RecordingNotifier,
};
use ignition_boot::domain::kickstart::{KickstartBundle, RelayMessage};
use ignition_boot::ports::outbound::AccountInfo;
use ignition_boot::{BootConfig, BootPorts};
use ignition_types::{AccountName, Holder, Operator, Roster, Snapshot, Symbol, TokenAmount};
use tokio::sync::mpsc;

/// Chain identifier used by every fixture ledger.
pub const CHAIN_ID: [u8; 2] = [0xca, 0xfe];

/// An operator with derived key and url.
pub fn operator(name: &str) -> Operator {
    Operator {
        account: AccountName::from(name),
        public_key: format!("pk-{name}"),
        url: format!("p2p://{name}"),
    }
}

/// A roster of `n` operators named `op0..opN`, launch-file order.
pub fn roster(n: usize) -> Roster {
    Roster::new((0..n).map(|i| operator(&format!("op{i}"))).collect())
}

/// The two-holder snapshot from the launch dry-runs.
pub fn snapshot() -> Snapshot {
    let ign = Symbol::new("IGN", 4);
    Snapshot::new(vec![
        Holder {
            external_address: "0xABCDEF123456".into(),
            public_key: "hk-1".into(),
            balance: TokenAmount::new(1_000_000, ign.clone()),
        },
        Holder {
            external_address: "0x000000654321".into(),
            public_key: "hk-2".into(),
            balance: TokenAmount::new(500_000, ign),
        },
    ])
}

/// Boot configuration for `account` with short test timeouts.
pub fn config(account: &str) -> BootConfig {
    let mut config: BootConfig = serde_json::from_value(serde_json::json!({
        "account": account,
        "no_shuffle": true,
        "p2p_address": "10.0.0.1:9876",
    }))
    .expect("fixture config deserializes");
    config.kickstart_timeout_secs = 1;
    config.relay_timeout_secs = 1;
    config.contract.code = vec![0x00, 0x61, 0x73, 0x6d];
    config.contract.abi = b"{}".to_vec();
    config
}

/// A wired port set plus handles to everything observable.
pub struct TestPorts {
    pub ports: BootPorts,
    pub ledger: Arc<InMemoryLedger>,
    pub notifier: Arc<RecordingNotifier>,
    pub signer: Arc<InMemorySigner>,
    pub network: Arc<LoopbackNetwork>,
    pub kickstart_tx: mpsc::Sender<KickstartBundle>,
    pub relay_tx: mpsc::Sender<RelayMessage>,
}

/// Wire a fresh in-memory port set.
pub fn test_ports() -> TestPorts {
    test_ports_on(Arc::new(InMemoryLedger::new(CHAIN_ID.to_vec())))
}

/// Wire a port set over an existing ledger (for re-run flows).
pub fn test_ports_on(ledger: Arc<InMemoryLedger>) -> TestPorts {
    let notifier = Arc::new(RecordingNotifier::new());
    let signer = Arc::new(InMemorySigner::new());
    let network = Arc::new(LoopbackNetwork::new());
    let (kickstart_tx, kickstart) = ChannelKickstartSource::new();
    let (relay_tx, relay) = ChannelRelaySource::new();

    let ports = BootPorts {
        ledger: ledger.clone(),
        notifier: notifier.clone(),
        signer: signer.clone(),
        network: network.clone(),
        kickstart: Arc::new(kickstart),
        relay: Arc::new(relay),
    };
    TestPorts {
        ports,
        ledger,
        notifier,
        signer,
        network,
        kickstart_tx,
        relay_tx,
    }
}

/// Seed an account on the fixture ledger as if it already existed.
pub fn preset_account(ledger: &InMemoryLedger, name: &str, owner_key: &str) {
    ledger.preset_account(AccountInfo {
        account: AccountName::from(name),
        owner_key: owner_key.to_owned(),
        active_key: owner_key.to_owned(),
        owner_threshold: 1,
        active_threshold: 1,
    });
}

/// A kickstart bundle matching the fixture chain.
pub fn kickstart_bundle() -> KickstartBundle {
    KickstartBundle {
        p2p_address: "10.0.0.1:9876".into(),
        chain_id: hex::encode(CHAIN_ID),
        ephemeral_private_key: "00".repeat(32),
    }
}
