//! Bootstrap Orchestrator
//!
//! Resolves the local role from the shuffled roster and drives the
//! matching sequencer. State is threaded explicitly: the shuffle result
//! and genesis document are computed once and passed down; each run
//! returns an owned [`BootReport`].

use std::sync::Arc;

use async_trait::async_trait;
use ignition_types::{Roster, Snapshot};
use tracing::info;

use crate::config::BootConfig;
use crate::domain::genesis::GenesisDocument;
use crate::domain::roles::{my_operator_def, Role, RoleIndex};
use crate::domain::shuffle::ShuffleResult;
use crate::error::{BootstrapError, Result};
use crate::events::LifecycleEvent;
use crate::ports::inbound::{BootOutcome, BootReport, BootService};
use crate::ports::outbound::{
    KickstartSource, Ledger, Notifier, PeerNetwork, RelaySource, Signer,
};
use crate::sequencer::{DelegateSequencer, FollowerSequencer, OriginSequencer};

/// The outbound collaborators a run needs, grouped for wiring.
#[derive(Clone)]
pub struct BootPorts {
    /// On-ledger mutations and reads
    pub ledger: Arc<dyn Ledger>,
    /// Lifecycle event dispatch
    pub notifier: Arc<dyn Notifier>,
    /// Run-scoped key set
    pub signer: Arc<dyn Signer>,
    /// Peer connectivity
    pub network: Arc<dyn PeerNetwork>,
    /// Out-of-band kickstart input (delegates)
    pub kickstart: Arc<dyn KickstartSource>,
    /// Delegate-relayed bundle input (followers)
    pub relay: Arc<dyn RelaySource>,
}

/// Drives one bootstrap attempt end to end.
pub struct BootstrapOrchestrator {
    config: BootConfig,
    roster: Roster,
    snapshot: Snapshot,
    shuffle: ShuffleResult,
    ports: BootPorts,
}

impl BootstrapOrchestrator {
    /// Create the orchestrator over an already-computed shuffle.
    pub fn new(
        config: BootConfig,
        roster: Roster,
        snapshot: Snapshot,
        shuffle: ShuffleResult,
        ports: BootPorts,
    ) -> Self {
        Self {
            config,
            roster,
            snapshot,
            shuffle,
            ports,
        }
    }

    /// Resolve the local role and run its sequence.
    pub async fn run(&self) -> Result<BootReport> {
        info!("[boot] bootstrap starting for {}", self.config.account);
        self.config.validate()?;

        // Roster membership gates everything: fail before any ledger action.
        let me = my_operator_def(&self.config.account, &self.roster)?.clone();

        // Init hook with a genesis preview built from the local key.
        let chain_id = self
            .ports
            .ledger
            .chain_id()
            .await
            .map_err(|e| BootstrapError::ledger("get_info", e))?;
        let preview = GenesisDocument::build(self.shuffle.timestamp, &me.public_key, &chain_id);
        self.ports
            .notifier
            .dispatch(LifecycleEvent::Init {
                genesis: preview,
                account: me.account.clone(),
            })
            .await?;

        let roles = RoleIndex::new(&self.shuffle);
        let role = roles.role_of(&me.account);
        self.log_appointed(role);

        let report = match role {
            Role::Origin => {
                let sequencer = OriginSequencer::new(
                    self.config.clone(),
                    self.ports.ledger.clone(),
                    self.ports.notifier.clone(),
                    self.ports.signer.clone(),
                );
                let genesis = sequencer.run(&me, &self.shuffle, &self.snapshot).await?;
                BootReport {
                    role,
                    outcome: BootOutcome::Completed,
                    genesis: Some(genesis),
                }
            }
            Role::Delegate => {
                let sequencer = DelegateSequencer::new(
                    self.config.clone(),
                    self.ports.ledger.clone(),
                    self.ports.notifier.clone(),
                    self.ports.signer.clone(),
                    self.ports.network.clone(),
                    self.ports.kickstart.clone(),
                );
                let outcome = sequencer.run(&me, &self.shuffle).await?;
                BootReport {
                    role,
                    outcome,
                    genesis: None,
                }
            }
            Role::Follower => {
                let sequencer = FollowerSequencer::new(
                    self.config.clone(),
                    self.ports.ledger.clone(),
                    self.ports.notifier.clone(),
                    self.ports.network.clone(),
                    self.ports.relay.clone(),
                );
                let outcome = sequencer.run(&me).await?;
                BootReport {
                    role,
                    outcome,
                    genesis: None,
                }
            }
        };

        info!("[boot] bootstrap finished: {:?}", report.outcome);
        Ok(report)
    }

    /// Log the appointed-operator table and the local role.
    fn log_appointed(&self, role: Role) {
        match role {
            Role::Origin => {
                info!("[boot] stage 0: this node is the origin operator");
            }
            Role::Delegate => {
                info!("[boot] stage 0: this node is a delegate; watching for the origin's kickstart");
            }
            Role::Follower => {
                info!("[boot] stage 0: this node is a follower; waiting for a delegate relay");
            }
        }
        if let Some(origin) = self.shuffle.origin() {
            info!("[boot] origin:      {origin}");
        }
        for (i, delegate) in self.shuffle.delegates().iter().enumerate() {
            info!("[boot] delegate {:02}: {delegate}", i + 1);
        }
    }
}

#[async_trait]
impl BootService for BootstrapOrchestrator {
    async fn bootstrap(&self) -> Result<BootReport> {
        self.run().await
    }
}
