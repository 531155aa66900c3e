//! Follower Sequencer
//!
//! State machine for the follower role:
//!
//! ```text
//! AwaitRelay -> Sync -> Register -> Done
//! ```
//!
//! No sabotage state: a follower trusts that delegates already verified
//! the launch, so it syncs as soon as a delegate-relayed bundle arrives.
//! Candidate registration at the end is optional per configuration.

use std::sync::Arc;
use std::time::Duration;

use ignition_types::Operator;
use tracing::{debug, info};

use crate::config::BootConfig;
use crate::domain::kickstart::RelayMessage;
use crate::domain::roles::Role;
use crate::error::{BootstrapError, Result};
use crate::events::LifecycleEvent;
use crate::ports::inbound::BootOutcome;
use crate::ports::outbound::{Ledger, Notifier, PeerNetwork, RelaySource};
use crate::sequencer::dispatch_best_effort;

/// States of the follower machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowerState {
    /// Blocked on a delegate-relayed bundle
    AwaitRelay,
    /// Connecting to the relaying delegate and syncing
    Sync(RelayMessage),
    /// Optionally registering as candidate operator
    Register,
    /// Terminal
    Done,
}

impl FollowerState {
    /// Whether the machine halts in this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::AwaitRelay => "await_relay",
            Self::Sync(_) => "sync",
            Self::Register => "register",
            Self::Done => "done",
        }
    }
}

/// Driver for the follower role.
pub struct FollowerSequencer {
    config: BootConfig,
    ledger: Arc<dyn Ledger>,
    notifier: Arc<dyn Notifier>,
    network: Arc<dyn PeerNetwork>,
    relay: Arc<dyn RelaySource>,
}

impl FollowerSequencer {
    /// Create the sequencer with its collaborators.
    pub fn new(
        config: BootConfig,
        ledger: Arc<dyn Ledger>,
        notifier: Arc<dyn Notifier>,
        network: Arc<dyn PeerNetwork>,
        relay: Arc<dyn RelaySource>,
    ) -> Self {
        Self {
            config,
            ledger,
            notifier,
            network,
            relay,
        }
    }

    /// Drive the machine to `Done`.
    pub async fn run(&self, me: &Operator) -> Result<BootOutcome> {
        let mut state = FollowerState::AwaitRelay;

        while !state.is_terminal() {
            let next = self.step(state.clone(), me).await?;
            debug!("[boot] follower {} -> {}", state.label(), next.label());
            state = next;
        }

        dispatch_best_effort(
            &*self.notifier,
            LifecycleEvent::BootstrapComplete {
                account: me.account.clone(),
                role: Role::Follower,
            },
        )
        .await;
        Ok(BootOutcome::Completed)
    }

    /// One transition of the machine.
    async fn step(&self, state: FollowerState, me: &Operator) -> Result<FollowerState> {
        match state {
            FollowerState::AwaitRelay => {
                let timeout = Duration::from_secs(self.config.relay_timeout_secs);
                info!(
                    "[boot] waiting for a delegate relay (up to {}s)",
                    timeout.as_secs()
                );
                let relay = self
                    .relay
                    .await_relay(timeout)
                    .await
                    .map_err(|e| BootstrapError::wait("relay", e))?;
                info!(
                    "[boot] relay received from delegate {}",
                    relay.endorsement.account
                );
                Ok(FollowerState::Sync(relay))
            }

            FollowerState::Sync(relay) => {
                let address = &relay.endorsement.p2p_address;
                self.network.connect(address).await?;
                dispatch_best_effort(
                    &*self.notifier,
                    LifecycleEvent::ConnectingToOrigin {
                        account: me.account.clone(),
                        p2p_address: address.clone(),
                    },
                )
                .await;
                let timeout = Duration::from_secs(self.config.sync_timeout_secs);
                self.network.await_synced(timeout).await?;
                info!("[boot] synced with the network");
                Ok(FollowerState::Register)
            }

            FollowerState::Register => {
                if self.config.register_as_candidate {
                    self.ledger
                        .register_operator(&me.account, &me.public_key, &me.url)
                        .await
                        .map_err(|e| BootstrapError::ledger("regoperator", e))?;
                    info!("[boot] registered as candidate operator");
                } else {
                    info!("[boot] candidate registration disabled, skipping");
                }
                Ok(FollowerState::Done)
            }

            FollowerState::Done => Ok(FollowerState::Done),
        }
    }
}
