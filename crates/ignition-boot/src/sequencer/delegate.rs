//! Delegate Sequencer
//!
//! State machine for the delegate role:
//!
//! ```text
//! AwaitKickstart -> Connect -> Verify -> Register -> Done
//!                                 |
//!                                 v (any check fails)
//!                              Sabotage
//! ```
//!
//! `Sabotage` is an absorbing, deliberate terminal state: a delegate that
//! observes a launch not matching the shuffle refuses to propagate or
//! corroborate the kickstart bundle, so a malformed network cannot gain
//! the appearance of delegate-endorsed legitimacy. It is an outcome, not
//! an error.

use std::sync::Arc;
use std::time::Duration;

use ignition_types::Operator;
use tracing::{debug, info, warn};

use crate::config::BootConfig;
use crate::domain::kickstart::{Endorsement, KickstartBundle};
use crate::domain::roles::Role;
use crate::domain::shuffle::ShuffleResult;
use crate::error::{BootstrapError, Result};
use crate::events::LifecycleEvent;
use crate::ports::inbound::BootOutcome;
use crate::ports::outbound::{KickstartSource, Ledger, Notifier, PeerNetwork, Signer};
use crate::sequencer::dispatch_best_effort;

/// States of the delegate machine. Data-bearing states carry the bundle
/// being handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateState {
    /// Blocked on the out-of-band kickstart bundle
    AwaitKickstart,
    /// Establishing connectivity to the origin's published address
    Connect(KickstartBundle),
    /// Checking the launch against the expected configuration
    Verify(KickstartBundle),
    /// Registering as candidate and endorsing the bundle
    Register(KickstartBundle),
    /// Terminal: sequence complete
    Done,
    /// Terminal: verification failed, endorsement refused
    Sabotage {
        /// The first mismatch observed
        reason: String,
    },
}

impl DelegateState {
    /// Whether the machine halts in this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Sabotage { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            Self::AwaitKickstart => "await_kickstart",
            Self::Connect(_) => "connect",
            Self::Verify(_) => "verify",
            Self::Register(_) => "register",
            Self::Done => "done",
            Self::Sabotage { .. } => "sabotage",
        }
    }
}

/// Driver for the delegate role.
pub struct DelegateSequencer {
    config: BootConfig,
    ledger: Arc<dyn Ledger>,
    notifier: Arc<dyn Notifier>,
    signer: Arc<dyn Signer>,
    network: Arc<dyn PeerNetwork>,
    kickstart: Arc<dyn KickstartSource>,
}

impl DelegateSequencer {
    /// Create the sequencer with its collaborators.
    pub fn new(
        config: BootConfig,
        ledger: Arc<dyn Ledger>,
        notifier: Arc<dyn Notifier>,
        signer: Arc<dyn Signer>,
        network: Arc<dyn PeerNetwork>,
        kickstart: Arc<dyn KickstartSource>,
    ) -> Self {
        Self {
            config,
            ledger,
            notifier,
            signer,
            network,
            kickstart,
        }
    }

    /// Drive the machine to a terminal state.
    pub async fn run(&self, me: &Operator, shuffle: &ShuffleResult) -> Result<BootOutcome> {
        let mut state = DelegateState::AwaitKickstart;

        while !state.is_terminal() {
            let next = self.step(state.clone(), me, shuffle).await?;
            debug!("[boot] delegate {} -> {}", state.label(), next.label());
            state = next;
        }

        match state {
            DelegateState::Done => {
                dispatch_best_effort(
                    &*self.notifier,
                    LifecycleEvent::BootstrapComplete {
                        account: me.account.clone(),
                        role: Role::Delegate,
                    },
                )
                .await;
                Ok(BootOutcome::Completed)
            }
            DelegateState::Sabotage { reason } => Ok(BootOutcome::Sabotaged { reason }),
            _ => unreachable!("loop exits only on terminal states"),
        }
    }

    /// One transition of the machine.
    async fn step(
        &self,
        state: DelegateState,
        me: &Operator,
        shuffle: &ShuffleResult,
    ) -> Result<DelegateState> {
        match state {
            DelegateState::AwaitKickstart => {
                let timeout = Duration::from_secs(self.config.kickstart_timeout_secs);
                info!(
                    "[boot] waiting for the kickstart bundle (up to {}s)",
                    timeout.as_secs()
                );
                let bundle = self
                    .kickstart
                    .await_kickstart(timeout)
                    .await
                    .map_err(|e| BootstrapError::wait("kickstart", e))?;
                Ok(DelegateState::Connect(bundle))
            }

            DelegateState::Connect(bundle) => {
                self.network.connect(&bundle.p2p_address).await?;
                dispatch_best_effort(
                    &*self.notifier,
                    LifecycleEvent::ConnectingToOrigin {
                        account: me.account.clone(),
                        p2p_address: bundle.p2p_address.clone(),
                    },
                )
                .await;
                Ok(DelegateState::Verify(bundle))
            }

            DelegateState::Verify(bundle) => match self.verify_launch(shuffle).await {
                None => Ok(DelegateState::Register(bundle)),
                Some(reason) => {
                    warn!("[boot] verification failed, refusing to endorse: {reason}");
                    dispatch_best_effort(
                        &*self.notifier,
                        LifecycleEvent::SabotageDeclared {
                            account: me.account.clone(),
                            reason: reason.clone(),
                        },
                    )
                    .await;
                    Ok(DelegateState::Sabotage { reason })
                }
            },

            DelegateState::Register(bundle) => {
                self.register(me, &bundle).await?;
                Ok(DelegateState::Done)
            }

            terminal => Ok(terminal),
        }
    }

    /// Check that every appointed operator's account matches the shuffle.
    ///
    /// Returns the first mismatch, or `None` when the launch checks out.
    async fn verify_launch(&self, shuffle: &ShuffleResult) -> Option<String> {
        let mut expected: Vec<&Operator> = Vec::new();
        expected.extend(shuffle.origin());
        expected.extend(shuffle.delegates());

        for operator in expected {
            match self.ledger.get_account(&operator.account).await {
                Err(e) => {
                    return Some(format!("account {} not on ledger: {e}", operator.account));
                }
                Ok(info) if info.owner_key != operator.public_key => {
                    return Some(format!(
                        "owner key mismatch for {}: expected {}, found {}",
                        operator.account, operator.public_key, info.owner_key
                    ));
                }
                Ok(_) => {}
            }
        }
        None
    }

    /// Register as candidate operator and publish the signed endorsement.
    async fn register(&self, me: &Operator, bundle: &KickstartBundle) -> Result<()> {
        self.ledger
            .register_operator(&me.account, &me.public_key, &me.url)
            .await
            .map_err(|e| BootstrapError::ledger("regoperator", e))?;

        let signature = self
            .signer
            .sign_digest(&me.public_key, &bundle.digest())
            .await?;
        let endorsement = Endorsement {
            account: me.account.clone(),
            p2p_address: self.config.p2p_address.clone(),
            signature: hex::encode(signature),
        };
        dispatch_best_effort(
            &*self.notifier,
            LifecycleEvent::EndorsementPublished { endorsement },
        )
        .await;
        info!("[boot] endorsed the kickstart bundle");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::channel::{ChannelKickstartSource, LoopbackNetwork};
    use crate::adapters::memory::{InMemoryLedger, InMemorySigner};
    use crate::adapters::recording::RecordingNotifier;
    use crate::domain::shuffle::shuffle_roster;
    use crate::ports::outbound::{AccountInfo, WaitError};
    use chrono::Utc;
    use ignition_crypto::EphemeralKeyPair;
    use ignition_types::{AccountName, Roster};
    use tokio::sync::mpsc;

    struct Harness {
        sequencer: DelegateSequencer,
        ledger: Arc<InMemoryLedger>,
        notifier: Arc<RecordingNotifier>,
        network: Arc<LoopbackNetwork>,
        kickstart_tx: mpsc::Sender<KickstartBundle>,
        me: Operator,
        me_key: EphemeralKeyPair,
        shuffle: ShuffleResult,
    }

    fn operator(name: &str, public_key: &str) -> Operator {
        Operator {
            account: AccountName::from(name),
            public_key: public_key.to_owned(),
            url: format!("p2p://{name}"),
        }
    }

    async fn harness() -> Harness {
        let me_key = EphemeralKeyPair::generate();
        let roster = Roster::new(vec![
            operator("origin", "pk-origin"),
            operator("deleg1", &me_key.public_key_hex()),
            operator("deleg2", "pk-deleg2"),
        ]);
        let shuffle = shuffle_roster(&roster, b"", Utc::now(), true);
        let me = roster.find(&"deleg1".into()).unwrap().clone();

        let mut config: BootConfig = serde_json::from_value(serde_json::json!({
            "account": "deleg1",
            "no_shuffle": true,
            "p2p_address": "10.0.0.2:9876",
        }))
        .unwrap();
        config.kickstart_timeout_secs = 1;

        let ledger = Arc::new(InMemoryLedger::new(vec![0xca, 0xfe]));
        let notifier = Arc::new(RecordingNotifier::new());
        let signer = Arc::new(InMemorySigner::new());
        signer.import_key(&me_key.private_key_hex()).await.unwrap();
        let network = Arc::new(LoopbackNetwork::new());
        let (kickstart_tx, kickstart) = ChannelKickstartSource::new();

        let sequencer = DelegateSequencer::new(
            config,
            ledger.clone(),
            notifier.clone(),
            signer,
            network.clone(),
            Arc::new(kickstart),
        );
        Harness {
            sequencer,
            ledger,
            notifier,
            network,
            kickstart_tx,
            me,
            me_key,
            shuffle,
        }
    }

    fn preset(ledger: &InMemoryLedger, name: &str, owner_key: &str) {
        ledger.preset_account(AccountInfo {
            account: AccountName::from(name),
            owner_key: owner_key.to_owned(),
            active_key: owner_key.to_owned(),
            owner_threshold: 1,
            active_threshold: 1,
        });
    }

    fn bundle() -> KickstartBundle {
        KickstartBundle {
            p2p_address: "10.0.0.1:9876".into(),
            chain_id: "cafe".into(),
            ephemeral_private_key: "00".repeat(32),
        }
    }

    #[tokio::test]
    async fn test_clean_path_endorses_and_registers() {
        let h = harness().await;
        preset(&h.ledger, "origin", "pk-origin");
        preset(&h.ledger, "deleg1", &h.me_key.public_key_hex());
        preset(&h.ledger, "deleg2", "pk-deleg2");
        h.kickstart_tx.send(bundle()).await.unwrap();

        let outcome = h.sequencer.run(&h.me, &h.shuffle).await.unwrap();
        assert_eq!(outcome, BootOutcome::Completed);

        assert_eq!(h.network.connections(), vec!["10.0.0.1:9876".to_owned()]);
        assert_eq!(
            h.notifier.event_names(),
            vec![
                "connecting_to_origin",
                "endorsement_published",
                "bootstrap_complete"
            ]
        );

        // the endorsement signature verifies against the delegate's key
        let events = h.notifier.events();
        let LifecycleEvent::EndorsementPublished { endorsement } = &events[1] else {
            panic!("expected endorsement event");
        };
        assert_eq!(endorsement.p2p_address, "10.0.0.2:9876");
        let signature: [u8; 64] = hex::decode(&endorsement.signature)
            .unwrap()
            .try_into()
            .unwrap();
        ignition_crypto::keys::verify_hex(
            &h.me_key.public_key_hex(),
            &bundle().digest(),
            &signature,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_key_mismatch_sabotages() {
        let h = harness().await;
        preset(&h.ledger, "origin", "pk-origin");
        preset(&h.ledger, "deleg1", &h.me_key.public_key_hex());
        preset(&h.ledger, "deleg2", "pk-intruder");
        h.kickstart_tx.send(bundle()).await.unwrap();

        let outcome = h.sequencer.run(&h.me, &h.shuffle).await.unwrap();
        assert!(
            matches!(&outcome, BootOutcome::Sabotaged { reason } if reason.contains("deleg2")),
            "unexpected outcome {outcome:?}"
        );

        // no endorsement, no registration
        assert!(h.notifier.event_names().contains(&"sabotage_declared"));
        assert!(!h.notifier.event_names().contains(&"endorsement_published"));
        assert_eq!(h.ledger.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_account_sabotages() {
        let h = harness().await;
        preset(&h.ledger, "origin", "pk-origin");
        // deleg1/deleg2 never created on the ledger
        h.kickstart_tx.send(bundle()).await.unwrap();

        let outcome = h.sequencer.run(&h.me, &h.shuffle).await.unwrap();
        assert!(matches!(outcome, BootOutcome::Sabotaged { .. }));
    }

    #[tokio::test]
    async fn test_kickstart_wait_is_bounded() {
        let h = harness().await;
        // nothing sent; the 1s timeout from the harness config applies
        let err = h.sequencer.run(&h.me, &h.shuffle).await.unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::Wait {
                phase: "kickstart",
                source: WaitError::TimedOut(_)
            }
        ));
    }
}
