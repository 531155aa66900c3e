//! Origin Sequencer
//!
//! Runs only on the node the shuffle resolved as origin. Stages are
//! strictly sequential and fail-fast: every ledger error is wrapped with
//! a stage-identifying label and aborts the remainder of the run. Nothing
//! is rolled back; a re-run tolerates `AccountExists` outcomes from the
//! stages that create accounts.

use std::sync::Arc;

use ignition_crypto::EphemeralKeyPair;
use ignition_types::{Operator, Snapshot};
use tracing::{debug, info, warn};

use crate::config::BootConfig;
use crate::domain::genesis::GenesisDocument;
use crate::domain::kickstart::KickstartBundle;
use crate::domain::names::seeded_account_name;
use crate::domain::roles::Role;
use crate::domain::shuffle::ShuffleResult;
use crate::error::{BootstrapError, Result};
use crate::events::LifecycleEvent;
use crate::ports::outbound::{Action, Ledger, Notifier, Signer};
use crate::sequencer::dispatch_best_effort;

/// Driver for the origin role.
pub struct OriginSequencer {
    config: BootConfig,
    ledger: Arc<dyn Ledger>,
    notifier: Arc<dyn Notifier>,
    signer: Arc<dyn Signer>,
}

impl OriginSequencer {
    /// Create the sequencer with its collaborators.
    pub fn new(
        config: BootConfig,
        ledger: Arc<dyn Ledger>,
        notifier: Arc<dyn Notifier>,
        signer: Arc<dyn Signer>,
    ) -> Self {
        Self {
            config,
            ledger,
            notifier,
            signer,
        }
    }

    /// Run the origin sequence to completion.
    ///
    /// Returns the genesis document the network was started from.
    pub async fn run(
        &self,
        me: &Operator,
        shuffle: &ShuffleResult,
        snapshot: &Snapshot,
    ) -> Result<GenesisDocument> {
        info!("[boot] origin sequence starting");

        // Stage 1: ephemeral admin key, held by the signer for the whole run
        let keypair = EphemeralKeyPair::generate();
        let public_key = keypair.public_key_hex();
        let private_key = keypair.private_key_hex();
        self.signer.import_key(&private_key).await?;
        info!("[boot] generated ephemeral admin key {public_key}");

        // Stage 2: genesis document from the shuffle timestamp and the key
        let chain_id = self
            .ledger
            .chain_id()
            .await
            .map_err(|e| BootstrapError::ledger("get_info", e))?;
        let genesis = GenesisDocument::build(shuffle.timestamp, &public_key, &chain_id);

        // Stage 3: config-ready hook, fatal by policy
        self.notifier
            .dispatch(LifecycleEvent::ConfigReady {
                genesis: genesis.clone(),
                origin: me.account.clone(),
                public_key: public_key.clone(),
                private_key: private_key.clone(),
                sabotage_enabled: self.config.sabotage_enabled,
            })
            .await?;

        let system = self.config.system_account.clone();

        // Stage 4: deploy the system contract
        self.ledger
            .deploy_system_contract(&system, &self.config.contract.code, &self.config.contract.abi)
            .await
            .map_err(|e| BootstrapError::ledger("setcode", e))?;
        info!("[boot] system contract deployed to {system}");

        // Stage 5: one account per operator, shuffled order, origin included
        for operator in &shuffle.shuffled {
            match self
                .ledger
                .create_account(&system, &operator.account, &operator.public_key)
                .await
            {
                Ok(_) => debug!("[boot] created operator account {}", operator.account),
                Err(e) if e.is_account_exists() => {
                    warn!("[boot] operator account {} already exists, continuing", operator.account);
                }
                Err(e) => {
                    return Err(BootstrapError::ledger(
                        format!("newaccount {}", operator.account),
                        e,
                    ))
                }
            }
        }

        // Stage 6: issue the total initial supply to the system account
        let supply = self.config.token.total_supply();
        self.ledger
            .issue(&system, &supply)
            .await
            .map_err(|e| BootstrapError::ledger("issue", e))?;
        info!("[boot] issued {supply} to {system}");

        // Stage 7: seed snapshot holders, snapshot order
        self.seed_snapshot(snapshot).await?;

        // Stage 8: lock down the system account's authority in one batch.
        // The ephemeral key stays in both authorities at weight 1, below
        // the raised threshold: lowered, not deleted.
        let threshold = self.config.lockdown_threshold;
        let actions = [
            Action::UpdateAuth {
                account: system.clone(),
                permission: "active".into(),
                parent: "owner".into(),
                threshold,
                key: public_key.clone(),
                weight: 1,
            },
            Action::UpdateAuth {
                account: system.clone(),
                permission: "owner".into(),
                parent: String::new(),
                threshold,
                key: public_key.clone(),
                weight: 1,
            },
        ];
        self.ledger
            .sign_and_broadcast(&actions)
            .await
            .map_err(|e| BootstrapError::ledger("updateauth", e))?;
        info!("[boot] system authority locked down at threshold {threshold}");

        // Stage 9: publish the kickstart bundle and register self
        let bundle = KickstartBundle {
            p2p_address: self.config.p2p_address.clone(),
            chain_id: genesis.initial_chain_id.clone(),
            ephemeral_private_key: private_key,
        };
        dispatch_best_effort(
            &*self.notifier,
            LifecycleEvent::KickstartPublished { bundle },
        )
        .await;

        self.ledger
            .register_operator(&me.account, &me.public_key, &me.url)
            .await
            .map_err(|e| BootstrapError::ledger("regoperator", e))?;

        dispatch_best_effort(
            &*self.notifier,
            LifecycleEvent::BootstrapComplete {
                account: me.account.clone(),
                role: Role::Origin,
            },
        )
        .await;

        info!("[boot] origin sequence done");
        Ok(genesis)
    }

    /// Create and fund one account per snapshot holder, in snapshot order.
    async fn seed_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let system = &self.config.system_account;
        if let Some(limit) = self.config.seed_limit {
            warn!(
                "[boot] seed cap active: seeding the first {limit} of {} holders",
                snapshot.len()
            );
        }

        for (idx, holder) in snapshot.iter().enumerate() {
            if let Some(limit) = self.config.seed_limit {
                if idx >= limit {
                    break;
                }
            }
            let position = (idx + 1) as u32;
            let dest = seeded_account_name(position);

            match self
                .ledger
                .create_account(system, &dest, &holder.public_key)
                .await
            {
                Ok(_) => {}
                Err(e) if e.is_account_exists() => {
                    warn!("[boot] seeded account {dest} already exists, continuing");
                }
                Err(e) => {
                    return Err(BootstrapError::ledger(
                        format!("seed {position}: newaccount {dest}"),
                        e,
                    ))
                }
            }

            let memo = welcome_memo(&holder.external_address);
            self.ledger
                .transfer(system, &dest, &holder.balance, &memo)
                .await
                .map_err(|e| BootstrapError::ledger(format!("seed {position}: transfer"), e))?;
            debug!(
                "[boot] seeded {dest} with {} ({memo})",
                holder.balance
            );
        }
        Ok(())
    }
}

/// Memo referencing the holder's external identity by its address tail.
fn welcome_memo(external_address: &str) -> String {
    let start = external_address.len().saturating_sub(6);
    let tail = external_address.get(start..).unwrap_or(external_address);
    format!("Welcome {tail}")
}
