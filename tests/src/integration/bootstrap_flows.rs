//! # Bootstrap Flow Tests
//!
//! Each flow drives a full role sequence through the orchestrator over
//! the in-memory adapters: the origin's ledger-mutation order, delegate
//! endorsement and sabotage, follower relay handling, and re-run
//! tolerance.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use ignition_boot::adapters::LedgerCall;
    use ignition_boot::domain::kickstart::{Endorsement, RelayMessage};
    use ignition_boot::ports::Signer;
    use ignition_boot::{
        shuffle_roster, BootOutcome, BootstrapError, BootstrapOrchestrator, Role, MAX_DELEGATES,
    };
    use ignition_crypto::EphemeralKeyPair;
    use ignition_types::{AccountName, Operator, Roster, Snapshot};

    use crate::fixtures::{
        config, kickstart_bundle, operator, preset_account, roster, snapshot, test_ports,
        test_ports_on, TestPorts,
    };

    fn orchestrator(
        account: &str,
        roster: Roster,
        snapshot: Snapshot,
        ports: &TestPorts,
    ) -> BootstrapOrchestrator {
        let shuffle = shuffle_roster(&roster, &[], Utc::now(), true);
        BootstrapOrchestrator::new(
            config(account),
            roster,
            snapshot,
            shuffle,
            ports.ports.clone(),
        )
    }

    // =========================================================================
    // ORIGIN
    // =========================================================================

    #[tokio::test]
    async fn test_origin_flow_establishes_initial_state() {
        let ports = test_ports();
        let orchestrator = orchestrator("op0", roster(25), snapshot(), &ports);

        let report = orchestrator.run().await.unwrap();
        assert_eq!(report.role, Role::Origin);
        assert_eq!(report.outcome, BootOutcome::Completed);

        let genesis = report.genesis.unwrap();
        assert_eq!(genesis.initial_chain_id, "cafe");
        assert!(ports.signer.has_key(&genesis.initial_key).await);

        let calls = ports.ledger.calls();
        assert!(matches!(calls[0], LedgerCall::DeploySystemContract { .. }));

        // 25 operator accounts in roster order (no_shuffle), then issuance
        let created: Vec<_> = calls[1..26]
            .iter()
            .map(|c| match c {
                LedgerCall::CreateAccount { account, .. } => account.as_str().to_owned(),
                other => panic!("expected CreateAccount, got {other:?}"),
            })
            .collect();
        let expected: Vec<_> = (0..25).map(|i| format!("op{i}")).collect();
        assert_eq!(created, expected);
        assert!(matches!(calls[26], LedgerCall::Issue { .. }));

        // snapshot seeding: derived names and welcome memos
        let transfers: Vec<_> = calls
            .iter()
            .filter_map(|c| match c {
                LedgerCall::Transfer { to, memo, .. } => {
                    Some((to.as_str().to_owned(), memo.clone()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            transfers,
            vec![
                ("genesis1".to_owned(), "Welcome 123456".to_owned()),
                ("genesis2".to_owned(), "Welcome 654321".to_owned()),
            ]
        );

        // lockdown batch and self-registration close the run
        let n = calls.len();
        assert!(matches!(calls[n - 2], LedgerCall::SignAndBroadcast { ref actions } if actions.len() == 2));
        assert!(matches!(calls[n - 1], LedgerCall::RegisterOperator { ref account } if account == &AccountName::from("op0")));

        assert_eq!(
            ports.notifier.event_names(),
            vec![
                "init",
                "config_ready",
                "kickstart_published",
                "bootstrap_complete"
            ]
        );
    }

    #[tokio::test]
    async fn test_shuffled_order_drives_account_creation() {
        let launch_roster = roster(30);
        let commitment = hex::decode("aabbccdd").unwrap();
        let t = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let shuffle = shuffle_roster(&launch_roster, &commitment, t, false);
        assert_eq!(shuffle.delegates().len(), MAX_DELEGATES);

        let origin_account = shuffle.origin().unwrap().account.clone();
        let ports = test_ports();
        let orchestrator = BootstrapOrchestrator::new(
            config(origin_account.as_str()),
            launch_roster,
            Snapshot::default(),
            shuffle.clone(),
            ports.ports.clone(),
        );
        let report = orchestrator.run().await.unwrap();
        assert_eq!(report.role, Role::Origin);

        let created: Vec<_> = ports
            .ledger
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                LedgerCall::CreateAccount { account, .. } => Some(account),
                _ => None,
            })
            .collect();
        let shuffled: Vec<_> = shuffle
            .shuffled
            .iter()
            .map(|op| op.account.clone())
            .collect();
        assert_eq!(created, shuffled, "accounts are created in shuffled order");
    }

    #[tokio::test]
    async fn test_origin_rerun_tolerates_existing_accounts() {
        let first = test_ports();
        orchestrator("op0", roster(5), snapshot(), &first)
            .run()
            .await
            .unwrap();

        // same ledger, fresh run: every account already exists
        let second = test_ports_on(Arc::clone(&first.ledger));
        let report = orchestrator("op0", roster(5), snapshot(), &second)
            .run()
            .await
            .unwrap();
        assert_eq!(report.outcome, BootOutcome::Completed);
    }

    #[tokio::test]
    async fn test_origin_aborts_on_first_ledger_failure() {
        let ports = test_ports();
        // deploy is mutation 1; fail the second operator account
        ports.ledger.fail_on_call(3);

        let err = orchestrator("op0", roster(5), snapshot(), &ports)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(
            &err,
            BootstrapError::Ledger { stage, .. } if stage == "newaccount op1"
        ));
        assert_eq!(ports.ledger.mutation_count(), 3);
    }

    // =========================================================================
    // DELEGATE
    // =========================================================================

    /// Roster whose second operator (the delegate under test) holds a real
    /// signing key.
    fn delegate_roster(delegate_key: &EphemeralKeyPair) -> Roster {
        let mut deleg = operator("deleg1");
        deleg.public_key = delegate_key.public_key_hex();
        Roster::new(vec![operator("origin"), deleg, operator("deleg2")])
    }

    async fn delegate_setup(valid_launch: bool) -> (TestPorts, BootstrapOrchestrator) {
        let key = EphemeralKeyPair::generate();
        let launch_roster = delegate_roster(&key);
        let ports = test_ports();
        ports
            .signer
            .import_key(&key.private_key_hex())
            .await
            .unwrap();

        preset_account(&ports.ledger, "origin", "pk-origin");
        preset_account(&ports.ledger, "deleg1", &key.public_key_hex());
        let deleg2_key = if valid_launch { "pk-deleg2" } else { "pk-intruder" };
        preset_account(&ports.ledger, "deleg2", deleg2_key);

        ports.kickstart_tx.send(kickstart_bundle()).await.unwrap();
        let orchestrator = orchestrator("deleg1", launch_roster, Snapshot::default(), &ports);
        (ports, orchestrator)
    }

    #[tokio::test]
    async fn test_delegate_endorses_valid_launch() {
        let (ports, orchestrator) = delegate_setup(true).await;

        let report = orchestrator.run().await.unwrap();
        assert_eq!(report.role, Role::Delegate);
        assert_eq!(report.outcome, BootOutcome::Completed);

        assert_eq!(ports.network.connections(), vec!["10.0.0.1:9876".to_owned()]);
        assert!(ports
            .notifier
            .event_names()
            .contains(&"endorsement_published"));
        assert!(ports
            .ledger
            .calls()
            .iter()
            .any(|c| matches!(c, LedgerCall::RegisterOperator { account } if account == &AccountName::from("deleg1"))));
    }

    #[tokio::test]
    async fn test_delegate_sabotages_mismatched_launch() {
        let (ports, orchestrator) = delegate_setup(false).await;

        let report = orchestrator.run().await.unwrap();
        assert!(matches!(
            &report.outcome,
            BootOutcome::Sabotaged { reason } if reason.contains("deleg2")
        ));

        // a saboteur neither registers nor endorses
        assert_eq!(ports.ledger.mutation_count(), 0);
        assert!(!ports
            .notifier
            .event_names()
            .contains(&"endorsement_published"));
        assert!(ports.notifier.event_names().contains(&"sabotage_declared"));
    }

    // =========================================================================
    // FOLLOWER
    // =========================================================================

    #[tokio::test]
    async fn test_follower_syncs_from_relay() {
        let ports = test_ports();
        // 25 operators: op22..op24 are followers
        let relay = RelayMessage {
            bundle: kickstart_bundle(),
            endorsement: Endorsement {
                account: "op3".into(),
                p2p_address: "10.0.0.4:9876".into(),
                signature: "ab".repeat(64),
            },
        };
        ports.relay_tx.send(relay).await.unwrap();

        let report = orchestrator("op24", roster(25), Snapshot::default(), &ports)
            .run()
            .await
            .unwrap();
        assert_eq!(report.role, Role::Follower);
        assert_eq!(report.outcome, BootOutcome::Completed);

        // syncs against the relaying delegate's address
        assert_eq!(ports.network.connections(), vec!["10.0.0.4:9876".to_owned()]);
        assert!(ports
            .ledger
            .calls()
            .iter()
            .any(|c| matches!(c, LedgerCall::RegisterOperator { .. })));
    }

    #[tokio::test]
    async fn test_follower_wait_is_bounded() {
        let ports = test_ports();
        let err = orchestrator("op24", roster(25), Snapshot::default(), &ports)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Wait { phase: "relay", .. }));
    }
}
