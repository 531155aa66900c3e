//! In-memory ledger and signer.
//!
//! The ledger records every mutating call in order and can be scripted to
//! fail on the Nth one, which is how the fail-fast contract of the origin
//! sequence is exercised. Accounts live in a map so authority updates and
//! `get_account` reads observe prior writes within the same run.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ignition_types::{AccountName, TokenAmount};
use ignition_crypto::EphemeralKeyPair;

use crate::ports::outbound::{
    AccountInfo, Action, Ledger, LedgerError, LedgerResult, Signer, SignerError, TxReceipt,
};

/// One recorded mutating ledger call.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCall {
    /// `deploy_system_contract`
    DeploySystemContract {
        /// Target account
        account: AccountName,
        /// Code artifact size
        code_len: usize,
        /// ABI artifact size
        abi_len: usize,
    },
    /// `create_account`
    CreateAccount {
        /// Creating account
        creator: AccountName,
        /// New account
        account: AccountName,
        /// Owner key the account was keyed to
        owner_key: String,
    },
    /// `issue`
    Issue {
        /// Receiving account
        to: AccountName,
        /// Issued amount
        amount: TokenAmount,
    },
    /// `transfer`
    Transfer {
        /// Source account
        from: AccountName,
        /// Destination account
        to: AccountName,
        /// Transferred amount
        amount: TokenAmount,
        /// Human-readable memo
        memo: String,
    },
    /// `sign_and_broadcast`
    SignAndBroadcast {
        /// The batched actions
        actions: Vec<Action>,
    },
    /// `register_operator`
    RegisterOperator {
        /// Registered account
        account: AccountName,
    },
}

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<AccountName, AccountInfo>,
    calls: Vec<LedgerCall>,
    mutations: usize,
    fail_on: Option<usize>,
}

/// In-memory [`Ledger`] with call recording and failure injection.
pub struct InMemoryLedger {
    chain_id: Vec<u8>,
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Create a ledger with the given chain identifier.
    pub fn new(chain_id: Vec<u8>) -> Self {
        Self {
            chain_id,
            state: Mutex::new(LedgerState::default()),
        }
    }

    /// Fail the Nth mutating call (1-based). The failing call is still
    /// recorded; reads are not counted.
    pub fn fail_on_call(&self, n: usize) {
        self.state.lock().unwrap().fail_on = Some(n);
    }

    /// Seed an account as if it existed before the run.
    pub fn preset_account(&self, info: AccountInfo) {
        let mut state = self.state.lock().unwrap();
        state.accounts.insert(info.account.clone(), info);
    }

    /// All mutating calls recorded so far, in order.
    pub fn calls(&self) -> Vec<LedgerCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of mutating calls recorded so far.
    pub fn mutation_count(&self) -> usize {
        self.state.lock().unwrap().mutations
    }

    /// Current state of an account, if present.
    pub fn account(&self, account: &AccountName) -> Option<AccountInfo> {
        self.state.lock().unwrap().accounts.get(account).cloned()
    }

    /// Record a mutating call, honoring injected failure.
    fn record(&self, call: LedgerCall) -> LedgerResult<()> {
        let mut state = self.state.lock().unwrap();
        state.mutations += 1;
        state.calls.push(call);
        if state.fail_on == Some(state.mutations) {
            return Err(LedgerError::Rejected("injected fault".into()));
        }
        Ok(())
    }

    fn receipt(&self) -> TxReceipt {
        let n = self.state.lock().unwrap().mutations;
        TxReceipt {
            transaction_id: format!("memtx-{n:08}"),
        }
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn chain_id(&self) -> LedgerResult<Vec<u8>> {
        Ok(self.chain_id.clone())
    }

    async fn deploy_system_contract(
        &self,
        account: &AccountName,
        code: &[u8],
        abi: &[u8],
    ) -> LedgerResult<TxReceipt> {
        self.record(LedgerCall::DeploySystemContract {
            account: account.clone(),
            code_len: code.len(),
            abi_len: abi.len(),
        })?;
        Ok(self.receipt())
    }

    async fn create_account(
        &self,
        creator: &AccountName,
        new_account: &AccountName,
        owner_key: &str,
    ) -> LedgerResult<TxReceipt> {
        self.record(LedgerCall::CreateAccount {
            creator: creator.clone(),
            account: new_account.clone(),
            owner_key: owner_key.to_owned(),
        })?;
        let mut state = self.state.lock().unwrap();
        if state.accounts.contains_key(new_account) {
            return Err(LedgerError::AccountExists(new_account.clone()));
        }
        state.accounts.insert(
            new_account.clone(),
            AccountInfo {
                account: new_account.clone(),
                owner_key: owner_key.to_owned(),
                active_key: owner_key.to_owned(),
                owner_threshold: 1,
                active_threshold: 1,
            },
        );
        drop(state);
        Ok(self.receipt())
    }

    async fn issue(&self, to: &AccountName, amount: &TokenAmount) -> LedgerResult<TxReceipt> {
        self.record(LedgerCall::Issue {
            to: to.clone(),
            amount: amount.clone(),
        })?;
        Ok(self.receipt())
    }

    async fn transfer(
        &self,
        from: &AccountName,
        to: &AccountName,
        amount: &TokenAmount,
        memo: &str,
    ) -> LedgerResult<TxReceipt> {
        self.record(LedgerCall::Transfer {
            from: from.clone(),
            to: to.clone(),
            amount: amount.clone(),
            memo: memo.to_owned(),
        })?;
        Ok(self.receipt())
    }

    async fn sign_and_broadcast(&self, actions: &[Action]) -> LedgerResult<TxReceipt> {
        self.record(LedgerCall::SignAndBroadcast {
            actions: actions.to_vec(),
        })?;
        let mut state = self.state.lock().unwrap();
        for action in actions {
            let Action::UpdateAuth {
                account,
                permission,
                threshold,
                ..
            } = action;
            if let Some(info) = state.accounts.get_mut(account) {
                match permission.as_str() {
                    "active" => info.active_threshold = *threshold,
                    "owner" => info.owner_threshold = *threshold,
                    _ => {}
                }
            }
        }
        drop(state);
        Ok(self.receipt())
    }

    async fn get_account(&self, account: &AccountName) -> LedgerResult<AccountInfo> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .get(account)
            .cloned()
            .ok_or_else(|| LedgerError::Rejected(format!("unknown account {account}")))
    }

    async fn register_operator(
        &self,
        account: &AccountName,
        _public_key: &str,
        _url: &str,
    ) -> LedgerResult<TxReceipt> {
        self.record(LedgerCall::RegisterOperator {
            account: account.clone(),
        })?;
        Ok(self.receipt())
    }
}

/// In-memory [`Signer`] holding keys for the duration of a run.
#[derive(Default)]
pub struct InMemorySigner {
    keys: Mutex<HashMap<String, EphemeralKeyPair>>,
}

impl InMemorySigner {
    /// Create an empty signer.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Signer for InMemorySigner {
    async fn import_key(&self, private_key_hex: &str) -> Result<String, SignerError> {
        let keypair = EphemeralKeyPair::from_seed_hex(private_key_hex)
            .map_err(|e| SignerError::ImportFailed(e.to_string()))?;
        let public_key = keypair.public_key_hex();
        self.keys
            .lock()
            .unwrap()
            .insert(public_key.clone(), keypair);
        Ok(public_key)
    }

    async fn sign_digest(
        &self,
        public_key: &str,
        digest: &[u8; 32],
    ) -> Result<Vec<u8>, SignerError> {
        let keys = self.keys.lock().unwrap();
        let keypair = keys
            .get(public_key)
            .ok_or_else(|| SignerError::UnknownKey(public_key.to_owned()))?;
        Ok(keypair.sign(digest).to_vec())
    }

    async fn has_key(&self, public_key: &str) -> bool {
        self.keys.lock().unwrap().contains_key(public_key)
    }
}
