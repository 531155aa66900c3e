//! Role Assignment
//!
//! Every node derives its role from the shuffled roster: index 0 is the
//! single origin operator, the next 21 (at most) are delegates, everyone
//! else is a follower. The role partition is computed once per run into a
//! [`RoleIndex`]; lookups never re-scan the roster.

use std::collections::HashMap;

use ignition_types::{AccountName, Operator, Roster};
use serde::{Deserialize, Serialize};

use crate::domain::shuffle::ShuffleResult;
use crate::error::{BootstrapError, Result};

/// The role a node plays in the bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The single operator designated to initialize the network
    Origin,
    /// One of up to 21 operators that validate and co-sign the launch
    Delegate,
    /// Any operator not selected as origin or delegate for this launch
    Follower,
}

/// Role lookups over a shuffled roster, built once per run.
#[derive(Debug, Clone)]
pub struct RoleIndex {
    roles: HashMap<AccountName, Role>,
}

impl RoleIndex {
    /// Build the index from a shuffle result.
    pub fn new(shuffle: &ShuffleResult) -> Self {
        let mut roles = HashMap::with_capacity(shuffle.shuffled.len());
        for (i, operator) in shuffle.shuffled.iter().enumerate() {
            let role = if i == 0 {
                Role::Origin
            } else if i <= crate::MAX_DELEGATES {
                Role::Delegate
            } else {
                Role::Follower
            };
            roles.insert(operator.account.clone(), role);
        }
        Self { roles }
    }

    /// The role of an account. Accounts outside the roster resolve to
    /// [`Role::Follower`]; membership itself is checked by
    /// [`my_operator_def`] before any ledger action.
    pub fn role_of(&self, account: &AccountName) -> Role {
        self.roles.get(account).copied().unwrap_or(Role::Follower)
    }
}

/// Find the local operator's definition in the launch roster.
///
/// Fails with [`BootstrapError::NotInRoster`] when the account is absent;
/// the run aborts before touching the ledger.
pub fn my_operator_def<'a>(account: &AccountName, roster: &'a Roster) -> Result<&'a Operator> {
    roster
        .find(account)
        .ok_or_else(|| BootstrapError::NotInRoster(account.clone()))
}
