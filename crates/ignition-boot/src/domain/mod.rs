//! Pure domain logic: deterministic shuffle, role assignment, genesis
//! document, account-name derivation, kickstart payloads. No I/O.

pub mod genesis;
pub mod kickstart;
pub mod names;
pub mod roles;
pub mod shuffle;

pub use genesis::GenesisDocument;
pub use kickstart::{Endorsement, KickstartBundle, RelayMessage};
pub use names::{name_to_string, seeded_account_name};
pub use roles::{my_operator_def, Role, RoleIndex};
pub use shuffle::{shuffle_roster, ShuffleResult, ZERO_COMMITMENT};
