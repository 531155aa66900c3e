//! # Ignition - Bootstrap Engine
//!
//! Coordinates the cold-start of a new distributed ledger network from a
//! static launch roster and a genesis balance snapshot. Each participating
//! node runs the same logic, independently derives its role from a shared
//! deterministic ordering of the candidate operators, and executes a
//! role-specific sequence of on-ledger setup actions.
//!
//! ## Roles
//!
//! The shuffled roster partitions operators into three roles:
//!
//! - **Origin** (index 0): deploys the system contract, creates operator
//!   accounts, issues the initial supply, seeds snapshot balances, locks
//!   down bootstrap-time authority, and publishes the kickstart bundle.
//! - **Delegates** (indices 1..=21): connect, verify the launch against
//!   the shuffle, and either endorse the kickstart bundle or sabotage.
//! - **Followers** (the rest): wait for a delegate relay, sync, and
//!   optionally register as candidate operators.
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - In-memory ledger/signer, channels, notifiers     │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Middle)                                     │
//! │  - Inbound: BootService                             │
//! │  - Outbound: Ledger, Notifier, Signer, ...          │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - Shuffle, roles, genesis, names, kickstart        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Determinism**: the shuffle is a pure function of
//!    `(roster, commitment, timestamp)`; any observer re-derives it.
//! 2. **Ordering**: ledger stages run strictly sequentially; operator
//!    accounts exist in shuffled order before any stage references them.
//! 3. **Fail-fast**: the first ledger failure aborts the run with a
//!    stage-labelled error; nothing retries, nothing rolls back.
//! 4. **Re-run tolerance**: `AccountExists` outcomes are treated as
//!    success-equivalent where the sequence allows it.
//! 5. **Bounded waits**: kickstart/relay waits carry explicit timeouts.
//!
//! ## Module Structure
//!
//! - [`domain`]: pure domain logic (shuffle, roles, genesis, names)
//! - [`ports`]: hexagonal interfaces (inbound/outbound)
//! - [`adapters`]: in-process port implementations
//! - [`events`]: lifecycle event schemas
//! - [`sequencer`]: role-specific drivers
//! - [`service`]: the orchestrator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod sequencer;
pub mod service;

mod config;
mod error;

pub use config::{BootConfig, ContractArtifacts, TokenConfig};
pub use error::{BootstrapError, Result};

// Re-export commonly used types
pub use domain::{
    my_operator_def, seeded_account_name, shuffle_roster, GenesisDocument, KickstartBundle,
    Role, RoleIndex, ShuffleResult,
};
pub use events::LifecycleEvent;
pub use ports::{BootOutcome, BootReport, BootService};
pub use service::{BootPorts, BootstrapOrchestrator};

/// Delegate operators appointed after the origin, at most
pub const MAX_DELEGATES: usize = 21;

/// Default bounded wait for kickstart/relay input (seconds)
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 1800;

/// Default system-account authority threshold applied at lockdown
pub const DEFAULT_LOCKDOWN_THRESHOLD: u32 = 2;
