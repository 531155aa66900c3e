//! # Ignition Shared Types
//!
//! Plain data entities shared across the bootstrap coordinator:
//!
//! - **Launch roster**: the ordered candidate-operator list fixed before
//!   shuffling ([`Roster`], [`Operator`]).
//! - **Balance snapshot**: the ordered list of external holders whose
//!   balances are seeded at genesis ([`Snapshot`], [`Holder`]).
//! - **Token amounts**: fixed-precision amounts with a symbol
//!   ([`TokenAmount`], [`Symbol`]).
//!
//! All types here are immutable inputs to the bootstrap core: they are
//! loaded once by the outer shell and never mutated during a run.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entities;
pub mod token;

pub use entities::{AccountName, Holder, Operator, Roster, Snapshot};
pub use token::{Symbol, TokenAmount};
