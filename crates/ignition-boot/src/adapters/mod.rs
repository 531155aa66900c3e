//! Adapters implementing the outbound ports.
//!
//! Everything here is in-process: the scriptable ledger and signer used by
//! rehearsal runs and tests, notifiers that record or log, and
//! channel-backed kickstart/relay sources. Real transports plug in behind
//! the same ports.

pub mod channel;
pub mod memory;
pub mod recording;

pub use channel::{ChannelKickstartSource, ChannelRelaySource, LoopbackNetwork};
pub use memory::{InMemoryLedger, InMemorySigner, LedgerCall};
pub use recording::{RecordingNotifier, TracingNotifier};
