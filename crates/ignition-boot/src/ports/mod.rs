//! Hexagonal ports: the driving API and the driven collaborator traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{BootOutcome, BootReport, BootService};
pub use outbound::{
    AccountInfo, Action, KickstartSource, Ledger, LedgerError, LedgerResult, NetworkError,
    Notifier, NotificationError, PeerNetwork, RelaySource, Signer, SignerError, TxReceipt,
    WaitError,
};
