//! Role-specific bootstrap drivers.
//!
//! Exactly one sequencer runs per node per attempt, selected by the
//! resolved role. Every ledger-mutating stage is a blocking call; the next
//! stage never starts until the previous one returned. Waits on external
//! input are bounded.

pub mod delegate;
pub mod follower;
pub mod origin;

pub use delegate::{DelegateSequencer, DelegateState};
pub use follower::{FollowerSequencer, FollowerState};
pub use origin::OriginSequencer;

use tracing::warn;

use crate::events::LifecycleEvent;
use crate::ports::outbound::Notifier;

/// Dispatch an event, downgrading failure to a warning.
///
/// Notification failures are non-fatal by default; call sites that treat
/// a dispatch as fatal use the notifier directly.
pub(crate) async fn dispatch_best_effort(notifier: &dyn Notifier, event: LifecycleEvent) {
    let name = event.name();
    if let Err(e) = notifier.dispatch(event).await {
        warn!("[boot] notification {name} dropped: {e}");
    }
}
