//! Inbound ports (driving side - API)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::genesis::GenesisDocument;
use crate::domain::roles::Role;
use crate::error::Result;

/// How a bootstrap run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BootOutcome {
    /// The role-specific sequence ran to completion
    Completed,
    /// A delegate refused to endorse a kickstart bundle that failed
    /// verification. Terminal by design, not a crash.
    Sabotaged {
        /// The first verification mismatch observed
        reason: String,
    },
}

/// The owned result of a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootReport {
    /// The role this node resolved to
    pub role: Role,
    /// How the run ended
    pub outcome: BootOutcome,
    /// The genesis document, present only for the origin
    pub genesis: Option<GenesisDocument>,
}

/// Port: drive one bootstrap attempt.
#[async_trait]
pub trait BootService: Send + Sync {
    /// Resolve the local role and run the matching sequence to a terminal
    /// state. One attempt in flight per node.
    async fn bootstrap(&self) -> Result<BootReport>;
}
