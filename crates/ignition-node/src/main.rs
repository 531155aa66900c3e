//! # Ignition Node
//!
//! The entry point for one bootstrap attempt. The shell loads the launch
//! inputs from disk, computes the shuffle, wires the adapters, and hands
//! everything to the orchestrator; the core never touches the filesystem.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (from `RUST_LOG`, default `info`)
//! 2. Load node config, roster, snapshot, contract artifacts
//! 3. Compute the shuffle (or pass the roster through for `no_shuffle`)
//! 4. Wire adapters and run the role-specific sequence
//! 5. Report the outcome; exit non-zero on a fatal error

mod loader;
mod wiring;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use ignition_boot::{BootOutcome, BootstrapOrchestrator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(config_path) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: ignition-node <config.json>");
    };

    info!("===========================================");
    info!("  Ignition Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = loader::load_node_config(&config_path)?;
    let roster = loader::load_roster(&config.roster_path)?;
    let snapshot = loader::load_snapshot(&config.snapshot_path)?;
    info!(
        "[node] loaded {} operators, {} snapshot holders",
        roster.len(),
        snapshot.len()
    );

    let shuffle = wiring::compute_shuffle(&config.boot, &roster)?;
    let wired = wiring::build(&config).await?;
    // Held for the lifetime of the run: delegates and followers receive
    // their out-of-band input through these.
    let _kickstart_tx = wired.kickstart_tx;
    let _relay_tx = wired.relay_tx;

    let orchestrator = Arc::new(BootstrapOrchestrator::new(
        config.boot,
        roster,
        snapshot,
        shuffle,
        wired.ports,
    ));

    let report = orchestrator
        .run()
        .await
        .context("bootstrap run failed")?;

    match &report.outcome {
        BootOutcome::Completed => {
            info!("[node] bootstrap complete as {:?}", report.role);
            if let Some(genesis) = &report.genesis {
                info!("[node] genesis: {}", genesis.to_json());
            }
        }
        BootOutcome::Sabotaged { reason } => {
            info!("[node] bootstrap ended in sabotage: {reason}");
        }
    }
    Ok(())
}
