//! Channel-backed kickstart/relay sources and a loopback network.
//!
//! The senders stand in for whatever out-of-band transport carries the
//! (encrypted) bundle in production: tests and rehearsal wiring hold the
//! sender and feed bundles in; the sequencers block on the receiver with
//! a bounded wait.

use std::sync::Mutex as StdMutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::domain::kickstart::{KickstartBundle, RelayMessage};
use crate::ports::outbound::{
    KickstartSource, NetworkError, PeerNetwork, RelaySource, WaitError,
};

/// Kickstart input backed by a tokio channel.
pub struct ChannelKickstartSource {
    rx: Mutex<mpsc::Receiver<KickstartBundle>>,
}

impl ChannelKickstartSource {
    /// Create the source and the sender feeding it.
    pub fn new() -> (mpsc::Sender<KickstartBundle>, Self) {
        let (tx, rx) = mpsc::channel(4);
        (tx, Self { rx: Mutex::new(rx) })
    }
}

#[async_trait]
impl KickstartSource for ChannelKickstartSource {
    async fn await_kickstart(&self, timeout: Duration) -> Result<KickstartBundle, WaitError> {
        let mut rx = self.rx.lock().await;
        match tokio::time::timeout(timeout, rx.recv()).await {
            Ok(Some(bundle)) => Ok(bundle),
            Ok(None) => Err(WaitError::Closed),
            Err(_) => Err(WaitError::TimedOut(timeout)),
        }
    }
}

/// Relay input backed by a tokio channel.
pub struct ChannelRelaySource {
    rx: Mutex<mpsc::Receiver<RelayMessage>>,
}

impl ChannelRelaySource {
    /// Create the source and the sender feeding it.
    pub fn new() -> (mpsc::Sender<RelayMessage>, Self) {
        let (tx, rx) = mpsc::channel(4);
        (tx, Self { rx: Mutex::new(rx) })
    }
}

#[async_trait]
impl RelaySource for ChannelRelaySource {
    async fn await_relay(&self, timeout: Duration) -> Result<RelayMessage, WaitError> {
        let mut rx = self.rx.lock().await;
        match tokio::time::timeout(timeout, rx.recv()).await {
            Ok(Some(message)) => Ok(message),
            Ok(None) => Err(WaitError::Closed),
            Err(_) => Err(WaitError::TimedOut(timeout)),
        }
    }
}

/// In-process [`PeerNetwork`] that records dialed addresses and reports
/// instant sync.
#[derive(Default)]
pub struct LoopbackNetwork {
    connections: StdMutex<Vec<String>>,
}

impl LoopbackNetwork {
    /// Create an empty loopback network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses dialed so far, in order.
    pub fn connections(&self) -> Vec<String> {
        self.connections.lock().unwrap().clone()
    }
}

#[async_trait]
impl PeerNetwork for LoopbackNetwork {
    async fn connect(&self, address: &str) -> Result<(), NetworkError> {
        self.connections.lock().unwrap().push(address.to_owned());
        Ok(())
    }

    async fn await_synced(&self, _timeout: Duration) -> Result<(), NetworkError> {
        Ok(())
    }
}
