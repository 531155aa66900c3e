//! Notifier adapters: a recording fake and a tracing sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::events::LifecycleEvent;
use crate::ports::outbound::{NotificationError, Notifier};

/// Records dispatched events for later assertion.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<LifecycleEvent>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent dispatch fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Events dispatched so far, in order.
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Names of events dispatched so far, in order.
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn dispatch(&self, event: LifecycleEvent) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::Dispatch(
                "recording notifier set to fail".into(),
            ));
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Logs every event through `tracing`; never fails.
#[derive(Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Create the sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn dispatch(&self, event: LifecycleEvent) -> Result<(), NotificationError> {
        let payload = serde_json::to_string(&event)
            .unwrap_or_else(|_| String::from("<unserializable>"));
        info!("[boot] event {}: {}", event.name(), payload);
        Ok(())
    }
}
