//! Outbound event channel to the host.

use std::sync::{Arc, Mutex};

use crate::events::HostEvent;

/// Receives events destined for the host runtime.
///
/// Called on the UI thread only. Implementations forward `payload`
/// verbatim under `name`.
pub trait EventSink: Send + Sync {
    fn send_event(&self, name: &str, payload: &str);
}

impl<F> EventSink for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn send_event(&self, name: &str, payload: &str) {
        self(name, payload)
    }
}

/// Buffers events for a host loop to drain, like a polled event queue.
#[derive(Debug, Clone, Default)]
pub struct QueuedEventSink {
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl QueuedEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all pending events.
    pub fn drain(&self) -> Vec<HostEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for QueuedEventSink {
    fn send_event(&self, name: &str, payload: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push(HostEvent::new(name, payload));
        }
    }
}
