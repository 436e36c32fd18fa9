//! Property change notification plumbing between a view and its bridge.
//!
//! Toolkit callbacks fire while the view may be borrowed, so they record
//! the property and the value it changed to, and nothing else. The bridge
//! drains the queue on the UI thread and emits the recorded values.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::property::ObservedProperty;

/// Observation lifecycle of a bridge. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationState {
    Unobserved,
    Observing,
    Disposed,
}

/// One recorded change. `value` is `None` when the new value is absent or
/// an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChange {
    pub property: ObservedProperty,
    pub value: Option<Value>,
}

/// Shared buffer of pending property notifications.
#[derive(Debug, Clone, Default)]
pub struct ObservationQueue {
    pending: Arc<Mutex<Vec<PendingChange>>>,
}

impl ObservationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `property` changed to `value`.
    pub fn notify(&self, property: ObservedProperty, value: Option<Value>) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(PendingChange { property, value });
        }
    }

    pub fn drain(&self) -> Vec<PendingChange> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
