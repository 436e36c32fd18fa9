//! Event records sent to the host.
//!
//! Every event is a constant name plus one JSON string argument.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::property::ObservedProperty;

/// Event name for property change records.
pub const PROPERTY_CHANGE_EVENT: &str = "WebView.OnPropertyChange";

/// Event name for script callback completions.
pub const CALLBACK_EVENT: &str = "WebView.OnCallback";

/// One property change notification: `{propName, value, tab}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub prop_name: String,
    pub value: Value,
    pub tab: u32,
}

impl ChangeRecord {
    pub fn new(property: ObservedProperty, value: Value, tab: u32) -> Self {
        Self {
            prop_name: property.prop_name().to_string(),
            value,
            tab,
        }
    }

    pub fn to_json(&self) -> String {
        serialize_payload(self)
    }
}

/// Completion of a callback-bearing script evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackRecord {
    pub callback_name: String,
    pub message: String,
    pub error: String,
    pub success: bool,
    pub result: Value,
}

impl CallbackRecord {
    pub fn success(callback_name: impl Into<String>, result: Value) -> Self {
        Self {
            callback_name: callback_name.into(),
            message: String::new(),
            error: String::new(),
            success: true,
            result,
        }
    }

    /// A failed completion. An empty description is replaced so the host
    /// always sees a non-empty `error`.
    pub fn failure(callback_name: impl Into<String>, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "unknown script error".to_string();
        }
        Self {
            callback_name: callback_name.into(),
            message: String::new(),
            error,
            success: false,
            result: Value::Null,
        }
    }

    pub fn to_json(&self) -> String {
        serialize_payload(self)
    }
}

fn serialize_payload<T: Serialize>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize event payload");
        "{}".to_string()
    })
}

/// An event as delivered to the host: name plus JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEvent {
    pub name: String,
    pub payload: String,
}

impl HostEvent {
    pub fn new(name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }

    /// Decode the payload if this is a property change event.
    pub fn change_record(&self) -> Option<ChangeRecord> {
        if self.name != PROPERTY_CHANGE_EVENT {
            return None;
        }
        serde_json::from_str(&self.payload).ok()
    }

    /// Decode the payload if this is a callback event.
    pub fn callback_record(&self) -> Option<CallbackRecord> {
        if self.name != CALLBACK_EVENT {
            return None;
        }
        serde_json::from_str(&self.payload).ok()
    }
}
