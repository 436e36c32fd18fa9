//! Callback-bearing script evaluation.
//!
//! A [`ScriptCompletion`] delivers exactly one `onCallback` event for the
//! evaluation it was created for. Dropping it unfinished reports a
//! failure, and once the owning tab is disposed it delivers nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tabview_common::BridgeError;
use tracing::{debug, warn};

use crate::events::{CallbackRecord, CALLBACK_EVENT};
use crate::sink::EventSink;

/// Result of a script evaluation: the returned value or an error description.
pub type ScriptOutcome = std::result::Result<Value, String>;

/// One-shot completion handle for a script evaluation.
pub struct ScriptCompletion {
    callback_id: String,
    tab: u32,
    sink: Arc<dyn EventSink>,
    alive: Arc<AtomicBool>,
    delivered: bool,
}

impl ScriptCompletion {
    pub(crate) fn new(
        callback_id: impl Into<String>,
        tab: u32,
        sink: Arc<dyn EventSink>,
        alive: Arc<AtomicBool>,
    ) -> Self {
        Self {
            callback_id: callback_id.into(),
            tab,
            sink,
            alive,
            delivered: false,
        }
    }

    pub fn callback_id(&self) -> &str {
        &self.callback_id
    }

    pub fn tab(&self) -> u32 {
        self.tab
    }

    pub fn complete(mut self, outcome: ScriptOutcome) {
        let record = match outcome {
            Ok(result) => CallbackRecord::success(&self.callback_id, result),
            Err(error) => CallbackRecord::failure(&self.callback_id, error),
        };
        self.deliver(record);
    }

    pub fn succeed(self, result: Value) {
        self.complete(Ok(result));
    }

    pub fn fail(self, error: impl Into<String>) {
        self.complete(Err(error.into()));
    }

    fn deliver(&mut self, record: CallbackRecord) {
        if self.delivered {
            return;
        }
        self.delivered = true;

        if !self.alive.load(Ordering::Acquire) {
            debug!(
                tab = self.tab,
                callback = %self.callback_id,
                "dropping script callback for disposed tab"
            );
            return;
        }

        debug!(
            tab = self.tab,
            callback = %self.callback_id,
            success = record.success,
            "script callback"
        );
        self.sink.send_event(CALLBACK_EVENT, &record.to_json());
    }
}

impl Drop for ScriptCompletion {
    fn drop(&mut self) {
        if !self.delivered {
            warn!(
                tab = self.tab,
                callback = %self.callback_id,
                "script completion dropped without a result"
            );
            let record = CallbackRecord::failure(
                &self.callback_id,
                "script evaluation finished without reporting a result",
            );
            self.deliver(record);
        }
    }
}

impl std::fmt::Debug for ScriptCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptCompletion")
            .field("callback_id", &self.callback_id)
            .field("tab", &self.tab)
            .field("delivered", &self.delivered)
            .finish()
    }
}

/// A script the engine refused, with its completion still unfinished.
#[derive(Debug)]
pub struct RejectedScript {
    pub error: BridgeError,
    pub completion: ScriptCompletion,
}

impl RejectedScript {
    pub fn new(error: BridgeError, completion: ScriptCompletion) -> Self {
        Self { error, completion }
    }

    /// Report the rejection through the completion.
    pub fn report(self) {
        let Self { error, completion } = self;
        completion.fail(error.to_string());
    }
}

// =============================================================================
// RESULT ENVELOPE
// =============================================================================

/// Engines that only hand back a serialized result cannot tell a thrown
/// exception from a returned value. Wrapping the script lets the page
/// report which one happened.
pub fn wrap_script(js: &str) -> String {
    let source = serde_json::to_string(js).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "(function(){{try{{var r=(0,eval)({source});\
         return JSON.stringify({{ok:true,value:r===undefined?null:r}});\
         }}catch(e){{return JSON.stringify({{ok:false,\
         error:String(e&&e.message!==undefined?e.name+': '+e.message:e)}});}}}})()"
    )
}

#[derive(Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    error: Option<String>,
}

/// Decode the engine's raw result for a script built by [`wrap_script`].
///
/// Engines may return the envelope either as the JSON text itself or as a
/// JSON string containing it.
pub fn parse_envelope(raw: &str) -> ScriptOutcome {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("script produced no result".to_string());
    }

    let decoded: Value = serde_json::from_str(raw)
        .map_err(|e| format!("unreadable script result: {e}"))?;
    let envelope_value = match decoded {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| format!("unreadable script result: {e}"))?,
        other => other,
    };

    let envelope: Envelope = serde_json::from_value(envelope_value)
        .map_err(|e| format!("unexpected script result: {e}"))?;

    if envelope.ok {
        Ok(envelope.value)
    } else {
        Err(envelope
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "script threw".to_string()))
    }
}
