//! Tab bridge between a native webview and a message-driven host.
//!
//! Each tab wraps one webview and provides:
//! - Observation of six view properties, mirrored to the host as JSON events
//! - Navigation commands (URL, inline HTML, scoped local files, back/forward)
//! - Script evaluation with an optional one-shot callback event
//! - Coordinate translation between the host layout and the toolkit
//! - A command queue so off-thread callers never touch the view directly

pub mod bridge;
pub mod dispatch;
pub mod events;
pub mod host;
pub mod observation;
pub mod platform;
pub mod property;
pub mod registry;
pub mod script;
pub mod sink;
pub mod view;
pub mod wry_view;

#[cfg(test)]
pub(crate) mod fake;

pub use bridge::ViewPropertyBridge;
pub use dispatch::{
    command_channel, Command, CommandFailure, CommandQueue, CommandSender, SnapshotReply,
};
pub use events::{CallbackRecord, ChangeRecord, HostEvent, CALLBACK_EVENT, PROPERTY_CHANGE_EVENT};
pub use host::TabHost;
pub use observation::{ObservationQueue, ObservationState, PendingChange};
pub use platform::{for_profile, Platform};
pub use property::{ObservedProperty, PropertySource};
pub use registry::TabRegistry;
pub use script::{RejectedScript, ScriptCompletion, ScriptOutcome};
pub use sink::{EventSink, QueuedEventSink};
pub use view::{NativeView, Snapshot};
pub use wry_view::WryView;
