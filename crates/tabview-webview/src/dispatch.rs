//! UI-thread command dispatch.
//!
//! Bridges must only be touched on the UI thread. Host threads hold a
//! [`CommandSender`]; the UI loop owns the matching [`CommandQueue`] and
//! calls [`CommandQueue::pump`] once per iteration to run everything queued
//! since the last pump.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::rc::Rc;

use tabview_common::{BridgeError, Rect, Result};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::registry::TabRegistry;
use crate::view::{NativeView, Snapshot};

/// Reply channel for a snapshot capture.
pub type SnapshotReply = oneshot::Receiver<Result<Snapshot>>;

/// Host commands, addressed by tab id.
#[derive(Debug)]
pub enum Command {
    LoadUrl {
        tab: u32,
        url: String,
    },
    LoadHtml {
        tab: u32,
        html: String,
    },
    LoadLocalFile {
        tab: u32,
        file: PathBuf,
        read_access_root: PathBuf,
    },
    EvaluateScript {
        tab: u32,
        script: String,
        /// Report the result as a callback event under this name.
        callback_id: Option<String>,
    },
    SetPositionAndSize {
        tab: u32,
        viewport: Rect,
        parent_content_height: f64,
    },
    CaptureSnapshot {
        tab: u32,
        reply: oneshot::Sender<Result<Snapshot>>,
    },
    ResyncTabState {
        tab: u32,
    },
    SwitchTab {
        tab: u32,
    },
    GoBack {
        tab: u32,
    },
    GoForward {
        tab: u32,
    },
    Reload {
        tab: u32,
    },
    StopLoading {
        tab: u32,
    },
    Dispose {
        tab: u32,
    },
}

impl Command {
    pub fn tab(&self) -> u32 {
        match self {
            Self::LoadUrl { tab, .. }
            | Self::LoadHtml { tab, .. }
            | Self::LoadLocalFile { tab, .. }
            | Self::EvaluateScript { tab, .. }
            | Self::SetPositionAndSize { tab, .. }
            | Self::CaptureSnapshot { tab, .. }
            | Self::ResyncTabState { tab }
            | Self::SwitchTab { tab }
            | Self::GoBack { tab }
            | Self::GoForward { tab }
            | Self::Reload { tab }
            | Self::StopLoading { tab }
            | Self::Dispose { tab } => *tab,
        }
    }

    /// Host-facing command name, used in logs and failures.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadUrl { .. } => "loadURL",
            Self::LoadHtml { .. } => "loadHTML",
            Self::LoadLocalFile { .. } => "loadLocalFile",
            Self::EvaluateScript { callback_id: None, .. } => "evaluateScript",
            Self::EvaluateScript { .. } => "evaluateScriptWithCallback",
            Self::SetPositionAndSize { .. } => "setPositionAndSize",
            Self::CaptureSnapshot { .. } => "captureSnapshot",
            Self::ResyncTabState { .. } => "resyncTabState",
            Self::SwitchTab { .. } => "switchTab",
            Self::GoBack { .. } => "goBack",
            Self::GoForward { .. } => "goForward",
            Self::Reload { .. } => "reload",
            Self::StopLoading { .. } => "stopLoading",
            Self::Dispose { .. } => "dispose",
        }
    }
}

/// A queued command that returned an error.
#[derive(Debug)]
pub struct CommandFailure {
    pub tab: u32,
    pub command: &'static str,
    pub error: BridgeError,
}

/// Create a connected sender/queue pair.
pub fn command_channel() -> (CommandSender, CommandQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        CommandSender { tx },
        CommandQueue {
            rx,
            _ui_thread: PhantomData,
        },
    )
}

// =============================================================================
// SENDER
// =============================================================================

/// Thread-safe handle for queueing commands to the UI thread.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<Command>,
}

impl CommandSender {
    pub fn send(&self, command: Command) -> Result<()> {
        self.tx
            .send(command)
            .map_err(|e| BridgeError::Platform(format!("command queue closed: {}", e.0.name())))
    }

    pub fn load_url(&self, tab: u32, url: impl Into<String>) -> Result<()> {
        self.send(Command::LoadUrl {
            tab,
            url: url.into(),
        })
    }

    pub fn load_html(&self, tab: u32, html: impl Into<String>) -> Result<()> {
        self.send(Command::LoadHtml {
            tab,
            html: html.into(),
        })
    }

    pub fn load_local_file(
        &self,
        tab: u32,
        file: impl Into<PathBuf>,
        read_access_root: impl Into<PathBuf>,
    ) -> Result<()> {
        self.send(Command::LoadLocalFile {
            tab,
            file: file.into(),
            read_access_root: read_access_root.into(),
        })
    }

    pub fn evaluate_script(&self, tab: u32, script: impl Into<String>) -> Result<()> {
        self.send(Command::EvaluateScript {
            tab,
            script: script.into(),
            callback_id: None,
        })
    }

    pub fn evaluate_script_with_callback(
        &self,
        tab: u32,
        script: impl Into<String>,
        callback_id: impl Into<String>,
    ) -> Result<()> {
        self.send(Command::EvaluateScript {
            tab,
            script: script.into(),
            callback_id: Some(callback_id.into()),
        })
    }

    pub fn set_position_and_size(
        &self,
        tab: u32,
        viewport: Rect,
        parent_content_height: f64,
    ) -> Result<()> {
        self.send(Command::SetPositionAndSize {
            tab,
            viewport,
            parent_content_height,
        })
    }

    /// Queue a capture. The snapshot (or error) arrives on the returned
    /// receiver after the next pump.
    pub fn capture_snapshot(&self, tab: u32) -> Result<SnapshotReply> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::CaptureSnapshot { tab, reply })?;
        Ok(rx)
    }

    pub fn resync_tab_state(&self, tab: u32) -> Result<()> {
        self.send(Command::ResyncTabState { tab })
    }

    pub fn switch_tab(&self, tab: u32) -> Result<()> {
        self.send(Command::SwitchTab { tab })
    }

    pub fn go_back(&self, tab: u32) -> Result<()> {
        self.send(Command::GoBack { tab })
    }

    pub fn go_forward(&self, tab: u32) -> Result<()> {
        self.send(Command::GoForward { tab })
    }

    pub fn reload(&self, tab: u32) -> Result<()> {
        self.send(Command::Reload { tab })
    }

    pub fn stop_loading(&self, tab: u32) -> Result<()> {
        self.send(Command::StopLoading { tab })
    }

    pub fn dispose(&self, tab: u32) -> Result<()> {
        self.send(Command::Dispose { tab })
    }
}

// =============================================================================
// QUEUE
// =============================================================================

/// UI-thread end of the command channel. Not `Send`.
#[derive(Debug)]
pub struct CommandQueue {
    rx: mpsc::UnboundedReceiver<Command>,
    _ui_thread: PhantomData<Rc<()>>,
}

impl CommandQueue {
    /// Run every queued command in order against `registry`, flushing
    /// property notifications after each one.
    ///
    /// Failures are logged and returned; they never stop the pump.
    pub fn pump<V: NativeView>(&mut self, registry: &mut TabRegistry<V>) -> Vec<CommandFailure> {
        let mut failures = Vec::new();
        while let Ok(command) = self.rx.try_recv() {
            let tab = command.tab();
            let name = command.name();
            if let Err(error) = execute(registry, command) {
                warn!(tab, command = name, kind = error.kind(), error = %error, "command failed");
                failures.push(CommandFailure {
                    tab,
                    command: name,
                    error,
                });
            }
            registry.process_notifications();
        }
        registry.process_notifications();
        failures
    }
}

fn execute<V: NativeView>(registry: &mut TabRegistry<V>, command: Command) -> Result<()> {
    debug!(tab = command.tab(), command = command.name(), "dispatch");
    match command {
        Command::LoadUrl { tab, url } => registry.bridge_mut(tab)?.load_url(&url),
        Command::LoadHtml { tab, html } => registry.bridge_mut(tab)?.load_html(&html),
        Command::LoadLocalFile {
            tab,
            file,
            read_access_root,
        } => registry
            .bridge_mut(tab)?
            .load_local_file(&file, &read_access_root),
        Command::EvaluateScript {
            tab,
            script,
            callback_id: None,
        } => registry.bridge_mut(tab)?.evaluate_script(&script),
        Command::EvaluateScript {
            tab,
            script,
            callback_id: Some(callback_id),
        } => registry
            .bridge_mut(tab)?
            .evaluate_script_with_callback(&script, &callback_id),
        Command::SetPositionAndSize {
            tab,
            viewport,
            parent_content_height,
        } => registry
            .bridge_mut(tab)?
            .set_position_and_size(viewport, parent_content_height)
            .map(|_| ()),
        Command::CaptureSnapshot { tab, reply } => {
            // The caller is waiting on `reply`, so a missing tab is reported
            // there as well as in the failure list.
            let (result, outcome) = match registry.bridge_mut(tab) {
                Ok(bridge) => (bridge.capture_snapshot(), Ok(())),
                Err(_) => (
                    Err(BridgeError::UnknownTab(tab)),
                    Err(BridgeError::UnknownTab(tab)),
                ),
            };
            if reply.send(result).is_err() {
                debug!(tab, "snapshot receiver dropped");
            }
            outcome
        }
        Command::ResyncTabState { tab } => registry.bridge_mut(tab)?.resync_tab_state(),
        Command::SwitchTab { tab } => registry.switch_to(tab),
        Command::GoBack { tab } => registry.bridge_mut(tab)?.go_back(),
        Command::GoForward { tab } => registry.bridge_mut(tab)?.go_forward(),
        Command::Reload { tab } => registry.bridge_mut(tab)?.reload(),
        Command::StopLoading { tab } => registry.bridge_mut(tab)?.stop_loading(),
        Command::Dispose { tab } => {
            if registry.dispose(tab) {
                Ok(())
            } else {
                Err(BridgeError::UnknownTab(tab))
            }
        }
    }
}
