//! Embedder entry point: config, logging, tabs and the command queue in one
//! UI-thread object.

use std::sync::Arc;

use tabview_common::{logging, Result};
use tabview_config::TabviewConfig;
use tracing::info;

use crate::dispatch::{command_channel, CommandFailure, CommandQueue, CommandSender};
use crate::registry::TabRegistry;
use crate::sink::EventSink;
use crate::view::NativeView;

/// Everything a host's UI thread owns. Call [`TabHost::pump`] once per
/// event-loop iteration.
pub struct TabHost<V: NativeView> {
    config: TabviewConfig,
    registry: TabRegistry<V>,
    queue: CommandQueue,
    sender: CommandSender,
}

impl<V: NativeView> TabHost<V> {
    /// Load the user config (creating it if missing), install logging at the
    /// configured level, and set up an empty registry.
    pub fn start(sink: Arc<dyn EventSink>) -> Result<Self> {
        let config = tabview_config::load_config()?;
        if logging::init(&config.logging.level) {
            info!(level = %config.logging.level, "logging initialized");
        }
        Ok(Self::with_config(config, sink))
    }

    pub fn with_config(config: TabviewConfig, sink: Arc<dyn EventSink>) -> Self {
        let registry = TabRegistry::new(sink, &config);
        let (sender, queue) = command_channel();
        info!(
            profile = ?registry.profile(),
            "tab host ready"
        );
        Self {
            config,
            registry,
            queue,
            sender,
        }
    }

    /// A handle other threads can queue commands with.
    pub fn sender(&self) -> CommandSender {
        self.sender.clone()
    }

    pub fn config(&self) -> &TabviewConfig {
        &self.config
    }

    pub fn registry(&self) -> &TabRegistry<V> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TabRegistry<V> {
        &mut self.registry
    }

    /// Run queued commands and flush property notifications.
    pub fn pump(&mut self) -> Vec<CommandFailure> {
        self.queue.pump(&mut self.registry)
    }
}
