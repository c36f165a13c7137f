//! One peer connection, fully wired.
//!
//! ```text
//!                     ┌──────────────── MapSession ────────────────┐
//!  ScriptPeer ◄───────┤ SerialExecutor ◄── Bridge ◄── StyleContext │
//!                     │                                  ▲         │
//!  glue ──deliver──►  │ EventSink ──► EventProcessor ──┬─┘ flush   │
//!                     │                                └──► listener
//!                     └────────────────────────────────────────────┘
//! ```
//!
//! A `ready`, `load` or `styledata` event flushes the pending style
//! mutations on a dedicated task.

use crate::bridge::{Bridge, BridgeError, ReturnValue};
use crate::command::Command;
use crate::config::MaplinkConfig;
use crate::event::{event_channel, EventProcessor, EventSink};
use crate::executor::{ScriptPeer, SerialExecutor};
use crate::style::StyleContext;
use maplink_event::EventListener;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Session owning the executor, bridge, event loop and style context.
///
/// Dropping the session stops its tasks.
pub struct MapSession {
    bridge: Arc<Bridge>,
    style: Arc<Mutex<StyleContext>>,
    sink: EventSink,
    tasks: Vec<JoinHandle<()>>,
}

impl MapSession {
    /// Starts a session on the current tokio runtime.
    pub fn start(
        peer: Arc<dyn ScriptPeer>,
        listener: Arc<dyn EventListener>,
        config: &MaplinkConfig,
    ) -> Self {
        let (executor, worker) = SerialExecutor::spawn(peer, config.executor.queue_capacity);
        let bridge = Arc::new(
            Bridge::with_executor(Arc::new(executor)).with_default_deadline(config.bridge.deadline()),
        );
        let style = Arc::new(Mutex::new(StyleContext::new(Arc::clone(&bridge))));

        let (sink, rx) = event_channel(config.events.queue_capacity);
        let style_ready = Arc::new(Notify::new());
        let processor = EventProcessor::from_config(listener, &config.events);
        let event_loop = tokio::spawn(processor.run(rx, Some(Arc::clone(&style_ready))));
        let flusher = tokio::spawn(flush_on_ready(Arc::clone(&style), style_ready));

        info!(
            executor_queue = config.executor.queue_capacity,
            event_queue = config.events.queue_capacity,
            "map session started"
        );

        Self {
            bridge,
            style,
            sink,
            tasks: vec![worker, event_loop, flusher],
        }
    }

    #[must_use]
    pub fn bridge(&self) -> &Arc<Bridge> {
        &self.bridge
    }

    /// The style context. Lock it to mutate sources and layers.
    #[must_use]
    pub fn style(&self) -> &Arc<Mutex<StyleContext>> {
        &self.style
    }

    /// The inbound event boundary, for the platform glue.
    #[must_use]
    pub fn sink(&self) -> EventSink {
        self.sink.clone()
    }

    /// Executes a command through the bridge.
    ///
    /// # Errors
    ///
    /// Any [`BridgeError`].
    pub async fn execute(&self, command: &Command) -> Result<ReturnValue, BridgeError> {
        self.bridge.execute(command).await
    }

    /// Unbinds the peer. Later calls fail with [`BridgeError::NotLoaded`].
    pub fn detach(&self) {
        self.bridge.detach();
    }

    /// Stops every task and unbinds the peer.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        self.bridge.detach();
        for task in self.tasks.drain(..) {
            task.abort();
        }
        debug!("map session closed");
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn flush_on_ready(style: Arc<Mutex<StyleContext>>, ready: Arc<Notify>) {
    loop {
        ready.notified().await;
        let report = style.lock().await.flush_pending().await;
        if !report.is_empty() {
            debug!(
                applied = report.applied().len(),
                failed = report.failed().len(),
                "pending style mutations flushed"
            );
        }
    }
}
