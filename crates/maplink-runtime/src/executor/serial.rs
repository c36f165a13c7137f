//! Serial executor backed by a worker task.
//!
//! ```text
//! caller A ─┐
//! caller B ─┼─ submit ──► mpsc (bounded) ──► worker ──► ScriptPeer::evaluate
//! caller C ─┘    ▲                                          │
//!                └──────────── oneshot (Completion) ◄───────┘
//! ```
//!
//! The worker hands scripts to the peer one at a time in queue order. It
//! does not wait for a script to settle before handing over the next one;
//! callers wait on their own completion concurrently.

use super::{Completion, Executor, ScriptPeer};
use crate::bridge::BridgeError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Default submission queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

struct Submission {
    script: String,
    completion: Completion,
}

/// [`Executor`] that serializes submissions to one [`ScriptPeer`].
///
/// Cloning is cheap; all clones feed the same worker. The worker stops once
/// every clone is dropped.
#[derive(Clone)]
pub struct SerialExecutor {
    tx: mpsc::Sender<Submission>,
}

impl SerialExecutor {
    /// Spawns the worker on the current tokio runtime.
    ///
    /// A `capacity` of 0 is treated as 1.
    pub fn spawn(peer: Arc<dyn ScriptPeer>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run_worker(peer, rx));
        (Self { tx }, handle)
    }

    /// Returns `true` once the worker has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[async_trait]
impl Executor for SerialExecutor {
    async fn submit(&self, script: String) -> Result<Option<Value>, BridgeError> {
        let (completion, rx) = Completion::channel();
        let id = completion.request_id();
        trace!(request = %id, "queueing script");

        self.tx
            .send(Submission { script, completion })
            .await
            .map_err(|_| BridgeError::Closed)?;

        rx.await.unwrap_or(Err(BridgeError::Abandoned))
    }
}

async fn run_worker(peer: Arc<dyn ScriptPeer>, mut rx: mpsc::Receiver<Submission>) {
    debug!("serial executor started");
    while let Some(Submission { script, completion }) = rx.recv().await {
        if completion.is_abandoned_by_caller() {
            trace!(request = %completion.request_id(), "caller left before dispatch, skipping");
            continue;
        }
        trace!(request = %completion.request_id(), bytes = script.len(), "dispatching script");
        peer.evaluate(script, completion);
    }
    debug!("serial executor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPeer;
    use serde_json::json;

    #[tokio::test]
    async fn submit_returns_peer_result() {
        let peer = Arc::new(ScriptedPeer::new().reply_to("getZoom", json!(7.5)));
        let (exec, _worker) = SerialExecutor::spawn(peer.clone(), 4);

        let raw = exec.submit("map.getZoom();".into()).await;
        assert_eq!(raw, Ok(Some(json!(7.5))));
        assert_eq!(peer.scripts(), vec!["map.getZoom();".to_string()]);
    }

    #[tokio::test]
    async fn dropped_completion_is_abandoned() {
        let peer = Arc::new(ScriptedPeer::new().drop_on("lost"));
        let (exec, _worker) = SerialExecutor::spawn(peer, 4);

        assert_eq!(exec.submit("lost();".into()).await, Err(BridgeError::Abandoned));
    }

    #[tokio::test]
    async fn closed_worker_reports_closed() {
        let peer = Arc::new(ScriptedPeer::new());
        let (exec, worker) = SerialExecutor::spawn(peer, 4);
        worker.abort();
        let _ = worker.await;

        assert_eq!(exec.submit("1;".into()).await, Err(BridgeError::Closed));
        assert!(exec.is_closed());
    }
}
