//! Command bridge.
//!
//! The [`Bridge`] is the single entry point for commands. It renders the
//! command, hands the script to the bound [`Executor`] and decodes the raw
//! result into a [`ReturnValue`].
//!
//! ```text
//! Command ──render──► script ──Executor::submit──► raw ──decode──► ReturnValue
//! ```
//!
//! The bridge has no queue of its own. Without a bound executor every call
//! fails immediately with [`BridgeError::NotLoaded`].

mod error;
mod return_value;

pub use error::BridgeError;
pub use return_value::ReturnValue;

use crate::command::Command;
use crate::executor::Executor;
use maplink_types::SourceId;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Façade between callers and the peer executor.
#[derive(Default)]
pub struct Bridge {
    executor: RwLock<Option<Arc<dyn Executor>>>,
    default_deadline: Option<Duration>,
}

impl Bridge {
    /// Creates an unbound bridge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bridge bound to `executor`.
    #[must_use]
    pub fn with_executor(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor: RwLock::new(Some(executor)),
            default_deadline: None,
        }
    }

    /// Applies `deadline` to every [`execute`](Self::execute) call.
    #[must_use]
    pub fn with_default_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.default_deadline = deadline;
        self
    }

    /// Binds an executor, replacing any previous one.
    pub fn attach(&self, executor: Arc<dyn Executor>) {
        debug!("bridge attached");
        *self.executor.write() = Some(executor);
    }

    /// Unbinds the executor. Calls already in flight keep their executor.
    pub fn detach(&self) -> Option<Arc<dyn Executor>> {
        debug!("bridge detached");
        self.executor.write().take()
    }

    /// Returns `true` if an executor is bound.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.executor.read().is_some()
    }

    /// Executes a command.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::NotLoaded`] if no executor is bound
    /// - [`BridgeError::Timeout`] if the default deadline is set and expires
    /// - any executor or decode failure
    pub async fn execute(&self, command: &Command) -> Result<ReturnValue, BridgeError> {
        match self.default_deadline {
            Some(deadline) => self.execute_with_deadline(command, deadline).await,
            None => {
                let executor = self.bound()?;
                run(executor.as_ref(), command).await
            }
        }
    }

    /// Executes a command, giving up after `deadline`.
    ///
    /// Giving up drops the result receiver: a late peer answer is discarded.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute), plus [`BridgeError::Timeout`].
    pub async fn execute_with_deadline(
        &self,
        command: &Command,
        deadline: Duration,
    ) -> Result<ReturnValue, BridgeError> {
        let executor = self.bound()?;
        match tokio::time::timeout(deadline, run(executor.as_ref(), command)).await {
            Ok(result) => result,
            Err(_) => {
                let after_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
                warn!(op = command.op(), after_ms, "bridge call timed out");
                Err(BridgeError::Timeout { after_ms })
            }
        }
    }

    /// Asks the peer whether a source has finished loading.
    ///
    /// # Errors
    ///
    /// Bridge failures, or [`BridgeError::UnexpectedValue`] if the peer did
    /// not answer with a boolean.
    pub async fn is_source_loaded(&self, id: &SourceId) -> Result<bool, BridgeError> {
        let value = self
            .execute(&Command::IsSourceLoaded { source: id.clone() })
            .await?;
        value.as_bool().ok_or(BridgeError::UnexpectedValue {
            expected: "Bool",
            actual: value.kind(),
        })
    }

    /// Executes a query expected to return a number.
    ///
    /// # Errors
    ///
    /// Bridge failures, or [`BridgeError::UnexpectedValue`] for a
    /// non-number answer.
    pub async fn query_number(&self, command: &Command) -> Result<f64, BridgeError> {
        let value = self.execute(command).await?;
        value.as_f64().ok_or(BridgeError::UnexpectedValue {
            expected: "Number",
            actual: value.kind(),
        })
    }

    fn bound(&self) -> Result<Arc<dyn Executor>, BridgeError> {
        self.executor.read().clone().ok_or(BridgeError::NotLoaded)
    }
}

async fn run(executor: &dyn Executor, command: &Command) -> Result<ReturnValue, BridgeError> {
    debug!(op = command.op(), "executing command");
    let raw = executor.submit(command.render()).await?;
    ReturnValue::decode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::SerialExecutor;
    use crate::testing::ScriptedPeer;
    use serde_json::json;

    fn bridge_with(peer: ScriptedPeer) -> (Bridge, Arc<ScriptedPeer>) {
        let peer = Arc::new(peer);
        let (exec, _worker) = SerialExecutor::spawn(peer.clone(), 8);
        (Bridge::with_executor(Arc::new(exec)), peer)
    }

    #[tokio::test]
    async fn unbound_bridge_fails_immediately() {
        let bridge = Bridge::new();
        assert!(!bridge.is_loaded());
        assert_eq!(
            bridge.execute(&Command::GetZoom).await,
            Err(BridgeError::NotLoaded)
        );
    }

    #[tokio::test]
    async fn execute_decodes_result() {
        let (bridge, peer) = bridge_with(ScriptedPeer::new().reply_to("getZoom", json!(4)));
        assert_eq!(
            bridge.execute(&Command::GetZoom).await,
            Ok(ReturnValue::Number(4.0))
        );
        assert_eq!(peer.scripts(), vec![Command::GetZoom.render()]);
    }

    #[tokio::test]
    async fn non_primitive_command_yields_unsupported() {
        let (bridge, _peer) = bridge_with(ScriptedPeer::new());
        assert_eq!(
            bridge.execute(&Command::SetZoom { zoom: 2.0 }).await,
            Ok(ReturnValue::Unsupported)
        );
    }

    #[tokio::test]
    async fn invalid_shape_is_reported() {
        let (bridge, _peer) = bridge_with(ScriptedPeer::new().reply_to("getBounds", json!([1, 2])));
        assert_eq!(
            bridge.execute(&Command::GetBounds).await,
            Err(BridgeError::invalid_result("[1,2]"))
        );
    }

    #[tokio::test]
    async fn typed_helpers() {
        let (bridge, _peer) = bridge_with(
            ScriptedPeer::new()
                .reply_to("isSourceLoaded", json!(true))
                .reply_to("getPitch", json!(45))
                .reply_to("getZoom", json!("high")),
        );
        let id: SourceId = "eq".parse().expect("valid");
        assert_eq!(bridge.is_source_loaded(&id).await, Ok(true));
        assert_eq!(bridge.query_number(&Command::GetPitch).await, Ok(45.0));
        assert_eq!(
            bridge.query_number(&Command::GetZoom).await,
            Err(BridgeError::UnexpectedValue {
                expected: "Number",
                actual: "String",
            })
        );
    }

    #[tokio::test]
    async fn deadline_expiry_is_timeout() {
        let (bridge, peer) = bridge_with(ScriptedPeer::new().hold_on("getZoom"));
        let result = bridge
            .execute_with_deadline(&Command::GetZoom, Duration::from_millis(20))
            .await;
        assert_eq!(result, Err(BridgeError::Timeout { after_ms: 20 }));

        // the late answer goes nowhere
        assert_eq!(peer.resolve_held(Some(json!(3))), 1);
    }

    #[tokio::test]
    async fn detach_unloads() {
        let (bridge, _peer) = bridge_with(ScriptedPeer::new());
        assert!(bridge.is_loaded());
        assert!(bridge.detach().is_some());
        assert_eq!(
            bridge.execute(&Command::GetZoom).await,
            Err(BridgeError::NotLoaded)
        );
    }
}
