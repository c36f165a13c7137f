//! Peer execution.
//!
//! Two seams separate the bridge from the platform:
//!
//! - [`Executor`]: async `submit(script) → raw result`, used by the
//!   [`Bridge`](crate::Bridge).
//! - [`ScriptPeer`]: the platform glue that actually evaluates script text
//!   and settles a [`Completion`] when the runtime answers.
//!
//! [`SerialExecutor`] connects the two with a bounded FIFO queue.

mod completion;
mod serial;

pub use completion::{Completion, RawResult};
pub use serial::{SerialExecutor, DEFAULT_QUEUE_CAPACITY};

use crate::bridge::BridgeError;
use async_trait::async_trait;
use serde_json::Value;

/// Submits script text to a peer and awaits its raw result.
///
/// Each submission settles exactly once. `Ok(None)` means the script
/// produced nothing. Executors impose no timeout of their own.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Submits a script.
    async fn submit(&self, script: String) -> Result<Option<Value>, BridgeError>;
}

/// Platform glue evaluating scripts in the embedded runtime.
///
/// `evaluate` must not block. The glue keeps the completion until the
/// runtime answers, then calls [`Completion::resolve`],
/// [`Completion::resolve_json`] or [`Completion::fail`]. Dropping it
/// unresolved fails the submission with [`BridgeError::Abandoned`].
pub trait ScriptPeer: Send + Sync + 'static {
    /// Starts evaluating `script`.
    fn evaluate(&self, script: String, completion: Completion);
}
