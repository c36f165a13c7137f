//! In-memory test doubles.
//!
//! - [`ScriptedPeer`]: a [`ScriptPeer`] answering scripts from a rule list
//! - [`RecordingListener`]: an [`EventListener`] that keeps what it receives
//!
//! # Example
//!
//! ```
//! use maplink_runtime::testing::ScriptedPeer;
//! use serde_json::json;
//!
//! let peer = ScriptedPeer::new()
//!     .reply_to("getZoom", json!(5))
//!     .hold_on("flyTo");
//! assert!(peer.scripts().is_empty());
//! ```

use crate::bridge::BridgeError;
use crate::executor::{Completion, ScriptPeer};
use maplink_event::{Event, EventListener, EventName};
use parking_lot::Mutex;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Debug, Clone)]
enum Reply {
    Value(Option<Value>),
    Fail(BridgeError),
    Drop,
    Hold,
}

/// Scripted peer.
///
/// Each incoming script is matched against the rules in insertion order; the
/// first rule whose pattern is a substring of the script decides the reply.
/// Unmatched scripts resolve with `null`, like a real peer evaluating a
/// script ending in `null;`.
#[derive(Default)]
pub struct ScriptedPeer {
    rules: Vec<(String, Reply)>,
    scripts: Mutex<Vec<String>>,
    held: Mutex<Vec<Completion>>,
}

impl ScriptedPeer {
    /// Creates a peer with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves matching scripts with `value`.
    #[must_use]
    pub fn reply_to(self, pattern: &str, value: Value) -> Self {
        self.rule(pattern, Reply::Value(Some(value)))
    }

    /// Resolves matching scripts with nothing.
    #[must_use]
    pub fn nothing_on(self, pattern: &str) -> Self {
        self.rule(pattern, Reply::Value(None))
    }

    /// Fails matching scripts.
    #[must_use]
    pub fn fail_on(self, pattern: &str, error: BridgeError) -> Self {
        self.rule(pattern, Reply::Fail(error))
    }

    /// Drops the completion of matching scripts unresolved.
    #[must_use]
    pub fn drop_on(self, pattern: &str) -> Self {
        self.rule(pattern, Reply::Drop)
    }

    /// Keeps the completion of matching scripts until
    /// [`resolve_held`](Self::resolve_held).
    #[must_use]
    pub fn hold_on(self, pattern: &str) -> Self {
        self.rule(pattern, Reply::Hold)
    }

    fn rule(mut self, pattern: &str, reply: Reply) -> Self {
        self.rules.push((pattern.to_string(), reply));
        self
    }

    /// Scripts received so far, in order.
    #[must_use]
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().clone()
    }

    /// Number of scripts received whose text contains `pattern`.
    #[must_use]
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.scripts
            .lock()
            .iter()
            .filter(|s| s.contains(pattern))
            .count()
    }

    /// Number of completions currently held.
    #[must_use]
    pub fn held_count(&self) -> usize {
        self.held.lock().len()
    }

    /// Resolves every held completion with `raw`, returning how many.
    pub fn resolve_held(&self, raw: Option<Value>) -> usize {
        let held: Vec<Completion> = std::mem::take(&mut *self.held.lock());
        let count = held.len();
        for completion in held {
            completion.resolve(raw.clone());
        }
        count
    }
}

impl ScriptPeer for ScriptedPeer {
    fn evaluate(&self, script: String, completion: Completion) {
        let reply = self
            .rules
            .iter()
            .find(|(pattern, _)| script.contains(pattern.as_str()))
            .map_or(Reply::Value(Some(Value::Null)), |(_, reply)| reply.clone());
        self.scripts.lock().push(script);

        match reply {
            Reply::Value(raw) => completion.resolve(raw),
            Reply::Fail(error) => completion.fail(error),
            Reply::Drop => drop(completion),
            Reply::Hold => self.held.lock().push(completion),
        }
    }
}

/// Listener that records every event it receives.
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<Event>>,
    notify: Notify,
}

impl RecordingListener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Names of the events received so far.
    #[must_use]
    pub fn names(&self) -> Vec<EventName> {
        self.events.lock().iter().map(|e| e.name).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Waits until at least `count` events were received.
    ///
    /// Returns `false` if `timeout` elapsed first.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let wait = async {
            loop {
                let notified = self.notify.notified();
                if self.len() >= count {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, wait).await.is_ok()
    }
}

impl EventListener for RecordingListener {
    fn on_event(&self, event: &Event) {
        self.events.lock().push(event.clone());
        self.notify.notify_waiters();
    }
}
