//! Single-shot result continuation.

use crate::bridge::BridgeError;
use maplink_types::RequestId;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::trace;

/// Raw outcome of one submission.
pub type RawResult = Result<Option<Value>, BridgeError>;

/// Continuation handed to the peer with each script.
///
/// Settling consumes the completion, so a submission resolves at most once.
/// Dropping it unresolved settles the submission as
/// [`BridgeError::Abandoned`].
///
/// If the caller stopped waiting (deadline expired, future dropped) the
/// late result is discarded.
#[derive(Debug)]
pub struct Completion {
    id: RequestId,
    tx: Option<oneshot::Sender<RawResult>>,
}

impl Completion {
    /// Creates a completion and the receiver its result arrives on.
    #[must_use]
    pub fn channel() -> (Self, oneshot::Receiver<RawResult>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                id: RequestId::new(),
                tx: Some(tx),
            },
            rx,
        )
    }

    /// Correlation id, for logs.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.id
    }

    /// Returns `true` if the caller is no longer waiting.
    #[must_use]
    pub fn is_abandoned_by_caller(&self) -> bool {
        self.tx.as_ref().map_or(true, oneshot::Sender::is_closed)
    }

    /// Resolves with a raw value, or with nothing.
    pub fn resolve(mut self, raw: Option<Value>) {
        self.settle(Ok(raw));
    }

    /// Resolves from the peer's JSON text.
    ///
    /// Empty text and `undefined` mean the script produced nothing. Text
    /// that is not JSON fails the submission with
    /// [`BridgeError::InvalidResultType`].
    pub fn resolve_json(mut self, text: Option<&str>) {
        let result = match text.map(str::trim) {
            None | Some("") | Some("undefined") => Ok(None),
            Some(text) => serde_json::from_str(text)
                .map(Some)
                .map_err(|_| BridgeError::invalid_result(text)),
        };
        self.settle(result);
    }

    /// Fails the submission.
    pub fn fail(mut self, error: BridgeError) {
        self.settle(Err(error));
    }

    fn settle(&mut self, result: RawResult) {
        if let Some(tx) = self.tx.take() {
            if tx.send(result).is_err() {
                trace!(request = %self.id, "caller stopped waiting, dropping late result");
            }
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.tx.is_some() {
            trace!(request = %self.id, "completion dropped unresolved");
            self.settle(Err(BridgeError::Abandoned));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn resolve_delivers_value() {
        let (completion, rx) = Completion::channel();
        completion.resolve(Some(json!(3)));
        assert_eq!(rx.await.expect("settled"), Ok(Some(json!(3))));
    }

    #[tokio::test]
    async fn drop_settles_as_abandoned() {
        let (completion, rx) = Completion::channel();
        drop(completion);
        assert_eq!(rx.await.expect("settled"), Err(BridgeError::Abandoned));
    }

    #[tokio::test]
    async fn fail_delivers_error() {
        let (completion, rx) = Completion::channel();
        completion.fail(BridgeError::script(1, "ReferenceError"));
        assert_eq!(
            rx.await.expect("settled"),
            Err(BridgeError::script(1, "ReferenceError"))
        );
    }

    #[tokio::test]
    async fn resolve_json_text() {
        let (c, rx) = Completion::channel();
        c.resolve_json(Some(r#"{"lng":1}"#));
        assert_eq!(rx.await.expect("settled"), Ok(Some(json!({"lng": 1}))));

        let (c, rx) = Completion::channel();
        c.resolve_json(Some("undefined"));
        assert_eq!(rx.await.expect("settled"), Ok(None));

        let (c, rx) = Completion::channel();
        c.resolve_json(Some("<html>"));
        assert_eq!(
            rx.await.expect("settled"),
            Err(BridgeError::invalid_result("<html>"))
        );
    }

    #[test]
    fn late_result_after_caller_left_is_dropped() {
        let (completion, rx) = Completion::channel();
        drop(rx);
        assert!(completion.is_abandoned_by_caller());
        completion.resolve(Some(json!(1)));
    }
}
