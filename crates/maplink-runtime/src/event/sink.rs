//! Inbound event boundary.
//!
//! The platform glue calls [`EventSink::deliver`] with raw `(name, json)`
//! pairs from whatever thread it runs on. Events are decoded there and
//! queued for the processor's consumer loop.

use maplink_event::{Event, EventError};
use tokio::sync::mpsc;
use tracing::warn;

/// Default inbound queue capacity.
pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 256;

/// Creates a sink and the receiver the consumer loop reads from.
///
/// A `capacity` of 0 is treated as 1.
#[must_use]
pub fn event_channel(capacity: usize) -> (EventSink, mpsc::Receiver<Event>) {
    let capacity = capacity.max(1);
    let (tx, rx) = mpsc::channel(capacity);
    (EventSink { tx, capacity }, rx)
}

/// Producer side of the inbound event queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<Event>,
    capacity: usize,
}

impl EventSink {
    /// Decodes and queues a raw event. Never blocks.
    ///
    /// # Errors
    ///
    /// - [`EventError::UnknownEvent`] for a name outside the closed set
    /// - [`EventError::QueueFull`] when the consumer is behind
    /// - [`EventError::ChannelClosed`] when the consumer has stopped
    ///
    /// Every error is logged here; callers may ignore it.
    pub fn deliver(&self, name: &str, json: &str) -> Result<(), EventError> {
        let event = Event::decode(name, json).inspect_err(|e| {
            warn!(error = %e, "dropping inbound event");
        })?;
        self.deliver_event(event)
    }

    /// Queues an already decoded event. Never blocks.
    ///
    /// # Errors
    ///
    /// Same as [`deliver`](Self::deliver), minus decoding.
    pub fn deliver_event(&self, event: Event) -> Result<(), EventError> {
        let name = event.name;
        self.tx.try_send(event).map_err(|e| {
            let err = match e {
                mpsc::error::TrySendError::Full(_) => EventError::QueueFull {
                    capacity: self.capacity,
                },
                mpsc::error::TrySendError::Closed(_) => EventError::ChannelClosed,
            };
            warn!(event = %name, error = %err, "dropping inbound event");
            err
        })
    }

    /// Returns `true` once the consumer loop has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
