//! Event layer errors.
//!
//! Inbound events are best-effort telemetry: these errors are logged and
//! the event is dropped. They never reach the listener.
//!
//! | Variant | Code | Numeric | Recoverable |
//! |---------|------|---------|-------------|
//! | [`EventError::UnknownEvent`] | `EVENT_UNKNOWN_NAME` | 3001 | No |
//! | [`EventError::ChannelClosed`] | `EVENT_CHANNEL_CLOSED` | 3002 | No |
//! | [`EventError::QueueFull`] | `EVENT_QUEUE_FULL` | 3003 | Yes |

use maplink_types::ErrorCode;
use thiserror::Error;

/// Event layer error.
///
/// # Example
///
/// ```
/// use maplink_event::EventError;
/// use maplink_types::ErrorCode;
///
/// let err = EventError::unknown("teleport");
/// assert_eq!(err.code(), "EVENT_UNKNOWN_NAME");
/// assert_eq!(err.numeric_code(), 3001);
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The peer sent a name outside the closed set.
    #[error("unknown event name: {name:?}")]
    UnknownEvent {
        /// The rejected name.
        name: String,
    },

    /// The event consumer loop has shut down.
    #[error("event channel closed")]
    ChannelClosed,

    /// The inbound queue is at capacity; the event was dropped.
    #[error("event queue full (capacity {capacity})")]
    QueueFull {
        /// Configured queue capacity.
        capacity: usize,
    },
}

impl EventError {
    /// Creates an unknown-name error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownEvent { name: name.into() }
    }
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownEvent { .. } => "EVENT_UNKNOWN_NAME",
            Self::ChannelClosed => "EVENT_CHANNEL_CLOSED",
            Self::QueueFull { .. } => "EVENT_QUEUE_FULL",
        }
    }

    fn numeric_code(&self) -> u32 {
        match self {
            Self::UnknownEvent { .. } => 3001,
            Self::ChannelClosed => 3002,
            Self::QueueFull { .. } => 3003,
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::QueueFull { .. })
    }
}
