//! Event listener abstraction.

use crate::Event;

/// Receives events forwarded by the event processor.
///
/// Calls happen on the event consumer task, one at a time, in arrival
/// order. Implementations should return quickly.
///
/// Any `Fn(&Event) + Send + Sync` closure is a listener:
///
/// ```
/// use maplink_event::{Event, EventListener, EventName};
///
/// let listener = |event: &Event| assert_eq!(event.name, EventName::Load);
/// listener.on_event(&Event::new(EventName::Load));
/// ```
pub trait EventListener: Send + Sync {
    /// Handles one event.
    fn on_event(&self, event: &Event);
}

impl<F> EventListener for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn on_event(&self, event: &Event) {
        self(event);
    }
}
