//! Event dispatch and double-tap confirmation.
//!
//! # State Machine
//!
//! ```text
//!               touchend                      touchend (Δ < sensitivity)
//!   ┌──────┐ ─────────────► ┌──────────────┐ ──────────────────────────┐
//!   │ Idle │                │ TapSeen(t)   │   record marker, t = now  │
//!   └──────┘                └──────────────┘ ◄─────────────────────────┘
//!
//!   idle + marker in record ──► emit DoubleTap, clear record
//! ```
//!
//! Touch ends and idle notifications feed the state machine and are not
//! forwarded. A `doubletap` sent by the peer is dropped: only the processor
//! produces it. Everything else reaches the listener unmodified, in arrival
//! order.

use super::record::{EventRecord, RecordEntry, DEFAULT_RECORD_CAPACITY};
use crate::config::EventsConfig;
use maplink_event::{Event, EventListener, EventName};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Notify};
use tracing::{debug, trace};

/// Default maximum interval between two taps of a double tap.
pub const DEFAULT_DOUBLE_TAP_SENSITIVITY: Duration = Duration::from_millis(400);

/// Double-tap detection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapState {
    /// No touch end seen yet.
    Idle,
    /// Last touch end arrived at the given instant.
    TapSeen(Instant),
}

/// What the processor did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Passed to the listener unmodified.
    Forwarded,
    /// Consumed by the state machine.
    Recorded,
    /// Consumed, and a synthetic double tap was emitted.
    EmittedDoubleTap,
    /// Discarded.
    Dropped,
}

/// Consumes peer events and forwards them to the listener.
pub struct EventProcessor {
    listener: Arc<dyn EventListener>,
    record: EventRecord,
    state: TapState,
    sensitivity: Duration,
}

impl EventProcessor {
    /// Creates a processor with default sensitivity and record capacity.
    pub fn new(listener: Arc<dyn EventListener>) -> Self {
        Self::with_settings(
            listener,
            DEFAULT_DOUBLE_TAP_SENSITIVITY,
            DEFAULT_RECORD_CAPACITY,
        )
    }

    /// Creates a processor with explicit settings.
    pub fn with_settings(
        listener: Arc<dyn EventListener>,
        sensitivity: Duration,
        record_capacity: usize,
    ) -> Self {
        Self {
            listener,
            record: EventRecord::with_capacity(record_capacity),
            state: TapState::Idle,
            sensitivity,
        }
    }

    /// Creates a processor from the `[events]` configuration section.
    pub fn from_config(listener: Arc<dyn EventListener>, config: &EventsConfig) -> Self {
        Self::with_settings(
            listener,
            config.double_tap_sensitivity(),
            config.record_capacity,
        )
    }

    #[must_use]
    pub fn state(&self) -> TapState {
        self.state
    }

    #[must_use]
    pub fn record(&self) -> &EventRecord {
        &self.record
    }

    #[must_use]
    pub fn sensitivity(&self) -> Duration {
        self.sensitivity
    }

    /// Processes one event.
    pub fn process(&mut self, event: Event) -> Disposition {
        match event.name {
            EventName::TouchEnd => {
                self.on_touch_end(event);
                Disposition::Recorded
            }
            EventName::Idle => self.on_idle(event.received_at),
            EventName::DoubleTap => {
                debug!("dropping peer-sent doubletap");
                Disposition::Dropped
            }
            _ => {
                trace!(event = %event.name, "forwarding event");
                self.listener.on_event(&event);
                Disposition::Forwarded
            }
        }
    }

    fn on_touch_end(&mut self, event: Event) {
        let at = event.received_at;
        self.record.push(RecordEntry::Event(event));

        if let TapState::TapSeen(previous) = self.state {
            let delta = at.saturating_duration_since(previous);
            if delta < self.sensitivity {
                trace!(delta_ms = delta.as_millis() as u64, "double tap candidate");
                self.record.push(RecordEntry::DoubleTapMarker { at });
            }
        }
        self.state = TapState::TapSeen(at);
    }

    fn on_idle(&mut self, at: Instant) -> Disposition {
        if !self.record.has_double_tap_marker() {
            return Disposition::Recorded;
        }
        debug!("double tap confirmed");
        self.listener.on_event(&Event::double_tap(at));
        self.record.clear();
        Disposition::EmittedDoubleTap
    }

    /// Consumes events until the channel closes.
    ///
    /// When `style_ready` is set it is notified after every lifecycle event
    /// that allows pending style mutations to run.
    pub async fn run(mut self, mut rx: mpsc::Receiver<Event>, style_ready: Option<Arc<Notify>>) {
        debug!("event loop started");
        while let Some(event) = rx.recv().await {
            let name = event.name;
            self.process(event);
            if name.is_style_ready() {
                if let Some(notify) = &style_ready {
                    notify.notify_one();
                }
            }
        }
        debug!("event loop stopped");
    }
}
