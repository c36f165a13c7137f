//! Decoded peer events.
//!
//! The platform glue hands over raw `(name, json)` pairs. [`Event::decode`]
//! turns them into an [`Event`]:
//!
//! ```text
//! ("touchend", "{\"point\":{\"x\":10,\"y\":20}}")
//!     │
//!     ├── name    → EventName::parse   (unknown → EventError::UnknownEvent)
//!     └── payload → serde_json         (malformed → None, never an error)
//!     ▼
//! Event { name: TouchEnd, payload: Some(..), received_at: Instant }
//! ```

use crate::{EventError, EventName};
use maplink_types::{LngLat, ScreenPoint};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Structured payload attached to an event.
///
/// All fields are optional; the peer only sends what applies to the event.
/// Unrecognized keys are kept in [`extra`](Self::extra).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPayload {
    /// Geographic location of a gesture.
    pub lng_lat: Option<LngLat>,
    /// Screen location of a gesture.
    pub point: Option<ScreenPoint>,
    /// Source the event refers to (`sourcedata`).
    pub source_id: Option<String>,
    /// Layer under a gesture, when the glue resolved one.
    pub layer_id: Option<String>,
    /// Camera center after a camera event.
    pub center: Option<LngLat>,
    pub zoom: Option<f64>,
    pub bearing: Option<f64>,
    pub pitch: Option<f64>,
    /// Error text (`error`).
    pub message: Option<String>,
    /// Any other keys the peer sent.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EventPayload {
    /// Parses a payload, returning `None` for empty, `null` or malformed text.
    #[must_use]
    pub fn parse(json: &str) -> Option<Self> {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return None;
        }
        match serde_json::from_str::<Self>(trimmed) {
            Ok(payload) => Some(payload),
            Err(e) => {
                debug!(error = %e, "malformed event payload, decoding as null");
                None
            }
        }
    }
}

/// A decoded event from the peer.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event name.
    pub name: EventName,
    /// Payload, if one was sent and could be decoded.
    pub payload: Option<EventPayload>,
    /// When the host received the event.
    pub received_at: Instant,
}

impl Event {
    /// Creates an event without payload, received now.
    #[must_use]
    pub fn new(name: EventName) -> Self {
        Self::at(name, Instant::now())
    }

    /// Creates an event without payload, received at `received_at`.
    #[must_use]
    pub fn at(name: EventName, received_at: Instant) -> Self {
        Self {
            name,
            payload: None,
            received_at,
        }
    }

    /// Attaches a payload.
    #[must_use]
    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Creates the synthetic double-tap event.
    #[must_use]
    pub fn double_tap(received_at: Instant) -> Self {
        Self::at(EventName::DoubleTap, received_at)
    }

    /// Decodes a raw `(name, json)` pair received now.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if the name is not in the
    /// closed set. A malformed payload is not an error.
    pub fn decode(name: &str, json: &str) -> Result<Self, EventError> {
        Self::decode_at(name, json, Instant::now())
    }

    /// Decodes a raw `(name, json)` pair with an explicit receive time.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if the name is not in the
    /// closed set.
    pub fn decode_at(name: &str, json: &str, received_at: Instant) -> Result<Self, EventError> {
        let name: EventName = name.parse()?;
        Ok(Self {
            name,
            payload: EventPayload::parse(json),
            received_at,
        })
    }

    /// Returns the gesture coordinate, if present.
    #[must_use]
    pub fn lng_lat(&self) -> Option<LngLat> {
        self.payload.as_ref().and_then(|p| p.lng_lat)
    }

    /// Returns the gesture screen point, if present.
    #[must_use]
    pub fn point(&self) -> Option<ScreenPoint> {
        self.payload.as_ref().and_then(|p| p.point)
    }
}
