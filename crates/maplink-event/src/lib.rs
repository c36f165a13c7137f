//! Peer event model for maplink.
//!
//! The map engine reports lifecycle, camera and gesture activity as
//! `(name, json)` pairs. This crate defines the closed set of names, the
//! decoded [`Event`] value and the [`EventListener`] seam through which the
//! host receives them.
//!
//! Decoding is lenient on payloads and strict on names: a malformed payload
//! yields an event with no payload, an unknown name yields
//! [`EventError::UnknownEvent`].
//!
//! # Example
//!
//! ```
//! use maplink_event::{Event, EventName};
//!
//! let event = Event::decode("click", r#"{"lngLat":{"lng":1.0,"lat":2.0}}"#)
//!     .expect("known event");
//! assert_eq!(event.name, EventName::Tap);
//! assert_eq!(event.lng_lat().map(|p| p.lat), Some(2.0));
//! ```

mod error;
mod event;
mod listener;
mod name;

pub use error::EventError;
pub use event::{Event, EventPayload};
pub use listener::EventListener;
pub use name::EventName;
