//! Core types for maplink.
//!
//! maplink lets a host application drive a map rendering engine that lives
//! inside an embedded script runtime: it sends commands as script text,
//! correlates their asynchronous results and consumes the engine's events.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Shared Types                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  maplink-types   : ids, geo values, ErrorCode  ◄── HERE     │
//! │  maplink-event   : EventName, Event, EventListener          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Runtime Layer                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  maplink-runtime : Command, Bridge, Executor,               │
//! │                    EventProcessor, StyleContext, config     │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Frontend Layer                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  maplink-cli     : render / decode / replay tooling         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use maplink_types::{LayerId, LngLat, RequestId, SourceId};
//!
//! let source: SourceId = "earthquakes".parse().expect("valid id");
//! let layer: LayerId = "earthquake-circles".parse().expect("valid id");
//! let berlin = LngLat::new(13.405, 52.52);
//!
//! assert_eq!(source.as_str(), "earthquakes");
//! assert_eq!(layer.to_string(), "earthquake-circles");
//! assert_eq!(berlin.to_array(), [13.405, 52.52]);
//!
//! let req = RequestId::new();
//! assert!(req.to_string().starts_with("req:"));
//! ```

mod construct;
mod error;
mod geo;
mod id;

pub use construct::TryNew;
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use geo::{EdgeInsets, LngLat, LngLatBounds, ScreenPoint};
pub use id::{IdError, LayerId, MarkerId, RequestId, SourceId};
