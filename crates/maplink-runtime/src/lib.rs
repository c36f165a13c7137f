//! maplink runtime: drives a map engine living in an embedded script
//! runtime.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Shared Types                           │
//! │  maplink-types : ids, geo values, ErrorCode                 │
//! │  maplink-event : EventName, Event, EventListener            │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Runtime Layer (THIS CRATE)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  command/  : Command, script rendering                      │
//! │  bridge/   : Bridge, ReturnValue, BridgeError               │
//! │  executor/ : Executor, ScriptPeer, Completion, Serial...    │
//! │  event/    : EventSink, EventProcessor, EventRecord         │
//! │  style/    : StyleContext, pending queue, entity table      │
//! │  session   : MapSession wiring it all together              │
//! │  config/   : layered MaplinkConfig                          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Frontend Layer                         │
//! │  maplink-cli : render / decode / replay tooling             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Data Flow
//!
//! ```text
//! caller ─► Command ─► Bridge ─► Executor ─► peer
//!                                              │ raw result
//! caller ◄─ ReturnValue ◄─ decode ◄────────────┘
//!
//! peer ─► (name, json) ─► EventSink ─► EventProcessor ─► EventListener
//! ```
//!
//! # Example
//!
//! ```
//! use maplink_runtime::testing::ScriptedPeer;
//! use maplink_runtime::{Bridge, Command, ReturnValue, SerialExecutor};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # tokio_test_block(async {
//! let peer = Arc::new(ScriptedPeer::new().reply_to("getZoom", json!(11)));
//! let (executor, _worker) = SerialExecutor::spawn(peer, 16);
//! let bridge = Bridge::with_executor(Arc::new(executor));
//!
//! let zoom = bridge.execute(&Command::GetZoom).await;
//! assert_eq!(zoom, Ok(ReturnValue::Number(11.0)));
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Builder::new_current_thread()
//! #         .enable_all()
//! #         .build()
//! #         .expect("runtime")
//! #         .block_on(f);
//! # }
//! ```

pub mod bridge;
pub mod command;
pub mod config;
pub mod event;
pub mod executor;
pub mod session;
pub mod style;
pub mod testing;

pub use bridge::{Bridge, BridgeError, ReturnValue};
pub use command::Command;
pub use config::{ConfigError, ConfigLoader, MaplinkConfig};
pub use event::{event_channel, Disposition, EventProcessor, EventSink, TapState};
pub use executor::{Completion, Executor, ScriptPeer, SerialExecutor};
pub use session::MapSession;
pub use style::{FlushReport, LayerOutcome, StyleContext, StyleError};
