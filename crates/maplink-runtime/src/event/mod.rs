//! Event consumption.
//!
//! ```text
//! platform glue ──deliver(name, json)──► EventSink ──mpsc──► EventProcessor::run
//!                                                                │
//!                                              EventListener ◄───┘
//! ```

mod processor;
mod record;
mod sink;

pub use processor::{Disposition, EventProcessor, TapState, DEFAULT_DOUBLE_TAP_SENSITIVITY};
pub use record::{EventRecord, RecordEntry, DEFAULT_RECORD_CAPACITY};
pub use sink::{event_channel, EventSink, DEFAULT_EVENT_QUEUE_CAPACITY};
