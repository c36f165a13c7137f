//! Style mutation queue.
//!
//! ```text
//! add_layer(id, source)
//!     │
//!     ├── layer registered?          → AlreadyExists
//!     ├── register
//!     ├── source not registered?     → MissingParent (layer stays registered)
//!     └── source given?
//!           ├── no                   → send now          (Applied)
//!           └── is_source_loaded?
//!                 ├── yes            → send now          (Applied)
//!                 └── no             → PendingMutation   (Deferred)
//!
//! ready / load / styledata ──► flush_pending (FIFO, per-task report)
//! ```
//!
//! Failed adds keep their registration. Callers roll back with
//! `remove_layer` / `remove_source`.

mod context;
mod error;
mod pending;
mod registry;

pub use context::{FlushReport, LayerOutcome, StyleContext};
pub use error::{EntityKind, StyleError};
pub use pending::{PendingMutation, PendingMutationQueue};
pub use registry::{EntityTable, LayerEntry, SourceEntry};
