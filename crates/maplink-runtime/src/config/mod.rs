//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌────────────────────────────────────────────┐
//! │  1. Environment Variables (MAPLINK_*)      │  Runtime override
//! ├────────────────────────────────────────────┤
//! │  2. Project Config (.maplink/config.toml)  │  Project-specific
//! ├────────────────────────────────────────────┤
//! │  3. Global Config (~/.maplink/config.toml) │  User defaults
//! ├────────────────────────────────────────────┤
//! │  4. Default Values (compile-time)          │  Fallback
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `MAPLINK_DEBUG` | `debug` | bool |
//! | `MAPLINK_DOUBLE_TAP_MS` | `events.double_tap_sensitivity_ms` | u64 |
//! | `MAPLINK_RECORD_CAPACITY` | `events.record_capacity` | usize |
//! | `MAPLINK_EVENT_QUEUE_CAPACITY` | `events.queue_capacity` | usize |
//! | `MAPLINK_EXECUTOR_QUEUE_CAPACITY` | `executor.queue_capacity` | usize |
//! | `MAPLINK_BRIDGE_DEADLINE_MS` | `bridge.deadline_ms` | u64 or `none` |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.maplink/config.toml
//! debug = false
//!
//! [events]
//! double_tap_sensitivity_ms = 400
//! record_capacity = 20
//! queue_capacity = 256
//!
//! [executor]
//! queue_capacity = 64
//!
//! [bridge]
//! deadline_ms = 10000
//! ```

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::{BridgeConfig, EventsConfig, ExecutorConfig, MaplinkConfig};

use std::path::PathBuf;

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".maplink";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";

/// Returns the global maplink directory (`~/.maplink`).
///
/// Falls back to `.maplink` in the working directory when no home
/// directory is known.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(PROJECT_CONFIG_DIR))
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_DIR))
}

/// Returns the global config file path (`~/.maplink/config.toml`).
#[must_use]
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(PROJECT_CONFIG_FILE)
}
