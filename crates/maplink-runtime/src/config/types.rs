//! Configuration type definitions.

use super::ConfigError;
use crate::event::{DEFAULT_EVENT_QUEUE_CAPACITY, DEFAULT_RECORD_CAPACITY};
use crate::executor::DEFAULT_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main maplink configuration.
///
/// Every section defaults, so partial files are fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct MaplinkConfig {
    /// Enable debug logging.
    pub debug: bool,

    /// Inbound event handling.
    pub events: EventsConfig,

    /// Peer submission queue.
    pub executor: ExecutorConfig,

    /// Bridge call behavior.
    pub bridge: BridgeConfig,
}

impl MaplinkConfig {
    /// Parses from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is not a valid config.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serializes to TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] on failure.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deserializes from an already layered TOML table.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if a value has the wrong type.
    pub fn from_table(table: toml::Table) -> Result<Self, toml::de::Error> {
        toml::Value::Table(table).try_into()
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.events.record_capacity == 0 {
            return Err(ConfigError::invalid_value(
                "events.record_capacity",
                "must be at least 1",
            ));
        }
        if self.events.queue_capacity == 0 {
            return Err(ConfigError::invalid_value(
                "events.queue_capacity",
                "must be at least 1",
            ));
        }
        if self.executor.queue_capacity == 0 {
            return Err(ConfigError::invalid_value(
                "executor.queue_capacity",
                "must be at least 1",
            ));
        }
        if self.bridge.deadline_ms == Some(0) {
            return Err(ConfigError::invalid_value(
                "bridge.deadline_ms",
                "must be positive when set",
            ));
        }
        Ok(())
    }
}

/// `[events]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EventsConfig {
    /// Maximum interval between the two taps of a double tap.
    pub double_tap_sensitivity_ms: u64,

    /// Entries kept in the gesture record.
    pub record_capacity: usize,

    /// Inbound event queue capacity.
    pub queue_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            double_tap_sensitivity_ms: 400,
            record_capacity: DEFAULT_RECORD_CAPACITY,
            queue_capacity: DEFAULT_EVENT_QUEUE_CAPACITY,
        }
    }
}

impl EventsConfig {
    /// Sensitivity as a [`Duration`].
    #[must_use]
    pub fn double_tap_sensitivity(&self) -> Duration {
        Duration::from_millis(self.double_tap_sensitivity_ms)
    }
}

/// `[executor]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Submission queue capacity.
    pub queue_capacity: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// `[bridge]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Deadline applied to every bridge call. Unset means wait forever.
    pub deadline_ms: Option<u64>,
}

impl BridgeConfig {
    /// Deadline as a [`Duration`].
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}
