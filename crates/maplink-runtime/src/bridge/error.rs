//! Bridge and executor errors.
//!
//! Every failure between a caller and the peer surfaces as a
//! [`BridgeError`]. The style queue propagates them unchanged.
//!
//! # Error Codes
//!
//! | Variant | Code | Numeric | Recoverable |
//! |---------|------|---------|-------------|
//! | [`BridgeError::NotLoaded`] | `BRIDGE_NOT_LOADED` | 1001 | Yes |
//! | [`BridgeError::InvalidResultType`] | `BRIDGE_INVALID_RESULT_TYPE` | 1002 | No |
//! | [`BridgeError::Script`] | `BRIDGE_SCRIPT_FAILED` | 1003 | No |
//! | [`BridgeError::Closed`] | `BRIDGE_CLOSED` | 1004 | No |
//! | [`BridgeError::Abandoned`] | `BRIDGE_ABANDONED` | 1005 | No |
//! | [`BridgeError::Timeout`] | `BRIDGE_TIMEOUT` | 1006 | Yes |
//! | [`BridgeError::UnexpectedValue`] | `BRIDGE_UNEXPECTED_VALUE` | 1007 | No |
//!
//! # Recoverability
//!
//! - `NotLoaded`: the peer may attach later
//! - `Timeout`: the peer may just be slow

use maplink_types::ErrorCode;
use thiserror::Error;

/// Failure of a bridge call.
///
/// # Example
///
/// ```
/// use maplink_runtime::BridgeError;
/// use maplink_types::ErrorCode;
///
/// let err = BridgeError::NotLoaded;
/// assert_eq!(err.code(), "BRIDGE_NOT_LOADED");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    /// No executor is bound to the bridge.
    #[error("bridge not loaded")]
    NotLoaded,

    /// The peer returned a value outside the decodable set.
    #[error("invalid result type: {raw}")]
    InvalidResultType {
        /// Raw JSON text of the offending value.
        raw: String,
    },

    /// The peer reported a script failure.
    #[error("script failed ({code}): {message}")]
    Script {
        /// Peer-defined numeric code.
        code: i64,
        /// Peer-provided reason.
        message: String,
    },

    /// The executor has shut down.
    #[error("executor closed")]
    Closed,

    /// The peer dropped the completion without resolving it.
    #[error("submission abandoned by peer")]
    Abandoned,

    /// The caller's deadline expired before the peer answered.
    #[error("bridge call timed out after {after_ms}ms")]
    Timeout {
        /// Deadline that expired.
        after_ms: u64,
    },

    /// The value decoded fine but is not the variant the caller asked for.
    #[error("expected {expected}, got {actual}")]
    UnexpectedValue {
        /// Variant the caller expected.
        expected: &'static str,
        /// Variant that was returned.
        actual: &'static str,
    },
}

impl BridgeError {
    /// Creates an invalid result type error from raw text.
    pub fn invalid_result(raw: impl Into<String>) -> Self {
        Self::InvalidResultType { raw: raw.into() }
    }

    /// Creates a script failure.
    pub fn script(code: i64, message: impl Into<String>) -> Self {
        Self::Script {
            code,
            message: message.into(),
        }
    }
}

impl ErrorCode for BridgeError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotLoaded => "BRIDGE_NOT_LOADED",
            Self::InvalidResultType { .. } => "BRIDGE_INVALID_RESULT_TYPE",
            Self::Script { .. } => "BRIDGE_SCRIPT_FAILED",
            Self::Closed => "BRIDGE_CLOSED",
            Self::Abandoned => "BRIDGE_ABANDONED",
            Self::Timeout { .. } => "BRIDGE_TIMEOUT",
            Self::UnexpectedValue { .. } => "BRIDGE_UNEXPECTED_VALUE",
        }
    }

    fn numeric_code(&self) -> u32 {
        match self {
            Self::NotLoaded => 1001,
            Self::InvalidResultType { .. } => 1002,
            Self::Script { .. } => 1003,
            Self::Closed => 1004,
            Self::Abandoned => 1005,
            Self::Timeout { .. } => 1006,
            Self::UnexpectedValue { .. } => 1007,
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotLoaded | Self::Timeout { .. })
    }
}
