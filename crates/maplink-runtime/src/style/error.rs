//! Style mutation errors.
//!
//! # Error Codes
//!
//! | Variant | Code | Numeric | Recoverable |
//! |---------|------|---------|-------------|
//! | [`StyleError::AlreadyExists`] | `STYLE_ALREADY_EXISTS` | 2001 | No |
//! | [`StyleError::MissingParent`] | `STYLE_MISSING_PARENT` | 2002 | No |
//! | [`StyleError::NotFound`] | `STYLE_NOT_FOUND` | 2003 | No |
//! | [`StyleError::Bridge`] | inner [`BridgeError`] code | 1xxx | inner |
//!
//! Caller misuse is detected before anything reaches the peer. Bridge
//! failures pass through with their own code.

use crate::bridge::BridgeError;
use maplink_types::{ErrorCode, LayerId, SourceId};
use thiserror::Error;

/// Kind of registered style entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Source,
    Layer,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Layer => f.write_str("layer"),
        }
    }
}

/// Style mutation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    /// An entity with this id is already registered.
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: EntityKind, id: String },

    /// The layer's source is not registered.
    #[error("layer {layer} references unregistered source {parent}")]
    MissingParent { layer: LayerId, parent: SourceId },

    /// No entity with this id is registered.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// The bridge call failed.
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl StyleError {
    pub(crate) fn source_exists(id: &SourceId) -> Self {
        Self::AlreadyExists {
            kind: EntityKind::Source,
            id: id.to_string(),
        }
    }

    pub(crate) fn layer_exists(id: &LayerId) -> Self {
        Self::AlreadyExists {
            kind: EntityKind::Layer,
            id: id.to_string(),
        }
    }

    pub(crate) fn source_not_found(id: &SourceId) -> Self {
        Self::NotFound {
            kind: EntityKind::Source,
            id: id.to_string(),
        }
    }

    pub(crate) fn layer_not_found(id: &LayerId) -> Self {
        Self::NotFound {
            kind: EntityKind::Layer,
            id: id.to_string(),
        }
    }

    /// Returns the bridge failure, if that is what this is.
    #[must_use]
    pub fn as_bridge(&self) -> Option<&BridgeError> {
        match self {
            Self::Bridge(e) => Some(e),
            _ => None,
        }
    }
}

impl ErrorCode for StyleError {
    fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists { .. } => "STYLE_ALREADY_EXISTS",
            Self::MissingParent { .. } => "STYLE_MISSING_PARENT",
            Self::NotFound { .. } => "STYLE_NOT_FOUND",
            Self::Bridge(e) => e.code(),
        }
    }

    fn numeric_code(&self) -> u32 {
        match self {
            Self::AlreadyExists { .. } => 2001,
            Self::MissingParent { .. } => 2002,
            Self::NotFound { .. } => 2003,
            Self::Bridge(e) => e.numeric_code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Bridge(e) => e.is_recoverable(),
            _ => false,
        }
    }
}
