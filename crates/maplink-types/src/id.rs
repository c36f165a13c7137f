//! Identifier types for maplink.
//!
//! Two families of identifiers exist:
//!
//! - [`RequestId`]: UUID-based, generated internally for every script
//!   submission so that a result can be correlated in logs.
//! - Style identifiers ([`SourceId`], [`LayerId`], [`MarkerId`]): chosen by
//!   the caller and embedded into peer script text, so they are validated
//!   at construction (non-empty, no control characters).

use crate::TryNew;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identifier for one script submission to the peer.
///
/// # Example
///
/// ```
/// use maplink_types::RequestId;
///
/// let a = RequestId::new();
/// let b = RequestId::new();
/// assert_ne!(a, b);
/// assert!(a.to_string().starts_with("req:"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

#[allow(clippy::new_without_default)] // generated by the executor, never defaulted
impl RequestId {
    /// Creates a new [`RequestId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req:{}", self.0)
    }
}

/// Validation failure for a caller-chosen identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The identifier was empty.
    #[error("{kind} identifier must not be empty")]
    Empty {
        /// Identifier kind ("source", "layer", "marker").
        kind: &'static str,
    },

    /// The identifier contained a control character.
    #[error("{kind} identifier {value:?} contains a control character")]
    ControlCharacter {
        /// Identifier kind.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}

fn validate(kind: &'static str, value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty { kind });
    }
    if value.chars().any(char::is_control) {
        return Err(IdError::ControlCharacter {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

macro_rules! style_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Identifier kind used in error messages.
            pub const KIND: &'static str = $kind;

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryNew for $name {
            type Error = IdError;
            type Args = String;

            fn try_new(value: String) -> Result<Self, Self::Error> {
                validate($kind, &value)?;
                Ok(Self(value))
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::try_new(value.to_string())
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_new(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

style_id!(
    /// Identifier of a style source (GeoJSON, vector tiles, raster...).
    ///
    /// ```
    /// use maplink_types::SourceId;
    ///
    /// let id: SourceId = "earthquakes".parse().expect("valid id");
    /// assert_eq!(id.as_str(), "earthquakes");
    /// assert!("".parse::<SourceId>().is_err());
    /// ```
    SourceId,
    "source"
);

style_id!(
    /// Identifier of a style layer.
    LayerId,
    "layer"
);

style_id!(
    /// Identifier of a point annotation (marker).
    MarkerId,
    "marker"
);
