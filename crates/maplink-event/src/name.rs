//! Event names emitted by the peer.
//!
//! The set is closed: the glue script installed in the peer only forwards
//! the names listed here. Anything else is rejected at decode time.
//!
//! | Name | Wire name | Kind |
//! |------|-----------|------|
//! | `Ready` | `ready` | Lifecycle: map object created, bridge installed |
//! | `Load` | `load` | Lifecycle: first full render |
//! | `StyleData` | `styledata` | Lifecycle: style loaded or changed |
//! | `SourceData` | `sourcedata` | Source loaded or changed |
//! | `Idle` | `idle` | No pending animation or render work |
//! | `Move*`, `Zoom*` | `move`, `movestart`, `moveend`, `zoom`, ... | Camera |
//! | `Rotate`, `Pitch` | `rotate`, `pitch` | Camera |
//! | `Tap`, `LongPress` | `tap` (`click`), `longpress` (`contextmenu`) | Gesture |
//! | `TouchStart`, `TouchEnd` | `touchstart`, `touchend` | Gesture |
//! | `DoubleTap` | `doubletap` | Synthetic, produced by the event processor |
//! | `Error` | `error` | Peer-side failure report |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed set of peer event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventName {
    Ready,
    Load,
    StyleData,
    SourceData,
    Idle,
    Move,
    MoveStart,
    MoveEnd,
    Zoom,
    ZoomStart,
    ZoomEnd,
    Rotate,
    Pitch,
    Tap,
    LongPress,
    TouchStart,
    TouchEnd,
    /// Confirmed double interaction. Only the event processor produces it.
    DoubleTap,
    Error,
}

impl EventName {
    /// Every name, in declaration order.
    pub const ALL: [EventName; 19] = [
        Self::Ready,
        Self::Load,
        Self::StyleData,
        Self::SourceData,
        Self::Idle,
        Self::Move,
        Self::MoveStart,
        Self::MoveEnd,
        Self::Zoom,
        Self::ZoomStart,
        Self::ZoomEnd,
        Self::Rotate,
        Self::Pitch,
        Self::Tap,
        Self::LongPress,
        Self::TouchStart,
        Self::TouchEnd,
        Self::DoubleTap,
        Self::Error,
    ];

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Load => "load",
            Self::StyleData => "styledata",
            Self::SourceData => "sourcedata",
            Self::Idle => "idle",
            Self::Move => "move",
            Self::MoveStart => "movestart",
            Self::MoveEnd => "moveend",
            Self::Zoom => "zoom",
            Self::ZoomStart => "zoomstart",
            Self::ZoomEnd => "zoomend",
            Self::Rotate => "rotate",
            Self::Pitch => "pitch",
            Self::Tap => "tap",
            Self::LongPress => "longpress",
            Self::TouchStart => "touchstart",
            Self::TouchEnd => "touchend",
            Self::DoubleTap => "doubletap",
            Self::Error => "error",
        }
    }

    /// Parses a wire name, accepting the peer's DOM aliases
    /// (`click` for `tap`, `contextmenu` for `longpress`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "click" => Some(Self::Tap),
            "contextmenu" => Some(Self::LongPress),
            other => Self::ALL.into_iter().find(|n| n.as_str() == other),
        }
    }

    /// Returns `true` for lifecycle names after which pending style
    /// mutations may be applied.
    #[must_use]
    pub fn is_style_ready(&self) -> bool {
        matches!(self, Self::Ready | Self::Load | Self::StyleData)
    }

    /// Returns `true` for camera movement names.
    #[must_use]
    pub fn is_camera(&self) -> bool {
        matches!(
            self,
            Self::Move
                | Self::MoveStart
                | Self::MoveEnd
                | Self::Zoom
                | Self::ZoomStart
                | Self::ZoomEnd
                | Self::Rotate
                | Self::Pitch
        )
    }

    /// Returns `true` for gesture names.
    #[must_use]
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            Self::Tap | Self::LongPress | Self::TouchStart | Self::TouchEnd | Self::DoubleTap
        )
    }
}

impl FromStr for EventName {
    type Err = crate::EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::EventError::unknown(s))
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
