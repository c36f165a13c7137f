//! Geographic and screen-space value types.
//!
//! These are plain values exchanged with the peer: camera targets in
//! commands, tap locations in events. Field names follow the peer's JSON
//! (`lng`/`lat`, `x`/`y`) so they deserialize straight from event payloads.

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    /// Longitude in degrees, east positive.
    pub lng: f64,
    /// Latitude in degrees, north positive.
    pub lat: f64,
}

impl LngLat {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns the coordinate as the peer's `[lng, lat]` array form.
    #[must_use]
    pub fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// A point in screen pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    /// Creates a screen point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A geographic bounding box given by its south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLatBounds {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

impl LngLatBounds {
    /// Creates bounds from two corners.
    #[must_use]
    pub const fn new(south_west: LngLat, north_east: LngLat) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Returns `[[west, south], [east, north]]`, the peer's bounds array form.
    #[must_use]
    pub fn to_array(self) -> [[f64; 2]; 2] {
        [self.south_west.to_array(), self.north_east.to_array()]
    }

    /// Returns `true` if the coordinate lies inside (edges included).
    ///
    /// Bounds crossing the antimeridian (west > east) are handled.
    #[must_use]
    pub fn contains(&self, point: LngLat) -> bool {
        let (west, east) = (self.south_west.lng, self.north_east.lng);
        let lat_ok = point.lat >= self.south_west.lat && point.lat <= self.north_east.lat;
        let lng_ok = if west <= east {
            point.lng >= west && point.lng <= east
        } else {
            point.lng >= west || point.lng <= east
        };
        lat_ok && lng_ok
    }
}

/// Padding in pixels around a camera fit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl EdgeInsets {
    /// Same padding on every side.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}
