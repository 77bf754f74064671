//! Grid coordinates.
//!
//! A [`Position`] is always already wrapped into the map's bounds; the
//! wrapping itself lives on the map, which knows the dimensions.

use serde::{Deserialize, Serialize};

/// A tile coordinate on the toroidal map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column, `0..width`.
    pub x: u32,
    /// Row, `0..height`. Row 0 is north.
    pub y: u32,
}

impl Position {
    /// Create a position from raw coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}
