//! Integer axis-aligned rectangles
//!
//! The only collision primitive the simulation uses. Half-open extents:
//! a rectangle covers `[x, x + w) x [y, y + h)`.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// True if the two rectangles share any area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}
