//! Axis-aligned box overlap between entities

use super::geom::{Extent, Point};

/// Axis-aligned box in tile units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(pos: Point, extent: Extent) -> Self {
        Self {
            left: pos.x,
            top: pos.y,
            right: pos.x + extent.dx,
            bottom: pos.y + extent.dy,
        }
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}
