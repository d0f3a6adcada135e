//! Geometry primitives in tile units

use std::ops::{Add, Mul, Neg};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A position in world space (1.0 = one tile)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A size or a velocity in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub dx: f32,
    pub dy: f32,
}

impl Extent {
    pub const ZERO: Extent = Extent::new(0.0, 0.0);

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

impl Add<Extent> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Extent) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, factor: f32) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl Mul<f32> for Extent {
    type Output = Extent;

    #[inline]
    fn mul(self, factor: f32) -> Extent {
        Extent::new(self.dx * factor, self.dy * factor)
    }
}

impl Neg for Extent {
    type Output = Extent;

    #[inline]
    fn neg(self) -> Extent {
        Extent::new(-self.dx, -self.dy)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Vec2 {
        Vec2::new(p.x, p.y)
    }
}

impl From<Extent> for Vec2 {
    fn from(e: Extent) -> Vec2 {
        Vec2::new(e.dx, e.dy)
    }
}
