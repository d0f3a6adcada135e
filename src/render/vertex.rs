//! Vertex layout for the quad batch

use bytemuck::{Pod, Zeroable};

/// Screen-space vertex: pixel position and RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Bytes between consecutive vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.20, 0.60, 0.78, 1.0];
    pub const BACKGROUND_LOST: [f32; 4] = [0.27, 0.13, 0.13, 1.0];
    pub const BACKGROUND_WON: [f32; 4] = [0.40, 0.70, 0.45, 1.0];
    pub const WALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const LAVA: [f32; 4] = [1.0, 0.39, 0.39, 1.0];
    pub const PLAYER: [f32; 4] = [0.25, 0.25, 0.25, 1.0];
    pub const PLAYER_LOST: [f32; 4] = [1.0, 0.39, 0.39, 1.0];
    pub const HAZARD: [f32; 4] = [1.0, 0.39, 0.39, 1.0];
    pub const COLLECTIBLE: [f32; 4] = [0.95, 0.90, 0.0, 1.0];
}
