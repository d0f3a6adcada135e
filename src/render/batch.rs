//! CPU-side quad batching
//!
//! Builds one vertex list per frame in screen pixels. A GPU backend only has
//! to upload `as_bytes()` and draw `vertex_count()` vertices as a triangle
//! list.

use anyhow::Result;
use glam::Vec2;

use super::RenderSink;
use super::shapes::{frame, quad};
use super::vertex::{Vertex, colors};
use super::viewport::Viewport;
use crate::sim::{Cell, Entity, Level, Rect, SimulationState, Status};

/// Render sink producing a triangle list
#[derive(Debug, Clone)]
pub struct QuadBatch {
    pub viewport: Viewport,
    vertices: Vec<Vertex>,
    clear_color: [f32; 4],
}

impl QuadBatch {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            vertices: Vec::new(),
            clear_color: colors::BACKGROUND,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Raw bytes ready for a vertex buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Background color for the current status
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    fn push_rect(&mut self, rect: &Rect, color: [f32; 4]) {
        let min = self.viewport.to_screen(Vec2::new(rect.left, rect.top));
        let max = self.viewport.to_screen(Vec2::new(rect.right, rect.bottom));
        self.vertices.extend(quad(min, max, color));
    }

    fn push_terrain(&mut self, level: &Level) {
        let (cols, rows) = self.viewport.visible_tiles(level);
        for y in rows {
            for x in cols.clone() {
                let color = match level.rows[y][x] {
                    Cell::Empty => continue,
                    Cell::Wall => colors::WALL,
                    Cell::Lava => colors::LAVA,
                };
                let min = self.viewport.to_screen(Vec2::new(x as f32, y as f32));
                let max = min + Vec2::splat(self.viewport.scale);
                self.vertices.extend(quad(min, max, color));
            }
        }
    }
}

impl RenderSink for QuadBatch {
    fn begin_level(&mut self, level: &Level) -> Result<()> {
        self.vertices.clear();
        self.clear_color = colors::BACKGROUND;
        let spawn = level
            .initial_entities
            .iter()
            .find(|e| matches!(e, Entity::Player(_)));
        if let Some(spawn) = spawn {
            self.viewport.center_on(&spawn.rect(), level);
        }
        Ok(())
    }

    fn sync_state(&mut self, state: &SimulationState) -> Result<()> {
        if let Some(player) = state.entities.iter().find(|e| matches!(e, Entity::Player(_))) {
            self.viewport.follow(&player.rect(), &state.level);
        }

        self.vertices.clear();
        self.clear_color = match state.status {
            Status::InProgress => colors::BACKGROUND,
            Status::Lost => colors::BACKGROUND_LOST,
            Status::Won => colors::BACKGROUND_WON,
        };
        self.push_terrain(&state.level);

        for entity in &state.entities {
            let rect = entity.rect();
            match entity {
                Entity::Player(_) => {
                    self.push_rect(&rect, colors::PLAYER);
                    if state.status == Status::Lost {
                        let min = self.viewport.to_screen(Vec2::new(rect.left, rect.top));
                        let max = self.viewport.to_screen(Vec2::new(rect.right, rect.bottom));
                        self.vertices.extend(frame(min, max, 2.0, colors::PLAYER_LOST));
                    }
                }
                Entity::Hazard(_) => self.push_rect(&rect, colors::HAZARD),
                Entity::Collectible(_) => self.push_rect(&rect, colors::COLLECTIBLE),
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.vertices.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::sim::{FrameInput, advance};

    fn start(plan: &str) -> SimulationState {
        SimulationState::new(Arc::new(Level::parse(plan).unwrap())).unwrap()
    }

    #[test]
    fn test_one_quad_per_tile_and_entity() {
        let state = start("#..\n@o+\n###");
        let mut batch = QuadBatch::new(Viewport::new(600.0, 450.0, 20.0));
        batch.begin_level(&state.level).unwrap();
        batch.sync_state(&state).unwrap();

        // 4 walls and a lava tile, plus the player and the coin
        let terrain = state.level.rows.iter().flatten().filter(|c| **c != Cell::Empty).count();
        assert_eq!(terrain, 5);
        assert_eq!(batch.vertex_count() as usize, (terrain + 2) * 6);
        assert_eq!(batch.as_bytes().len(), batch.vertices().len() * Vertex::STRIDE);
    }

    #[test]
    fn test_status_tints_background() {
        let state = start(".\n@\n+");
        let mut batch = QuadBatch::new(Viewport::new(600.0, 450.0, 20.0));
        batch.sync_state(&state).unwrap();
        assert_eq!(batch.clear_color(), colors::BACKGROUND);

        let lost = advance(&state, 0.1, &FrameInput::default());
        let before = batch.vertex_count();
        batch.sync_state(&lost).unwrap();
        assert_eq!(batch.clear_color(), colors::BACKGROUND_LOST);
        // Player outline adds four quads
        assert_eq!(batch.vertex_count(), before + 24);

        batch.clear().unwrap();
        assert_eq!(batch.vertex_count(), 0);
    }
}
