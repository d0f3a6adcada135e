//! Plain-text renderer
//!
//! Draws the level with the plan alphabet and overlays the entities. Good
//! enough for a terminal, logs and golden tests.

use std::io::Write;
use std::ops::Range;

use anyhow::{Context, Result};

use super::RenderSink;
use super::viewport::Viewport;
use crate::consts::PLAYER_SIZE;
use crate::sim::{Entity, Level, Rect, SimulationState};

/// Character used for an entity in text output
fn entity_char(entity: &Entity) -> char {
    match entity {
        Entity::Player(_) => '@',
        Entity::Collectible(_) => 'o',
        Entity::Hazard(h) if h.reset.is_some() => 'v',
        Entity::Hazard(h) if h.velocity.dx != 0.0 => '=',
        Entity::Hazard(_) => '|',
    }
}

/// Draw one frame: one line per tile row, then a status line
pub fn render_frame(state: &SimulationState) -> String {
    render_tiles(state, 0..state.level.width, 0..state.level.height)
}

/// Draw only the tiles `viewport` has on screen
pub fn render_view(state: &SimulationState, viewport: &Viewport) -> String {
    let (cols, rows) = viewport.visible_tiles(&state.level);
    render_tiles(state, cols, rows)
}

fn render_tiles(state: &SimulationState, cols: Range<usize>, rows: Range<usize>) -> String {
    let level = &state.level;
    let mut grid: Vec<Vec<char>> = level.rows[rows.clone()]
        .iter()
        .map(|row| row[cols.clone()].iter().map(|c| c.as_char()).collect())
        .collect();

    // Player last so nothing hides it
    let (players, others): (Vec<&Entity>, Vec<&Entity>) = state
        .entities
        .iter()
        .partition(|e| matches!(e, Entity::Player(_)));
    for entity in others.into_iter().chain(players) {
        let center = entity.rect().center();
        let (x, y) = (center.x.floor(), center.y.floor());
        if x < 0.0 || y < 0.0 {
            continue;
        }
        let (x, y) = (x as usize, y as usize);
        if !cols.contains(&x) || !rows.contains(&y) {
            continue;
        }
        grid[y - rows.start][x - cols.start] = entity_char(entity);
    }

    let mut out = String::with_capacity((cols.len() + 1) * (rows.len() + 1));
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out.push_str(&format!(
        "[{}] coins left: {}\n",
        state.status.as_str(),
        state.collectibles_left()
    ));
    out
}

/// Render sink writing text frames to any writer
///
/// With a viewport only the window around the player is drawn, scrolled
/// the same way the quad batch scrolls.
pub struct TextRenderer<W: Write> {
    out: W,
    /// Write every Nth frame (0 = never write during play)
    every: u32,
    frames: u32,
    viewport: Option<Viewport>,
}

impl<W: Write> TextRenderer<W> {
    /// Draws the whole level every frame
    pub fn new(out: W, every: u32) -> Self {
        Self {
            out,
            every,
            frames: 0,
            viewport: None,
        }
    }

    pub fn with_viewport(out: W, every: u32, viewport: Viewport) -> Self {
        Self {
            viewport: Some(viewport),
            ..Self::new(out, every)
        }
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Write a frame regardless of the frame counter
    pub fn write_frame(&mut self, state: &SimulationState) -> Result<()> {
        let frame = match &self.viewport {
            Some(viewport) => render_view(state, viewport),
            None => render_frame(state),
        };
        self.out
            .write_all(frame.as_bytes())
            .context("writing text frame")?;
        self.out.flush().context("flushing text frame")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TextRenderer<W> {
    fn begin_level(&mut self, level: &Level) -> Result<()> {
        self.frames = 0;
        if let (Some(viewport), Some(spawn)) = (self.viewport.as_mut(), level.player_spawn()) {
            viewport.center_on(&Rect::new(spawn, PLAYER_SIZE), level);
        }
        writeln!(
            self.out,
            "--- level {}x{}, {} coins ---",
            level.width,
            level.height,
            level.collectible_count()
        )
        .context("writing level header")
    }

    fn sync_state(&mut self, state: &SimulationState) -> Result<()> {
        if let (Some(viewport), Some(player)) = (self.viewport.as_mut(), state.player()) {
            viewport.follow(&Rect::new(player.pos, PLAYER_SIZE), &state.level);
        }
        self.frames += 1;
        if self.every > 0 && self.frames % self.every == 0 {
            self.write_frame(state)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.out.flush().context("flushing text output")
    }
}
