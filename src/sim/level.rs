//! Level grid parsed from an ASCII plan
//!
//! Terrain never changes after parsing. Moving things live in
//! `SimulationState`, not in the grid.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{Collectible, Entity, Hazard, Player};
use super::geom::{Extent, Point};
use crate::consts::DEFAULT_SEED;

/// Terrain tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    /// Static lava, kills on contact
    Lava,
}

impl Cell {
    /// Plan character for this tile
    pub fn as_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Lava => '+',
        }
    }
}

/// Reasons a plan cannot become a level
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("level plan has no rows")]
    Empty,
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unrecognized tile {ch:?} at row {row}, column {col}")]
    UnknownTile { ch: char, row: usize, col: usize },
    #[error("level plan has no player spawn ('@')")]
    MissingPlayer,
    #[error("plan #{index}: {source}")]
    InPlan {
        index: usize,
        #[source]
        source: Box<LevelError>,
    },
}

/// An immutable level: terrain grid plus spawn list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub width: usize,
    pub height: usize,
    /// `height` rows of `width` cells each, top row first
    pub rows: Vec<Vec<Cell>>,
    /// Entities in plan scan order (row by row, left to right)
    pub initial_entities: Vec<Entity>,
}

impl Level {
    /// Parse a plan using the default seed for collectible phases
    pub fn parse(plan: &str) -> Result<Self, LevelError> {
        Self::parse_seeded(plan, DEFAULT_SEED)
    }

    /// Parse a plan. `seed` drives the initial wobble phase of collectibles,
    /// so the same plan and seed always produce the same level.
    pub fn parse_seeded(plan: &str, seed: u64) -> Result<Self, LevelError> {
        let lines: Vec<&str> = plan.trim().lines().map(str::trim).collect();
        if lines.is_empty() || lines[0].is_empty() {
            return Err(LevelError::Empty);
        }

        let width = lines[0].chars().count();
        let height = lines.len();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut rows = Vec::with_capacity(height);
        let mut initial_entities = Vec::new();

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }

            let mut row = Vec::with_capacity(width);
            for (x, ch) in line.chars().enumerate() {
                let origin = Point::new(x as f32, y as f32);
                let spawned = match ch {
                    '.' | '#' | '+' => None,
                    '@' => Some(Entity::Player(Player::spawn(origin))),
                    'o' => Some(Entity::Collectible(Collectible::spawn(
                        origin,
                        rng.random_range(0.0..TAU),
                    ))),
                    '=' | '|' | 'v' => Hazard::spawn(origin, ch).map(Entity::Hazard),
                    _ => return Err(LevelError::UnknownTile { ch, row: y, col: x }),
                };
                row.push(match ch {
                    '#' => Cell::Wall,
                    '+' => Cell::Lava,
                    _ => Cell::Empty,
                });
                initial_entities.extend(spawned);
            }
            rows.push(row);
        }

        log::debug!(
            "Parsed {}x{} level with {} entities",
            width,
            height,
            initial_entities.len()
        );

        Ok(Self {
            width,
            height,
            rows,
            initial_entities,
        })
    }

    /// Terrain at a tile coordinate. Everything outside the grid is wall.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Cell::Wall;
        }
        self.rows[y as usize][x as usize]
    }

    /// Whether the box `[pos, pos + extent)` overlaps any tile of `cell`
    pub fn touches(&self, pos: Point, extent: Extent, cell: Cell) -> bool {
        let x_start = pos.x.floor() as i32;
        let x_end = (pos.x + extent.dx).ceil() as i32;
        let y_start = pos.y.floor() as i32;
        let y_end = (pos.y + extent.dy).ceil() as i32;

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.cell_at(x, y) == cell {
                    return true;
                }
            }
        }
        false
    }

    /// A level can only be played if it spawns a player
    pub fn ensure_playable(&self) -> Result<(), LevelError> {
        match self.player_spawn() {
            Some(_) => Ok(()),
            None => Err(LevelError::MissingPlayer),
        }
    }

    /// Where the player starts
    pub fn player_spawn(&self) -> Option<Point> {
        self.initial_entities.iter().find_map(|e| match e {
            Entity::Player(p) => Some(p.pos),
            _ => None,
        })
    }

    /// Number of collectibles the level starts with
    pub fn collectible_count(&self) -> usize {
        self.initial_entities
            .iter()
            .filter(|e| matches!(e, Entity::Collectible(_)))
            .count()
    }
}
