//! Lava Run - a tile-based 2D platformer runtime
//!
//! Core modules:
//! - `sim`: Pure simulation (level grid, entities, per-frame transition)
//! - `input`: Input snapshots and sources (key tracker, scripted input)
//! - `render`: Render sinks (viewport follow, text output, quad batches)
//! - `driver`: Frame clock, level runs and multi-level sequencing
//! - `levels`: Built-in level plans and plan-file loading
//! - `settings`: JSON-persisted runtime configuration

pub mod driver;
pub mod input;
pub mod levels;
pub mod render;
pub mod settings;
pub mod sim;

pub use driver::{FrameClock, Game, GameProgress, LevelRun, RunProgress};
pub use settings::Settings;
pub use sim::{FrameInput, Level, SimulationState, Status, advance};

/// Game configuration constants
pub mod consts {
    use crate::sim::Extent;

    /// Longest simulated step taken for a single frame (seconds)
    pub const MAX_FRAME_STEP: f32 = 0.1;
    /// Simulated time a finished level stays on screen (seconds)
    pub const END_DELAY: f32 = 1.0;

    /// Entity sizes in tiles
    pub const PLAYER_SIZE: Extent = Extent::new(0.8, 1.5);
    pub const HAZARD_SIZE: Extent = Extent::new(1.0, 1.0);
    pub const COLLECTIBLE_SIZE: Extent = Extent::new(0.6, 0.6);

    /// Player spawns half a tile up so it stands on the tile below
    pub const PLAYER_SPAWN_OFFSET: Extent = Extent::new(0.0, -0.5);
    /// Collectibles sit centered in their tile
    pub const COLLECTIBLE_SPAWN_OFFSET: Extent = Extent::new(0.2, 0.1);

    /// Player physics (tiles/s, tiles/s²)
    pub const PLAYER_X_SPEED: f32 = 7.0;
    pub const GRAVITY: f32 = 30.0;
    pub const JUMP_SPEED: f32 = 17.0;

    /// Hazard speeds per spawn character (tiles/s)
    pub const HORIZONTAL_HAZARD_SPEED: f32 = 2.0;
    pub const VERTICAL_HAZARD_SPEED: f32 = 2.0;
    pub const DROPPING_HAZARD_SPEED: f32 = 3.0;

    /// Collectible wobble (radians/s, tiles)
    pub const WOBBLE_SPEED: f32 = 8.0;
    pub const WOBBLE_DIST: f32 = 0.07;

    /// Seed used when a level is parsed without an explicit one
    pub const DEFAULT_SEED: u64 = 0x1a7a_2017;

    /// Screen pixels per tile
    pub const PIXELS_PER_TILE: f32 = 20.0;
}
