//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Every frame builds a new `SimulationState` from the previous one
//! - Stable iteration order (plan scan order)
//! - Seeded RNG only, and only while parsing a level
//! - No rendering, timing or platform dependencies

pub mod collision;
pub mod entity;
pub mod geom;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use entity::{Collectible, Entity, EntityKind, Hazard, Player};
pub use geom::{Extent, Point};
pub use level::{Cell, Level, LevelError};
pub use state::{SimulationState, Status};
pub use tick::{FrameInput, advance};
