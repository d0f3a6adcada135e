//! Simulation state snapshot
//!
//! A `SimulationState` is never edited in place during play: `advance`
//! builds the next one and the driver swaps it in.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::entity::{Entity, Player};
use super::level::{Level, LevelError};

/// Outcome of the current level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    InProgress,
    Lost,
    Won,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        *self != Status::InProgress
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::InProgress => "playing",
            Status::Lost => "lost",
            Status::Won => "won",
        }
    }
}

/// Everything that changes from frame to frame, plus the shared level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub level: Arc<Level>,
    /// Live entities, in plan scan order
    pub entities: Vec<Entity>,
    pub status: Status,
}

impl SimulationState {
    /// Start a fresh attempt at `level`. Fails if the level has no player.
    pub fn new(level: Arc<Level>) -> Result<Self, LevelError> {
        level.ensure_playable()?;
        Ok(Self {
            entities: level.initial_entities.clone(),
            level,
            status: Status::InProgress,
        })
    }

    /// The first player entity
    pub fn player(&self) -> Option<&Player> {
        self.entities.iter().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            _ => None,
        })
    }

    pub fn collectibles_left(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e, Entity::Collectible(_)))
            .count()
    }
}
