//! Movable entities and their per-frame update rules
//!
//! Each rule is a pure function of the old entity, the frame step, the
//! level terrain and the input. No entity looks at any other entity here;
//! cross-entity effects are resolved afterwards in `tick`.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::geom::{Extent, Point};
use super::level::{Cell, Level};
use super::tick::FrameInput;
use crate::consts::*;

/// Entity discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Hazard,
    Collectible,
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Point,
    pub velocity: Extent,
}

impl Player {
    /// Spawn standing on the tile below `origin`
    pub fn spawn(origin: Point) -> Self {
        Self {
            pos: origin + PLAYER_SPAWN_OFFSET,
            velocity: Extent::ZERO,
        }
    }

    pub fn update(&self, dt: f32, level: &Level, input: &FrameInput) -> Player {
        let x_speed = input.horizontal() * PLAYER_X_SPEED;
        let mut pos = self.pos;

        let moved_x = pos + Extent::new(x_speed * dt, 0.0);
        if !level.touches(moved_x, PLAYER_SIZE, Cell::Wall) {
            pos = moved_x;
        }

        let mut y_speed = self.velocity.dy + dt * GRAVITY;
        let moved_y = pos + Extent::new(0.0, y_speed * dt);
        if !level.touches(moved_y, PLAYER_SIZE, Cell::Wall) {
            pos = moved_y;
        } else if input.jump && y_speed > 0.0 {
            y_speed = -JUMP_SPEED;
        } else {
            y_speed = 0.0;
        }

        Player {
            pos,
            velocity: Extent::new(x_speed, y_speed),
        }
    }
}

/// A moving block of lava
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Point,
    pub velocity: Extent,
    /// Dropping hazards jump back here when they hit a wall;
    /// the others bounce.
    pub reset: Option<Point>,
}

impl Hazard {
    /// Build the hazard for a plan character (`=`, `|` or `v`)
    pub fn spawn(origin: Point, ch: char) -> Option<Self> {
        let (velocity, reset) = match ch {
            '=' => (Extent::new(HORIZONTAL_HAZARD_SPEED, 0.0), None),
            '|' => (Extent::new(0.0, VERTICAL_HAZARD_SPEED), None),
            'v' => (Extent::new(0.0, DROPPING_HAZARD_SPEED), Some(origin)),
            _ => return None,
        };
        Some(Self {
            pos: origin,
            velocity,
            reset,
        })
    }

    pub fn update(&self, dt: f32, level: &Level) -> Hazard {
        let moved = self.pos + self.velocity * dt;
        if !level.touches(moved, HAZARD_SIZE, Cell::Wall) {
            Hazard { pos: moved, ..*self }
        } else if let Some(reset) = self.reset {
            Hazard { pos: reset, ..*self }
        } else {
            Hazard {
                velocity: -self.velocity,
                ..*self
            }
        }
    }
}

/// A coin that bobs around its anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Point,
    pub anchor: Point,
    /// Wobble angle in radians
    pub phase: f32,
}

impl Collectible {
    pub fn spawn(origin: Point, phase: f32) -> Self {
        let anchor = origin + COLLECTIBLE_SPAWN_OFFSET;
        Self {
            pos: anchor,
            anchor,
            phase,
        }
    }

    pub fn update(&self, dt: f32) -> Collectible {
        let phase = self.phase + dt * WOBBLE_SPEED;
        Collectible {
            pos: self.anchor + Extent::new(0.0, phase.sin() * WOBBLE_DIST),
            anchor: self.anchor,
            phase,
        }
    }
}

/// Anything that moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Player(Player),
    Hazard(Hazard),
    Collectible(Collectible),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::Hazard(_) => EntityKind::Hazard,
            Entity::Collectible(_) => EntityKind::Collectible,
        }
    }

    pub fn pos(&self) -> Point {
        match self {
            Entity::Player(p) => p.pos,
            Entity::Hazard(h) => h.pos,
            Entity::Collectible(c) => c.pos,
        }
    }

    /// Size is fixed per kind
    pub fn extent(&self) -> Extent {
        match self.kind() {
            EntityKind::Player => PLAYER_SIZE,
            EntityKind::Hazard => HAZARD_SIZE,
            EntityKind::Collectible => COLLECTIBLE_SIZE,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos(), self.extent())
    }

    /// Advance this entity by `dt` seconds
    pub fn update(&self, dt: f32, level: &Level, input: &FrameInput) -> Entity {
        match self {
            Entity::Player(p) => Entity::Player(p.update(dt, level, input)),
            Entity::Hazard(h) => Entity::Hazard(h.update(dt, level)),
            Entity::Collectible(c) => Entity::Collectible(c.update(dt)),
        }
    }
}
