//! Per-frame transition function
//!
//! `advance` maps (state, dt, input) to the next state. Resolution order
//! when several things happen in one frame:
//! 1. Lava terrain under the player loses the level outright.
//! 2. Entities are checked against the player in entity order; the first
//!    one that ends the level (a hazard, or the last collectible) decides
//!    the status and the rest of the pass is skipped.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::Entity;
use super::level::Cell;
use super::state::{SimulationState, Status};
use crate::consts::PLAYER_SIZE;

/// Controls held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl FrameInput {
    /// -1.0 for left, 1.0 for right, 0.0 for neither or both
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the simulation by `dt` seconds
///
/// Terminal states are frozen: they come back unchanged.
pub fn advance(state: &SimulationState, dt: f32, input: &FrameInput) -> SimulationState {
    if state.status.is_terminal() {
        return state.clone();
    }

    let level = Arc::clone(&state.level);
    let mut entities: Vec<Entity> = state
        .entities
        .iter()
        .map(|e| e.update(dt, &level, input))
        .collect();

    let Some(player) = entities.iter().find_map(|e| match e {
        Entity::Player(p) => Some(*p),
        _ => None,
    }) else {
        // SimulationState::new refuses levels without a player
        return SimulationState {
            level,
            entities,
            status: Status::InProgress,
        };
    };

    if level.touches(player.pos, PLAYER_SIZE, Cell::Lava) {
        return SimulationState {
            level,
            entities,
            status: Status::Lost,
        };
    }

    let player_rect = Rect::new(player.pos, PLAYER_SIZE);
    let mut status = Status::InProgress;
    let mut picked = vec![false; entities.len()];
    let mut coins_left = entities
        .iter()
        .filter(|e| matches!(e, Entity::Collectible(_)))
        .count();

    for (i, entity) in entities.iter().enumerate() {
        if !entity.rect().overlaps(&player_rect) {
            continue;
        }
        match entity {
            Entity::Player(_) => {}
            Entity::Hazard(_) => {
                status = Status::Lost;
                break;
            }
            Entity::Collectible(_) => {
                picked[i] = true;
                coins_left -= 1;
                if coins_left == 0 {
                    status = Status::Won;
                    break;
                }
            }
        }
    }

    let mut picked = picked.into_iter();
    entities.retain(|_| !picked.next().unwrap_or(false));

    SimulationState {
        level,
        entities,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Extent, Level, Point};

    fn start(plan: &str) -> SimulationState {
        SimulationState::new(Arc::new(Level::parse(plan).unwrap())).unwrap()
    }

    fn right() -> FrameInput {
        FrameInput {
            right: true,
            ..Default::default()
        }
    }

    /// Move every entity of the state onto the given spots, in order
    fn place(state: &mut SimulationState, spots: &[Point]) {
        for (entity, spot) in state.entities.iter_mut().zip(spots) {
            match entity {
                Entity::Player(p) => p.pos = *spot,
                Entity::Hazard(h) => h.pos = *spot,
                Entity::Collectible(c) => {
                    c.anchor = *spot;
                    c.pos = *spot;
                }
            }
        }
    }

    #[test]
    fn test_win_on_last_collectible() {
        let mut state = start("@o");
        // Nudge the player onto the neighbouring coin
        let player = state.player().unwrap().pos;
        place(&mut state, &[player + Extent::new(0.8, 0.0)]);

        let next = advance(&state, 0.0, &FrameInput::default());
        assert_eq!(next.status, Status::Won);
        assert_eq!(next.collectibles_left(), 0);
        assert_eq!(next.entities.len(), 1);
    }

    #[test]
    fn test_walking_into_coins_wins() {
        let mut state = start("....\n@.o.\n####");
        for _ in 0..20 {
            state = advance(&state, 0.05, &right());
            if state.status.is_terminal() {
                break;
            }
        }
        assert_eq!(state.status, Status::Won);
    }

    #[test]
    fn test_partial_pickup_keeps_playing() {
        let mut state = start("@oo");
        let player = state.player().unwrap().pos;
        place(
            &mut state,
            &[player, Point::new(0.1, 0.1), Point::new(5.0, 5.0)],
        );
        let next = advance(&state, 0.0, &FrameInput::default());
        assert_eq!(next.status, Status::InProgress);
        assert_eq!(next.collectibles_left(), 1);
    }

    #[test]
    fn test_lava_terrain_loses() {
        let state = start(".\n@\n+");
        let next = advance(&state, 0.1, &FrameInput::default());
        assert_eq!(next.status, Status::Lost);
    }

    #[test]
    fn test_running_into_hazard_loses() {
        let mut state = start(".....\n@.=..\n#####");
        for _ in 0..20 {
            state = advance(&state, 0.05, &right());
            if state.status.is_terminal() {
                break;
            }
        }
        assert_eq!(state.status, Status::Lost);
    }

    #[test]
    fn test_lava_checked_before_last_coin() {
        let mut state = start("...\n@o.\n+++");
        let player = state.player().unwrap().pos;
        place(&mut state, &[player + Extent::new(0.6, 0.0)]);

        let next = advance(&state, 0.1, &FrameInput::default());
        assert_eq!(next.status, Status::Lost);
        assert_eq!(next.collectibles_left(), 1);
    }

    #[test]
    fn test_first_terminal_entity_wins() {
        let spots = [
            Point::new(0.0, -0.5),
            Point::new(0.2, 0.0),
            Point::new(0.1, 0.1),
        ];

        // Hazard comes first: lost, and the coin stays
        let mut state = start("@=o");
        place(&mut state, &spots);
        let next = advance(&state, 0.0, &FrameInput::default());
        assert_eq!(next.status, Status::Lost);
        assert_eq!(next.collectibles_left(), 1);

        // Coin comes first: won, the hazard is never looked at
        let mut state = start("@o=");
        place(&mut state, &spots);
        let next = advance(&state, 0.0, &FrameInput::default());
        assert_eq!(next.status, Status::Won);
        assert_eq!(next.collectibles_left(), 0);
        assert_eq!(next.entities.len(), 2);
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let lost = advance(&start(".\n@\n+"), 0.1, &FrameInput::default());
        assert_eq!(lost.status, Status::Lost);

        let again = advance(&lost, 0.1, &right());
        assert_eq!(again, lost);
    }

    #[test]
    fn test_jump_impulse() {
        let mut state = start("...\n.@.\n###");
        if let Some(Entity::Player(p)) = state.entities.first_mut() {
            p.velocity = Extent::new(0.0, 5.0);
        }
        let input = FrameInput {
            jump: true,
            ..Default::default()
        };
        let next = advance(&state, 0.05, &input);
        assert_eq!(next.player().unwrap().velocity.dy, -17.0);
    }

    #[test]
    fn test_hazard_bounce_in_frame() {
        let state = start("#####\n#@=.#\n#####");
        let next = advance(&state, 0.6, &FrameInput::default());
        match next.entities[1] {
            Entity::Hazard(h) => {
                assert_eq!(h.velocity, Extent::new(-2.0, 0.0));
                assert_eq!(h.pos, Point::new(2.0, 1.0));
            }
            other => panic!("expected hazard, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_coins_are_conserved() {
        let mut state = start("#########\n#@#.o.o.#\n#########");
        let inputs = [right(), FrameInput::default(), FrameInput {
            left: true,
            jump: true,
            right: false,
        }];
        for i in 0..300 {
            state = advance(&state, 0.016, &inputs[i % inputs.len()]);
        }
        assert_eq!(state.status, Status::InProgress);
        assert_eq!(state.collectibles_left(), 2);
    }

    #[test]
    fn test_advance_does_not_touch_previous_state() {
        let state = start("....\n@.o.\n####");
        let before = state.clone();
        let _ = advance(&state, 0.05, &right());
        assert_eq!(state, before);
        assert!(Arc::ptr_eq(&state.level, &advance(&state, 0.05, &right()).level));
    }
}
