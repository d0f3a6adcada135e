//! Property tests for the level grid and the transition function

use std::sync::Arc;

use proptest::prelude::*;

use lava_run::sim::{Cell, Entity, Extent, Point};
use lava_run::{FrameInput, Level, SimulationState, Status, advance, levels};

/// Player walled into the left corner; the coins can never be reached
const SEALED: &str = "\
#######
#.....#
#@#o.o#
#######";

fn frame_input() -> impl Strategy<Value = FrameInput> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, jump)| FrameInput {
        left,
        right,
        jump,
    })
}

fn frames(max: usize) -> impl Strategy<Value = Vec<(f32, FrameInput)>> {
    prop::collection::vec((0.0f32..=0.1, frame_input()), 1..max)
}

fn start(plan: &str) -> SimulationState {
    SimulationState::new(Arc::new(Level::parse(plan).unwrap())).unwrap()
}

/// `@o` with the player moved onto the coin
fn on_the_coin() -> SimulationState {
    let mut state = start("@o");
    for entity in &mut state.entities {
        if let Entity::Player(p) = entity {
            p.pos = p.pos + Extent::new(0.8, 0.0);
        }
    }
    state
}

proptest! {
    #[test]
    fn unreachable_coins_stay(steps in frames(200)) {
        let mut state = start(SEALED);
        for (dt, input) in &steps {
            state = advance(&state, *dt, input);
            prop_assert_eq!(state.collectibles_left(), 2);
            prop_assert_eq!(state.status, Status::InProgress);
        }
    }

    #[test]
    fn coins_only_disappear(steps in frames(300)) {
        let level = levels::builtin(7).unwrap().remove(0);
        let mut state = SimulationState::new(Arc::new(level)).unwrap();
        let mut left = state.collectibles_left();
        for (dt, input) in &steps {
            state = advance(&state, *dt, input);
            let now = state.collectibles_left();
            prop_assert!(now <= left);
            prop_assert_eq!(state.status == Status::Won, now == 0);
            left = now;
        }
    }

    #[test]
    fn outside_the_grid_is_solid(x in -3.0f32..6.0, y in -3.0f32..6.0) {
        let level = Level::parse("...\n...\n...").unwrap();
        let unit = Extent::new(1.0, 1.0);
        let outside = x < 0.0 || y < 0.0 || x + 1.0 > 3.0 || y + 1.0 > 3.0;
        prop_assert_eq!(level.touches(Point::new(x, y), unit, Cell::Wall), outside);
        prop_assert!(!level.touches(Point::new(x, y), unit, Cell::Lava));
    }

    #[test]
    fn finished_states_are_frozen(dt in 0.0f32..=0.1, input in frame_input()) {
        let lost = advance(&start(".\n@\n+"), 0.1, &FrameInput::default());
        prop_assert_eq!(lost.status, Status::Lost);
        let again = advance(&lost, dt, &input);
        prop_assert_eq!(&again, &lost);

        let won = advance(&on_the_coin(), 0.0, &FrameInput::default());
        prop_assert_eq!(won.status, Status::Won);
        let again = advance(&won, dt, &input);
        prop_assert_eq!(&again, &won);
    }

    #[test]
    fn player_never_enters_walls(steps in frames(200)) {
        let level = levels::builtin(3).unwrap().remove(1);
        let mut state = SimulationState::new(Arc::new(level)).unwrap();
        for (dt, input) in &steps {
            state = advance(&state, *dt, input);
            if state.status.is_terminal() {
                break;
            }
            let player = state
                .entities
                .iter()
                .find(|e| matches!(e, Entity::Player(_)))
                .copied();
            prop_assert!(player.is_some());
            if let Some(player) = player {
                prop_assert!(!state.level.touches(player.pos(), player.extent(), Cell::Wall));
            }
        }
    }
}
