//! Level plans
//!
//! Built-in plans plus loading of plan files. A plan file holds any number
//! of plans separated by blank lines.

use crate::sim::{Level, LevelError};

/// Plans shipped with the game, played in order
pub const BUILTIN: &[&str] = &[
    r"
......................
..#................#..
..#..............=.#..
..#.........o.o....#..
..#.@......#####...#..
..#####............#..
......#++++++++++++#..
......##############..
......................
",
    r"
................................
................................
..#..........................#..
..#...o..........v.......o...#..
..#.####.................###.#..
..#...........o..............#..
..#.@.......#####....|.......#..
..#####..................#####..
......#+++++++++++++++++++#.....
......#####################.....
",
    r"
..........................................
..#.....................................#.
..#..............o.o.o..................#.
..#.............#######.......v.........#.
..#...o.....=............o..............#.
..#..###...........|....###.....o.o.....#.
..#.@......................|...#####....#.
..#######+++++####..................##..#.
........#######..#++++++++++++++++++##..#.
.................######################...
",
];

/// Split plan-file text into individual plans
pub fn split_plans(text: &str) -> Vec<String> {
    let mut plans = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                plans.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        plans.push(current.join("\n"));
    }
    plans
}

/// Parse every plan in `text`. Plan `i` (0-based) is seeded with
/// `seed + i` so levels in one pack do not share coin phases.
pub fn load_pack(text: &str, seed: u64) -> Result<Vec<Level>, LevelError> {
    let plans = split_plans(text);
    if plans.is_empty() {
        return Err(LevelError::Empty);
    }
    parse_all(plans.iter().map(String::as_str), seed)
}

/// The built-in levels
pub fn builtin(seed: u64) -> Result<Vec<Level>, LevelError> {
    parse_all(BUILTIN.iter().copied(), seed)
}

fn parse_all<'a>(
    plans: impl Iterator<Item = &'a str>,
    seed: u64,
) -> Result<Vec<Level>, LevelError> {
    plans
        .enumerate()
        .map(|(i, plan)| {
            let level = Level::parse_seeded(plan, seed.wrapping_add(i as u64))
                .and_then(|level| level.ensure_playable().map(|_| level));
            level.map_err(|source| LevelError::InPlan {
                index: i + 1,
                source: Box::new(source),
            })
        })
        .collect()
}
