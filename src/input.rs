//! Input sources
//!
//! The simulation only ever sees a `FrameInput` snapshot. Where it comes
//! from (key events, a recorded script, a test) is up to the source.

use thiserror::Error;

use crate::sim::FrameInput;

/// Anything that can hand the driver one snapshot per frame
pub trait InputSource {
    fn poll(&mut self) -> FrameInput;
}

/// The controls the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
}

impl Key {
    /// Map a platform key name (e.g. a browser `KeyboardEvent.key`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" | " " => Some(Key::Jump),
            _ => None,
        }
    }
}

/// Tracks which keys are held, fed by press/release events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: FrameInput,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.held.left = down,
            Key::Right => self.held.right = down,
            Key::Jump => self.held.jump = down,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held = FrameInput::default();
    }

    pub fn snapshot(&self) -> FrameInput {
        self.held
    }
}

impl InputSource for KeyState {
    fn poll(&mut self) -> FrameInput {
        self.snapshot()
    }
}

/// Problems in an input script
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputScriptError {
    #[error("step {index} ({step:?}) is missing '*<frames>'")]
    MissingCount { index: usize, step: String },
    #[error("step {index} has an invalid frame count {count:?}")]
    BadCount { index: usize, count: String },
    #[error("step {index} uses unknown key {key:?} (expected L, R, J or .)")]
    UnknownKey { index: usize, key: char },
}

/// Replays a fixed sequence of inputs, then stays idle
///
/// Script syntax: comma-separated `<keys>*<frames>` steps, where keys is
/// any mix of `L`, `R`, `J`, or `.` for nothing held. Example:
/// `R*30,RJ*5,.*10`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: Vec<(FrameInput, u32)>,
    step: usize,
    frame: u32,
}

impl ScriptedInput {
    pub fn parse(script: &str) -> Result<Self, InputScriptError> {
        let mut steps = Vec::new();
        for (index, raw) in script.split(',').map(str::trim).enumerate() {
            if raw.is_empty() {
                continue;
            }
            let Some((keys, count)) = raw.split_once('*') else {
                return Err(InputScriptError::MissingCount {
                    index,
                    step: raw.to_string(),
                });
            };
            let frames: u32 = count.trim().parse().map_err(|_| InputScriptError::BadCount {
                index,
                count: count.to_string(),
            })?;

            let mut input = FrameInput::default();
            for key in keys.trim().chars() {
                match key.to_ascii_uppercase() {
                    'L' => input.left = true,
                    'R' => input.right = true,
                    'J' => input.jump = true,
                    '.' => {}
                    _ => return Err(InputScriptError::UnknownKey { index, key }),
                }
            }
            steps.push((input, frames));
        }
        Ok(Self {
            steps,
            step: 0,
            frame: 0,
        })
    }

    /// Total frames covered by the script
    pub fn len(&self) -> u64 {
        self.steps.iter().map(|(_, n)| u64::from(*n)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.steps.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> FrameInput {
        while let Some(&(input, frames)) = self.steps.get(self.step) {
            if self.frame < frames {
                self.frame += 1;
                return input;
            }
            self.step += 1;
            self.frame = 0;
        }
        FrameInput::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state_tracks_presses() {
        let mut keys = KeyState::new();
        keys.press(Key::Left);
        keys.press(Key::Jump);
        assert_eq!(
            keys.poll(),
            FrameInput {
                left: true,
                right: false,
                jump: true
            }
        );

        keys.release(Key::Left);
        assert!(!keys.snapshot().left);
        keys.clear();
        assert_eq!(keys.snapshot(), FrameInput::default());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowUp"), Some(Key::Jump));
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name("Escape"), None);
    }

    #[test]
    fn test_script_replays_then_idles() {
        let mut script = ScriptedInput::parse("R*2, RJ*1, .*1").unwrap();
        assert_eq!(script.len(), 4);

        let right = FrameInput {
            right: true,
            ..Default::default()
        };
        assert_eq!(script.poll(), right);
        assert_eq!(script.poll(), right);
        assert_eq!(
            script.poll(),
            FrameInput {
                right: true,
                jump: true,
                left: false
            }
        );
        assert_eq!(script.poll(), FrameInput::default());
        assert!(!script.is_finished());
        assert_eq!(script.poll(), FrameInput::default());
        assert!(script.is_finished());
    }

    #[test]
    fn test_zero_length_steps_are_skipped() {
        let mut script = ScriptedInput::parse("L*0,J*1").unwrap();
        assert!(script.poll().jump);
    }

    #[test]
    fn test_bad_scripts() {
        assert!(matches!(
            ScriptedInput::parse("R"),
            Err(InputScriptError::MissingCount { index: 0, .. })
        ));
        assert!(matches!(
            ScriptedInput::parse("R*2,L*x"),
            Err(InputScriptError::BadCount { index: 1, .. })
        ));
        assert_eq!(
            ScriptedInput::parse("Q*1").unwrap_err(),
            InputScriptError::UnknownKey { index: 0, key: 'Q' }
        );
    }

    #[test]
    fn test_empty_script_is_idle() {
        let mut script = ScriptedInput::parse("").unwrap();
        assert!(script.is_empty());
        assert_eq!(script.poll(), FrameInput::default());
    }
}
