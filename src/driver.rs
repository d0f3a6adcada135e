//! Game loop driver
//!
//! Owns everything the pure simulation does not: wall-clock timing, the
//! current state between frames, the end-of-level grace period and the
//! order in which levels are played.

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::consts::{END_DELAY, MAX_FRAME_STEP};
use crate::input::InputSource;
use crate::render::RenderSink;
use crate::sim::{FrameInput, Level, SimulationState, Status, advance};

/// Turns frame timestamps into clamped simulation steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    max_step: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_STEP)
    }
}

impl FrameClock {
    /// `max_step` below zero (or NaN) is treated as zero
    pub fn new(max_step: f32) -> Self {
        Self {
            last: None,
            max_step: max_step.max(0.0),
        }
    }

    /// Feed the timestamp (seconds) of a new frame. The first frame only
    /// primes the clock; later ones return the elapsed time, capped at
    /// `max_step` so a stall never turns into one huge jump.
    pub fn tick(&mut self, now: f64) -> Option<f32> {
        let step = self
            .last
            .map(|prev| ((now - prev) as f32).clamp(0.0, self.max_step));
        self.last = Some(now);
        step
    }

    /// Forget the last timestamp (e.g. after the loop was suspended)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Whether a level attempt is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunProgress {
    Playing,
    Finished(Status),
}

/// One attempt at one level
#[derive(Debug, Clone)]
pub struct LevelRun {
    state: SimulationState,
    /// Simulated seconds left to show a finished level
    ending: f32,
}

impl LevelRun {
    pub fn start(level: Arc<Level>, end_delay: f32, sink: &mut dyn RenderSink) -> Result<Self> {
        let state = SimulationState::new(level).context("starting level")?;
        sink.begin_level(&state.level)?;
        sink.sync_state(&state)?;
        Ok(Self {
            state,
            ending: end_delay,
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Advance one frame and present it
    pub fn step(
        &mut self,
        dt: f32,
        input: &FrameInput,
        sink: &mut dyn RenderSink,
    ) -> Result<RunProgress> {
        self.state = advance(&self.state, dt, input);
        sink.sync_state(&self.state)?;

        if !self.state.status.is_terminal() {
            return Ok(RunProgress::Playing);
        }
        if self.ending > 0.0 {
            self.ending -= dt;
            return Ok(RunProgress::Playing);
        }

        sink.clear()?;
        Ok(RunProgress::Finished(self.state.status))
    }
}

/// Whether there is anything left to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameProgress {
    Playing,
    Complete,
}

/// Plays levels in order: winning moves on, losing retries the same level
#[derive(Debug)]
pub struct Game {
    levels: Vec<Arc<Level>>,
    current: usize,
    run: Option<LevelRun>,
    attempts: Vec<u32>,
    end_delay: f32,
}

/// What a headless run got through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub levels_cleared: usize,
    pub attempts: Vec<u32>,
    pub complete: bool,
}

impl Game {
    pub fn new(levels: Vec<Level>) -> Result<Self> {
        Self::with_end_delay(levels, END_DELAY)
    }

    pub fn with_end_delay(levels: Vec<Level>, end_delay: f32) -> Result<Self> {
        if levels.is_empty() {
            bail!("no levels to play");
        }
        for (index, level) in levels.iter().enumerate() {
            level
                .ensure_playable()
                .with_context(|| format!("level {} cannot be played", index + 1))?;
        }
        let count = levels.len();
        Ok(Self {
            levels: levels.into_iter().map(Arc::new).collect(),
            current: 0,
            run: None,
            attempts: vec![0; count],
            end_delay,
        })
    }

    /// Index of the level being played (== level count once complete)
    pub fn level_index(&self) -> usize {
        self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// How many times each level has been started
    pub fn attempts(&self) -> &[u32] {
        &self.attempts
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.levels.len()
    }

    /// State of the running attempt, if one is live
    pub fn state(&self) -> Option<&SimulationState> {
        self.run.as_ref().map(LevelRun::state)
    }

    /// Run one frame: start a level if needed, step it, and move on when
    /// the attempt is over.
    pub fn frame(
        &mut self,
        dt: f32,
        input: &FrameInput,
        sink: &mut dyn RenderSink,
    ) -> Result<GameProgress> {
        if self.is_complete() {
            return Ok(GameProgress::Complete);
        }

        if self.run.is_none() {
            let level = Arc::clone(&self.levels[self.current]);
            self.attempts[self.current] += 1;
            log::info!(
                "Level {}/{} (attempt {})",
                self.current + 1,
                self.levels.len(),
                self.attempts[self.current]
            );
            self.run = Some(LevelRun::start(level, self.end_delay, sink)?);
        }
        let Some(run) = self.run.as_mut() else {
            return Ok(GameProgress::Playing);
        };

        match run.step(dt, input, sink)? {
            RunProgress::Playing => Ok(GameProgress::Playing),
            RunProgress::Finished(Status::Won) => {
                log::info!("Level {} cleared", self.current + 1);
                self.run = None;
                self.current += 1;
                if self.is_complete() {
                    log::info!("You've won!");
                    Ok(GameProgress::Complete)
                } else {
                    Ok(GameProgress::Playing)
                }
            }
            RunProgress::Finished(status) => {
                log::info!("Level {} {}, retrying", self.current + 1, status.as_str());
                self.run = None;
                Ok(GameProgress::Playing)
            }
        }
    }

    /// Drive the game with a fixed step until every level is cleared or
    /// `max_frames` frames have been simulated.
    pub fn run_headless(
        &mut self,
        input: &mut dyn InputSource,
        sink: &mut dyn RenderSink,
        step: f32,
        max_frames: u64,
    ) -> Result<RunSummary> {
        let mut frames = 0;
        while frames < max_frames {
            let snapshot = input.poll();
            frames += 1;
            if self.frame(step, &snapshot, sink)? == GameProgress::Complete {
                break;
            }
        }
        Ok(RunSummary {
            frames,
            levels_cleared: self.current,
            attempts: self.attempts.clone(),
            complete: self.is_complete(),
        })
    }
}
