//! Rendering module
//!
//! The simulation hands every frame's `SimulationState` to a `RenderSink`.
//! Sinks own their own presentation state (camera, buffers, output).

pub mod batch;
pub mod shapes;
pub mod text;
pub mod vertex;
pub mod viewport;

pub use batch::QuadBatch;
pub use text::TextRenderer;
pub use vertex::Vertex;
pub use viewport::Viewport;

use anyhow::Result;

use crate::sim::{Level, SimulationState};

/// Receives the simulation output once per frame
pub trait RenderSink {
    /// A new level attempt is starting
    fn begin_level(&mut self, level: &Level) -> Result<()>;

    /// Present the latest state
    fn sync_state(&mut self, state: &SimulationState) -> Result<()>;

    /// The attempt is over; tear down whatever `begin_level` set up
    fn clear(&mut self) -> Result<()>;
}

/// Sink that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn begin_level(&mut self, _level: &Level) -> Result<()> {
        Ok(())
    }

    fn sync_state(&mut self, _state: &SimulationState) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}
