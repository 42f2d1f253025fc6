//! Frame sinks receive snapshots of the particle positions.
//!
//! The solver calls `begin` once, `submit_frame` for frame 0 (the initial
//! state) and then after every `steps_per_frame` steps, and `finish` once
//! at the end. Frames are only emitted between steps. Each frame is
//! followed by `submit_scene` with the obstacles as they stand at that
//! frame, so moving platforms can be replayed too.

use serde::{Deserialize, Serialize};

use jello_contact::Scene;
use jello_types::{Dimension, JelloResult, Scalar};

/// Static description of the animation, handed to sinks before frame 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameHeader {
    pub dim: Dimension,
    pub particle_count: usize,
    /// Element connectivity, flat with stride `dim + 1`.
    pub elements: Vec<u32>,
    /// Simulated seconds between two frames.
    pub frame_interval: Scalar,
}

/// Receives frames from a running simulation.
pub trait FrameSink {
    /// Called once before the first frame.
    fn begin(&mut self, _header: &FrameHeader) -> JelloResult<()> {
        Ok(())
    }

    /// Receives frame `frame` with interleaved positions.
    fn submit_frame(&mut self, frame: u32, positions: &[Scalar]) -> JelloResult<()>;

    /// Receives the collision scene at frame `frame`. Sinks that only
    /// record the body ignore it.
    fn submit_scene(&mut self, _frame: u32, _scene: &Scene) -> JelloResult<()> {
        Ok(())
    }

    /// Called once after the last frame.
    fn finish(&mut self) -> JelloResult<()> {
        Ok(())
    }

    /// Returns the sink's name.
    fn name(&self) -> &str;
}

/// A sink that keeps every frame in memory.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    pub header: Option<FrameHeader>,
    pub frames: Vec<(u32, Vec<Scalar>)>,
    pub scenes: Vec<(u32, Scene)>,
    pub finished: bool,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions of the last recorded frame.
    pub fn last(&self) -> Option<&[Scalar]> {
        self.frames.last().map(|(_, p)| p.as_slice())
    }
}

impl FrameSink for FrameRecorder {
    fn begin(&mut self, header: &FrameHeader) -> JelloResult<()> {
        self.header = Some(header.clone());
        Ok(())
    }

    fn submit_frame(&mut self, frame: u32, positions: &[Scalar]) -> JelloResult<()> {
        self.frames.push((frame, positions.to_vec()));
        Ok(())
    }

    fn submit_scene(&mut self, frame: u32, scene: &Scene) -> JelloResult<()> {
        self.scenes.push((frame, scene.clone()));
        Ok(())
    }

    fn finish(&mut self) -> JelloResult<()> {
        self.finished = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "frame_recorder"
    }
}

/// A sink that discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn submit_frame(&mut self, _frame: u32, _positions: &[Scalar]) -> JelloResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null_sink"
    }
}
