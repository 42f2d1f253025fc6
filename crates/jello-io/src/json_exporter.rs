//! JSON frame exporter — writes the whole animation to one file.
//!
//! Implements [`FrameSink`]. Captures the connectivity in `begin`, buffers
//! every frame, and serializes the animation on `finish`. The document is
//! self-describing: a viewer needs nothing else to replay it. Frames carry
//! the collision scene unless it is empty.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use jello_contact::Scene;
use jello_solver::{FrameHeader, FrameSink};
use jello_types::{JelloError, JelloResult, Scalar};

/// A single frame of captured positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    pub frame: u32,
    /// Interleaved `[x0, y0, (z0), x1, ...]`.
    pub positions: Vec<Scalar>,
    /// Obstacles at this frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
}

/// Complete animation data as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationData {
    pub dim: usize,
    pub particle_count: usize,
    pub element_count: usize,
    /// Flat connectivity, stride `dim + 1`.
    pub elements: Vec<u32>,
    /// Simulated seconds between frames.
    pub frame_interval: Scalar,
    pub frames: Vec<FrameData>,
}

impl AnimationData {
    /// Reads an animation written by [`JsonFrameExporter`].
    pub fn load(path: impl AsRef<Path>) -> JelloResult<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| JelloError::Serialization(format!("JSON deserialization failed: {e}")))
    }
}

/// Exports simulation frames to a JSON file.
///
/// Usage:
/// ```text
/// let mut exporter = JsonFrameExporter::new("output/cube.json");
/// solver.run(&mut exporter)?; // writes the file in finish()
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    header: Option<FrameHeader>,
    frames: Vec<FrameData>,
}

impl JsonFrameExporter {
    /// Creates a new exporter that will write to the given path.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            header: None,
            frames: Vec::new(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Frames buffered so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSink for JsonFrameExporter {
    fn begin(&mut self, header: &FrameHeader) -> JelloResult<()> {
        self.header = Some(header.clone());
        self.frames.clear();
        Ok(())
    }

    fn submit_frame(&mut self, frame: u32, positions: &[Scalar]) -> JelloResult<()> {
        self.frames.push(FrameData {
            frame,
            positions: positions.to_vec(),
            scene: None,
        });
        Ok(())
    }

    fn submit_scene(&mut self, frame: u32, scene: &Scene) -> JelloResult<()> {
        if matches!(scene, Scene::Empty) {
            return Ok(());
        }
        match self.frames.last_mut() {
            Some(data) if data.frame == frame => {
                data.scene = Some(scene.clone());
                Ok(())
            }
            _ => Err(JelloError::Serialization(format!(
                "scene for frame {frame} arrived before its positions"
            ))),
        }
    }

    fn finish(&mut self) -> JelloResult<()> {
        let header = self.header.take().ok_or_else(|| {
            JelloError::Serialization("JSON exporter finished before begin".into())
        })?;
        let data = AnimationData {
            dim: header.dim.size(),
            particle_count: header.particle_count,
            element_count: header.elements.len() / header.dim.vertices_per_element(),
            elements: header.elements,
            frame_interval: header.frame_interval,
            frames: std::mem::take(&mut self.frames),
        };
        let json = serde_json::to_string(&data)
            .map_err(|e| JelloError::Serialization(format!("JSON serialization failed: {e}")))?;
        std::fs::write(&self.output_path, json)?;
        tracing::info!(
            path = %self.output_path.display(),
            frames = data.frames.len(),
            "animation written"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }
}
