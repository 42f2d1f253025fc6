//! Binary frame snapshots.
//!
//! One bincode file per frame (`frame_00000.bin`, ...). Each snapshot is
//! self-contained so a single frame can be inspected, diffed or replayed
//! without reading the rest of the run.
//!
//! Non-empty collision scenes go next to the frames as JSON
//! (`scene_00000.json`, ...); the tagged scene enum does not round-trip
//! through bincode.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use jello_contact::Scene;
use jello_solver::{FrameHeader, FrameSink};
use jello_types::{JelloError, JelloResult, Scalar};

/// Particle positions at one emitted frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Frame index, 0 for the initial state.
    pub frame: u32,
    /// Simulation time in seconds.
    pub time: f64,
    /// Coordinates per particle.
    pub dim: usize,
    /// Interleaved positions `[x0, y0, (z0), x1, ...]`.
    pub positions: Vec<Scalar>,
}

impl FrameSnapshot {
    /// Number of particles.
    pub fn particle_count(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.positions.len() / self.dim
        }
    }

    /// Smallest and largest coordinate along `axis`.
    pub fn axis_range(&self, axis: usize) -> Option<(Scalar, Scalar)> {
        axis_range(&self.positions, self.dim, axis)
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> JelloResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| JelloError::Serialization(format!("Snapshot serialization failed: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> JelloResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| JelloError::Serialization(format!("Snapshot deserialization failed: {e}")))
    }

    /// Reads a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> JelloResult<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }
}

/// Smallest and largest coordinate along `axis` of interleaved positions.
pub fn axis_range(positions: &[Scalar], dim: usize, axis: usize) -> Option<(Scalar, Scalar)> {
    if axis >= dim {
        return None;
    }
    positions
        .iter()
        .skip(axis)
        .step_by(dim)
        .fold(None, |acc, &x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// Reads a scene file written next to the snapshots.
pub fn load_scene(path: impl AsRef<Path>) -> JelloResult<Scene> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| JelloError::Serialization(format!("Scene deserialization failed: {e}")))
}

/// Writes every frame as its own snapshot file in a directory.
pub struct SnapshotWriter {
    directory: PathBuf,
    dim: usize,
    frame_interval: f64,
    written: u32,
}

impl SnapshotWriter {
    /// Creates a writer; the directory is created in `begin`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            dim: 0,
            frame_interval: 0.0,
            written: 0,
        }
    }

    /// Path of the snapshot for `frame`.
    pub fn frame_path(&self, frame: u32) -> PathBuf {
        self.directory.join(format!("frame_{frame:05}.bin"))
    }

    /// Path of the scene record for `frame`.
    pub fn scene_path(&self, frame: u32) -> PathBuf {
        self.directory.join(format!("scene_{frame:05}.json"))
    }

    /// Snapshots written so far.
    pub fn written(&self) -> u32 {
        self.written
    }
}

impl FrameSink for SnapshotWriter {
    fn begin(&mut self, header: &FrameHeader) -> JelloResult<()> {
        std::fs::create_dir_all(&self.directory)?;
        self.dim = header.dim.size();
        self.frame_interval = header.frame_interval;
        self.written = 0;
        Ok(())
    }

    fn submit_frame(&mut self, frame: u32, positions: &[Scalar]) -> JelloResult<()> {
        if self.dim == 0 {
            return Err(JelloError::Serialization(
                "snapshot writer received a frame before begin".into(),
            ));
        }
        let snapshot = FrameSnapshot {
            frame,
            time: frame as f64 * self.frame_interval,
            dim: self.dim,
            positions: positions.to_vec(),
        };
        std::fs::write(self.frame_path(frame), snapshot.to_bytes()?)?;
        self.written += 1;
        Ok(())
    }

    fn submit_scene(&mut self, frame: u32, scene: &Scene) -> JelloResult<()> {
        if matches!(scene, Scene::Empty) {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(scene)
            .map_err(|e| JelloError::Serialization(format!("Scene serialization failed: {e}")))?;
        std::fs::write(self.scene_path(frame), json)?;
        Ok(())
    }

    fn finish(&mut self) -> JelloResult<()> {
        tracing::info!(
            directory = %self.directory.display(),
            frames = self.written,
            "snapshots written"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "snapshot_writer"
    }
}
