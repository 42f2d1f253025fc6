//! # jello-io
//!
//! Mesh input and frame output for the Jello simulator.
//!
//! - [`tetgen`] — TetGen / Triangle `.node` + `.ele` reader
//! - [`json_exporter`] — whole animation as one JSON document
//! - [`snapshot`] — one bincode snapshot per frame

pub mod json_exporter;
pub mod snapshot;
pub mod tetgen;

pub use json_exporter::{AnimationData, JsonFrameExporter};
pub use snapshot::{load_scene, FrameSnapshot, SnapshotWriter};
pub use tetgen::{load_mesh, read_tetgen};

use std::path::Path;

use jello_solver::{FrameSink, NullSink, OutputConfig, OutputFormat};
use jello_types::JelloResult;

/// Builds the frame sink selected by an output configuration.
///
/// `stem` names the JSON file (`<directory>/<stem>.json`); snapshots go to
/// `<directory>/<stem>/`.
pub fn create_sink(output: &OutputConfig, stem: &str) -> JelloResult<Box<dyn FrameSink>> {
    let dir = Path::new(&output.directory);
    Ok(match output.format {
        OutputFormat::None => Box::new(NullSink),
        OutputFormat::Json => {
            std::fs::create_dir_all(dir)?;
            Box::new(JsonFrameExporter::new(dir.join(format!("{stem}.json"))))
        }
        OutputFormat::Snapshot => Box::new(SnapshotWriter::new(dir.join(stem))),
    })
}
