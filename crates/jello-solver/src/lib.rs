//! # jello-solver
//!
//! Corotational FEM time stepping.
//!
//! ## Key Types
//!
//! - [`FemSolver`] — Orchestrates forces, integration, collisions and frames
//! - [`ParticleState`] — Interleaved per-particle buffers (positions,
//!   velocities, forces, masses)
//! - [`element::ElementData`] — Rest-state element precomputation
//! - [`SimulationConfig`] — TOML-loadable run configuration
//! - [`FrameSink`] — Receives position snapshots between steps

pub mod config;
pub mod element;
pub mod forces;
pub mod integrator;
pub mod sink;
pub mod solver;
pub mod state;
pub mod stiffness;

pub use config::{MeshSource, OutputConfig, OutputFormat, PinRegion, SimulationConfig};
pub use integrator::{Integrator, LinearSolverKind};
pub use sink::{FrameHeader, FrameRecorder, FrameSink, NullSink};
pub use solver::{FemSolver, RunSummary, StepReport};
pub use state::ParticleState;
