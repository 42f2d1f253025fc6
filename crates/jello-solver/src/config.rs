//! Simulation configuration.
//!
//! Everything a run needs besides the mesh file itself: material,
//! time stepping, integrator choice, collision scene and output. Loaded
//! from TOML; every field has a default so partial files are accepted.
//!
//! ```toml
//! dt = 0.0005
//! integrator = "implicit"
//!
//! [material]
//! stiffness = 20000.0
//!
//! [scene]
//! type = "plane"
//! height = 0.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use jello_contact::{Collider, CollisionResponse, Scene};
use jello_material::MaterialParams;
use jello_mesh::generators;
use jello_mesh::TetMesh;
use jello_types::constants::{
    DEFAULT_DT, DEFAULT_SOLVER_ITERATIONS, DEFAULT_SOLVER_TOLERANCE, DEFAULT_STEPS_PER_FRAME,
    GRAVITY,
};
use jello_types::{Dimension, JelloError, JelloResult, Scalar};

use crate::integrator::{Integrator, LinearSolverKind};

/// Where the simulated mesh comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeshSource {
    /// The unit tetrahedron.
    Tetrahedron,
    /// The unit right triangle (2-D).
    Triangle,
    /// Subdivided cube, 5 tetrahedra per cell.
    Cube {
        subdivisions: usize,
        size: Scalar,
        origin: [Scalar; 3],
    },
    /// Subdivided square, 2 triangles per cell (2-D).
    Square {
        subdivisions: usize,
        size: Scalar,
        origin: [Scalar; 2],
    },
    /// TetGen `.node` / `.ele` pair sharing this base path (no extension).
    Tetgen { path: String },
}

impl Default for MeshSource {
    fn default() -> Self {
        Self::Cube {
            subdivisions: 2,
            size: 0.2,
            origin: [-0.1, 0.5, -0.1],
        }
    }
}

impl MeshSource {
    /// Builds procedural meshes. File-backed sources return `None`.
    pub fn generate(&self) -> Option<TetMesh> {
        match *self {
            Self::Tetrahedron => Some(generators::single_tetrahedron()),
            Self::Triangle => Some(generators::single_triangle()),
            Self::Cube {
                subdivisions,
                size,
                origin,
            } => Some(generators::cube(subdivisions, size, origin)),
            Self::Square {
                subdivisions,
                size,
                origin,
            } => Some(generators::square(subdivisions, size, origin)),
            Self::Tetgen { .. } => None,
        }
    }

    /// Dimension of procedural meshes; unknown until a file is read.
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Self::Tetrahedron | Self::Cube { .. } => Some(Dimension::Three),
            Self::Triangle | Self::Square { .. } => Some(Dimension::Two),
            Self::Tetgen { .. } => None,
        }
    }
}

/// Particles held in place for the whole run, selected by rest position.
///
/// A particle is pinned when its coordinate along `axis` lies within
/// `[min, max]`. A missing bound is open.
///
/// ```toml
/// [[pins]]
/// axis = 1
/// min = 0.699
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinRegion {
    pub axis: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Scalar>,
}

impl PinRegion {
    /// Every particle at or above `min` along `axis`.
    pub fn above(axis: usize, min: Scalar) -> Self {
        Self {
            axis,
            min: Some(min),
            max: None,
        }
    }

    /// Every particle at or below `max` along `axis`.
    pub fn below(axis: usize, max: Scalar) -> Self {
        Self {
            axis,
            min: None,
            max: Some(max),
        }
    }

    /// True when `position` lies inside the region.
    pub fn contains(&self, position: &[Scalar]) -> bool {
        let Some(&x) = position.get(self.axis) else {
            return false;
        };
        self.min.map_or(true, |lo| x >= lo) && self.max.map_or(true, |hi| x <= hi)
    }

    fn validate(&self, dim: Option<Dimension>) -> JelloResult<()> {
        if let Some(dim) = dim {
            if self.axis >= dim.size() {
                return Err(JelloError::InvalidConfig(format!(
                    "pin axis {} out of range for a {}-D mesh",
                    self.axis,
                    dim.size()
                )));
            }
        }
        match (self.min, self.max) {
            (None, None) => Err(JelloError::InvalidConfig(
                "pin region needs a min or a max bound".into(),
            )),
            (Some(lo), Some(hi)) if !(lo <= hi) => Err(JelloError::InvalidConfig(format!(
                "pin region min {lo} is above max {hi}"
            ))),
            _ if self.min.iter().chain(&self.max).any(|b| !b.is_finite()) => Err(
                JelloError::InvalidConfig("pin region bounds must be finite".into()),
            ),
            _ => Ok(()),
        }
    }
}

/// Frame output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Run without writing frames.
    None,
    /// One JSON animation file.
    #[default]
    Json,
    /// One binary snapshot per frame.
    Snapshot,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory frames are written to.
    pub directory: String,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".into(),
            format: OutputFormat::Json,
        }
    }
}

/// Configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Stiffness, Poisson ratio and density.
    pub material: MaterialParams,

    /// Gravitational acceleration magnitude, pointing down axis 1 (m/s²).
    pub gravity: Scalar,

    /// Timestep (seconds).
    pub dt: Scalar,

    /// Solver steps between two emitted frames.
    pub steps_per_frame: u32,

    /// Frames emitted after the initial frame 0.
    pub frame_count: u32,

    pub integrator: Integrator,

    /// Linear solver for the implicit integrator.
    pub linear_solver: LinearSolverKind,

    /// Iteration cap of the iterative linear solver.
    pub solver_max_iterations: u32,

    /// Relative residual target of the linear solver.
    pub solver_tolerance: Scalar,

    /// What happens to a particle that ends a step inside the scene.
    pub collision_response: CollisionResponse,

    pub scene: Scene,

    /// Regions whose particles stay at their rest position.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pins: Vec<PinRegion>,

    pub mesh: MeshSource,

    pub output: OutputConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            material: MaterialParams::default(),
            gravity: GRAVITY,
            dt: DEFAULT_DT,
            steps_per_frame: DEFAULT_STEPS_PER_FRAME,
            frame_count: 48,
            integrator: Integrator::Explicit,
            linear_solver: LinearSolverKind::Minres,
            solver_max_iterations: DEFAULT_SOLVER_ITERATIONS,
            solver_tolerance: DEFAULT_SOLVER_TOLERANCE,
            collision_response: CollisionResponse::Revert,
            scene: Scene::ground(),
            pins: Vec::new(),
            mesh: MeshSource::default(),
            output: OutputConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Stiff rubber cube dropped on the ground.
    pub fn rubber() -> Self {
        Self {
            material: MaterialParams::rubber(),
            dt: 1.0e-4,
            steps_per_frame: 400,
            ..Default::default()
        }
    }

    /// Implicit integration with a timestep the explicit scheme can't take.
    pub fn implicit() -> Self {
        Self {
            integrator: Integrator::Implicit,
            dt: 1.0 / 240.0,
            steps_per_frame: 10,
            ..Default::default()
        }
    }

    /// A single tetrahedron in free fall for a couple of frames.
    pub fn debug() -> Self {
        Self {
            mesh: MeshSource::Tetrahedron,
            scene: Scene::Empty,
            steps_per_frame: 10,
            frame_count: 2,
            dt: 1.0e-3,
            output: OutputConfig {
                format: OutputFormat::None,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// The default cube hanging from its top face, no obstacles.
    pub fn constrained_top() -> Self {
        // Top face of the default cube sits at y = 0.7
        Self {
            scene: Scene::Empty,
            pins: vec![PinRegion::above(1, 0.699)],
            ..Default::default()
        }
    }

    /// Looks up a named preset (`"default"`, `"rubber"`, `"implicit"`,
    /// `"debug"`, `"constrained_top"`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "rubber" => Some(Self::rubber()),
            "implicit" => Some(Self::implicit()),
            "debug" => Some(Self::debug()),
            "constrained_top" => Some(Self::constrained_top()),
            _ => None,
        }
    }

    /// Total number of solver steps.
    pub fn total_steps(&self) -> u64 {
        self.steps_per_frame as u64 * self.frame_count as u64
    }

    /// Checks every parameter. `dim` is the mesh dimension when known.
    pub fn validate(&self, dim: Option<Dimension>) -> JelloResult<()> {
        self.material.validate()?;

        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(JelloError::InvalidConfig(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if !self.gravity.is_finite() {
            return Err(JelloError::InvalidConfig("gravity must be finite".into()));
        }
        if self.steps_per_frame == 0 {
            return Err(JelloError::InvalidConfig(
                "steps_per_frame must be at least 1".into(),
            ));
        }
        if self.solver_max_iterations == 0 {
            return Err(JelloError::InvalidConfig(
                "solver_max_iterations must be at least 1".into(),
            ));
        }
        if !(self.solver_tolerance > 0.0) {
            return Err(JelloError::InvalidConfig(format!(
                "solver_tolerance must be positive, got {}",
                self.solver_tolerance
            )));
        }
        if let MeshSource::Cube { size, .. } | MeshSource::Square { size, .. } = self.mesh {
            if !(size > 0.0) {
                return Err(JelloError::InvalidConfig(format!(
                    "mesh size must be positive, got {size}"
                )));
            }
        }

        let dim = dim.or_else(|| self.mesh.dimension());
        if let Some(dim) = dim {
            self.scene.validate(dim)?;
        }
        self.pins.iter().try_for_each(|pin| pin.validate(dim))
    }

    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> JelloResult<Self> {
        toml::from_str(s).map_err(|e| JelloError::InvalidConfig(e.to_string()))
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> JelloResult<String> {
        toml::to_string_pretty(self).map_err(|e| JelloError::Serialization(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> JelloResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
