//! The orchestrating FEM solver.
//!
//! Per step:
//! 1. **Snapshot** — save start-of-step positions
//! 2. **Forces** — zero the buffer, accumulate elastic forces
//! 3. **Integrate** — explicit or implicit, gravity added as `m·g`
//! 4. **Scene** — advance moving obstacles by `dt`
//! 5. **Collide** — check every particle, apply the collision response
//!
//! Pinned particles are chosen once from their rest positions and are
//! treated like massless ones: neither integrator moves them and
//! collisions leave them alone.

use std::time::Instant;

use jello_contact::{Collider, ContactResult, Scene};
use jello_material::{ConstitutiveModel, CorotationalModel};
use jello_math::{LinearSolver, SolveReport};
use jello_mesh::TetMesh;
use jello_types::{JelloError, JelloResult, ParticleId, Scalar};

use crate::config::{PinRegion, SimulationConfig};
use crate::element::ElementData;
use crate::forces::{accumulate_forces, elastic_energy};
use crate::integrator::{explicit_step, gravity_vector, implicit_step, Integrator};
use crate::sink::{FrameHeader, FrameSink};
use crate::state::ParticleState;

/// Result of one solver step.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Index of the completed step, starting at 1.
    pub step: u64,
    /// Simulated time after the step.
    pub time: Scalar,
    /// Strain energy at the start of the step.
    pub elastic_energy: Scalar,
    /// Collisions resolved at the end of the step.
    pub contacts: ContactResult,
    /// Linear solve outcome (implicit integrator only).
    pub solve: Option<SolveReport>,
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Frames emitted, including frame 0.
    pub frames: u32,
    /// Steps taken.
    pub steps: u64,
    /// Implicit solves that stopped at the iteration cap.
    pub unconverged_solves: u32,
    /// Particle corrections over the whole run.
    pub total_contacts: u64,
    pub final_kinetic_energy: Scalar,
    pub final_elastic_energy: Scalar,
    /// Wall-clock time (seconds).
    pub wall_time: f64,
}

/// Corotational FEM soft-body solver.
pub struct FemSolver {
    config: SimulationConfig,
    connectivity: Vec<u32>,
    elements: ElementData,
    state: ParticleState,
    model: Box<dyn ConstitutiveModel>,
    scene: Scene,
    linear_solver: Box<dyn LinearSolver>,
    gravity: Vec<Scalar>,
    step_index: u64,
}

impl FemSolver {
    /// Builds a solver with the corotational model from the configured material.
    pub fn new(mesh: &TetMesh, config: SimulationConfig) -> JelloResult<Self> {
        let lame = config.material.lame();
        Self::with_model(mesh, config, Box::new(CorotationalModel::new(lame)))
    }

    /// Builds a solver with a custom constitutive model.
    ///
    /// Validates the mesh and configuration, precomputes rest elements and
    /// lumps masses.
    pub fn with_model(
        mesh: &TetMesh,
        config: SimulationConfig,
        model: Box<dyn ConstitutiveModel>,
    ) -> JelloResult<Self> {
        mesh.validate()?;
        config.validate(Some(mesh.dim))?;
        if mesh.vertex_count() == 0 {
            return Err(JelloError::InvalidMesh("mesh has no vertices".into()));
        }

        let lame = config.material.lame();
        tracing::info!(
            mu = lame.mu,
            lambda = lame.lambda,
            model = model.name(),
            "material constants"
        );

        let elements = ElementData::from_mesh(mesh);
        let mut state = ParticleState::from_mesh(mesh);
        state.distribute_mass(&elements, config.material.density);
        pin_particles(&mut state, &config.pins);
        if !config.pins.is_empty() && state.pinned_count() == 0 {
            tracing::warn!(regions = config.pins.len(), "pin regions contain no particles");
        }

        if elements.active().next().is_none() {
            tracing::warn!("mesh has no non-degenerate elements, every particle is fixed");
        }

        let linear_solver = config
            .linear_solver
            .build(config.solver_max_iterations, config.solver_tolerance);
        let gravity = gravity_vector(&state, config.gravity);

        tracing::info!(
            dim = mesh.dim.size(),
            particles = state.particle_count(),
            elements = elements.len(),
            degenerate = elements.degenerate_count(),
            total_mass = state.total_mass(),
            pinned = state.pinned_count(),
            integrator = ?config.integrator,
            "solver initialized"
        );

        Ok(Self {
            scene: config.scene.clone(),
            connectivity: mesh.elements.clone(),
            config,
            elements,
            state,
            model,
            linear_solver,
            gravity,
            step_index: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    /// Mutable access, e.g. to set initial velocities.
    pub fn state_mut(&mut self) -> &mut ParticleState {
        &mut self.state
    }

    pub fn elements(&self) -> &ElementData {
        &self.elements
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Steps taken so far.
    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    /// Simulated time.
    pub fn time(&self) -> Scalar {
        self.step_index as Scalar * self.config.dt
    }

    /// Strain energy at the current positions.
    pub fn elastic_energy(&self) -> Scalar {
        elastic_energy(&self.elements, self.model.as_ref(), &self.state)
    }

    /// Kinetic + strain + gravitational potential energy.
    pub fn total_energy(&self) -> Scalar {
        self.state.kinetic_energy()
            + self.elastic_energy()
            + self.state.potential_energy(self.config.gravity)
    }

    /// Header describing the animation this solver produces.
    pub fn header(&self) -> FrameHeader {
        FrameHeader {
            dim: self.state.dim,
            particle_count: self.state.particle_count(),
            elements: self.connectivity.clone(),
            frame_interval: self.config.dt * self.config.steps_per_frame as Scalar,
        }
    }

    /// Advances the simulation by one timestep.
    pub fn step(&mut self) -> JelloResult<StepReport> {
        let dt = self.config.dt;

        self.state.save_previous();
        self.state.zero_forces();
        let energy = accumulate_forces(&self.elements, self.model.as_ref(), &mut self.state);

        let solve = match self.config.integrator {
            Integrator::Explicit => {
                explicit_step(&mut self.state, &self.gravity, dt);
                None
            }
            Integrator::Implicit => Some(implicit_step(
                &mut self.state,
                &self.elements,
                self.model.as_ref(),
                self.linear_solver.as_mut(),
                &self.gravity,
                dt,
            )?),
        };

        self.scene.advance(dt);
        let contacts = self.resolve_collisions();

        self.step_index += 1;
        Ok(StepReport {
            step: self.step_index,
            time: self.time(),
            elastic_energy: energy,
            contacts,
            solve,
        })
    }

    /// Checks every particle against the scene and applies the response.
    fn resolve_collisions(&mut self) -> ContactResult {
        let mut result = ContactResult::default();
        if matches!(self.scene, Scene::Empty) {
            return result;
        }

        let dt = self.config.dt;
        let response = self.config.collision_response;
        for i in 0..self.state.particle_count() {
            let range = self.state.range(i);
            let candidate = &self.state.positions[range.clone()];
            let Some(corrected) = self.scene.check_collision(candidate) else {
                continue;
            };
            if self.state.is_fixed(i) {
                continue;
            }
            result.record(candidate, &corrected);
            response.apply(
                &self.state.previous[range.clone()],
                &corrected,
                dt,
                &mut self.state.positions[range.clone()],
                &mut self.state.velocities[range],
            );
        }
        result
    }

    /// Runs the configured number of frames, feeding `sink`.
    ///
    /// Frame 0 is the initial state; each later frame follows
    /// `steps_per_frame` steps.
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> JelloResult<RunSummary> {
        let start = Instant::now();
        let mut unconverged_solves = 0u32;
        let mut total_contacts = 0u64;
        let mut steps = 0u64;

        sink.begin(&self.header())?;
        sink.submit_frame(0, &self.state.positions)?;
        sink.submit_scene(0, &self.scene)?;

        for frame in 1..=self.config.frame_count {
            for _ in 0..self.config.steps_per_frame {
                let report = self.step()?;
                steps += 1;
                total_contacts += report.contacts.resolved_count as u64;
                if matches!(report.solve, Some(s) if !s.converged) {
                    unconverged_solves += 1;
                }
            }

            if !self.state.is_finite() {
                return Err(JelloError::Solver(format!(
                    "simulation diverged before frame {frame} (step {})",
                    self.step_index
                )));
            }

            sink.submit_frame(frame, &self.state.positions)?;
            sink.submit_scene(frame, &self.scene)?;
            tracing::debug!(
                frame,
                time = self.time(),
                kinetic = self.state.kinetic_energy(),
                sink = sink.name(),
                "frame emitted"
            );
        }

        sink.finish()?;

        let summary = RunSummary {
            frames: self.config.frame_count + 1,
            steps,
            unconverged_solves,
            total_contacts,
            final_kinetic_energy: self.state.kinetic_energy(),
            final_elastic_energy: self.elastic_energy(),
            wall_time: start.elapsed().as_secs_f64(),
        };
        tracing::info!(
            frames = summary.frames,
            steps = summary.steps,
            unconverged = summary.unconverged_solves,
            wall_time = summary.wall_time,
            "run complete"
        );
        Ok(summary)
    }
}

/// Pins every particle whose rest position lies in one of `regions`.
fn pin_particles(state: &mut ParticleState, regions: &[PinRegion]) {
    for i in 0..state.particle_count() {
        if regions.iter().any(|r| r.contains(state.position(i))) {
            state.pin(ParticleId(i as u32));
        }
    }
}
