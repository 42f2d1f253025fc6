//! Time integration policies.
//!
//! Both integrators run after the force pass has filled
//! `state.forces` with internal elastic forces; gravity is added here as
//! `m·g`. Massless particles are held in place.

use serde::{Deserialize, Serialize};

use jello_material::ConstitutiveModel;
use jello_math::faer_solver::FaerLuSolver;
use jello_math::minres::MinresSolver;
use jello_math::{LinearSolver, SolveReport};
use jello_types::{JelloResult, Scalar};

use crate::element::ElementData;
use crate::state::ParticleState;
use crate::stiffness::{assemble_stiffness, assemble_system};

/// Time integration scheme, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    /// Symplectic Euler: `v' = v + (f/m + g)·dt`, `x' = x + v'·dt`.
    #[default]
    Explicit,
    /// Linearized backward Euler: one linear solve per step.
    Implicit,
}

/// Linear solver used by the implicit integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearSolverKind {
    /// Iterative MINRES (symmetric, tolerates indefinite systems).
    #[default]
    Minres,
    /// Direct sparse LU via faer.
    Lu,
}

impl LinearSolverKind {
    /// Instantiates the solver.
    pub fn build(self, max_iterations: u32, tolerance: Scalar) -> Box<dyn LinearSolver> {
        match self {
            Self::Minres => Box::new(MinresSolver::new(max_iterations, tolerance)),
            Self::Lu => Box::new(FaerLuSolver { tolerance }),
        }
    }
}

/// Gravity as a vector: `−g` along the up axis.
pub fn gravity_vector(state: &ParticleState, gravity: Scalar) -> Vec<Scalar> {
    let mut g = vec![0.0; state.dim.size()];
    g[state.dim.up_axis()] = -gravity;
    g
}

/// Explicit step: `a = f/m + g`, `v' = v + a·dt`, `x' = x + v'·dt`.
pub fn explicit_step(state: &mut ParticleState, gravity: &[Scalar], dt: Scalar) {
    let d = state.dim.size();
    for i in 0..state.particle_count() {
        let m = state.masses()[i];
        let fixed = state.is_fixed(i);
        for k in 0..d {
            let idx = i * d + k;
            if fixed {
                state.velocities[idx] = 0.0;
                continue;
            }
            let a = state.forces[idx] / m + gravity[k];
            state.velocities[idx] += a * dt;
            state.positions[idx] += state.velocities[idx] * dt;
        }
    }
}

/// Implicit step: solve `(M/dt² − K)·dx = M·v/dt + f + M·g`, then
/// `v' = dx/dt`, `x' = x + dx`.
///
/// Non-convergence is not an error: the best iterate is applied and the
/// report says so.
pub fn implicit_step(
    state: &mut ParticleState,
    elements: &ElementData,
    model: &dyn ConstitutiveModel,
    solver: &mut dyn LinearSolver,
    gravity: &[Scalar],
    dt: Scalar,
) -> JelloResult<SolveReport> {
    let stiffness = assemble_stiffness(elements, model, state);
    let (system, rhs) = assemble_system(&stiffness, state, gravity, dt);

    // Warm start from the explicit displacement guess
    let mut dx: Vec<Scalar> = state.velocities.iter().map(|v| v * dt).collect();
    let d = state.dim.size();
    for i in 0..state.particle_count() {
        if state.is_fixed(i) {
            dx[i * d..(i + 1) * d].iter_mut().for_each(|x| *x = 0.0);
        }
    }

    let report = solver.solve(&system, &rhs, &mut dx)?;
    if !report.converged {
        tracing::warn!(
            solver = solver.name(),
            iterations = report.iterations,
            residual = report.residual,
            "linear solve did not converge, using best iterate"
        );
    }

    let inv_dt = 1.0 / dt;
    for (idx, step) in dx.iter().enumerate() {
        state.velocities[idx] = step * inv_dt;
        state.positions[idx] += step;
    }
    Ok(report)
}
