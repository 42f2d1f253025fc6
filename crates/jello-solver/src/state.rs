//! Particle state: the per-vertex arena mutated by every step.
//!
//! All vectors are interleaved with stride `dim`, matching the global
//! coordinate index `dim·i + k` used by the implicit system:
//! ```text
//! positions: [x0, y0, (z0), x1, y1, (z1), ...]
//! ```

use jello_mesh::TetMesh;
use jello_types::{Dimension, ParticleId, Scalar};

use crate::element::ElementData;

/// Per-particle simulation state.
#[derive(Debug, Clone)]
pub struct ParticleState {
    pub dim: Dimension,
    /// Current positions.
    pub positions: Vec<Scalar>,
    /// Current velocities.
    pub velocities: Vec<Scalar>,
    /// Internal elastic forces of the current step. Gravity is not stored here.
    pub forces: Vec<Scalar>,
    /// Positions at the start of the current step.
    pub previous: Vec<Scalar>,
    /// Lumped masses. Only written by [`ParticleState::distribute_mass`].
    masses: Vec<Scalar>,
    /// Pinned particles keep their position for the whole run.
    pinned: Vec<bool>,
}

impl ParticleState {
    /// Initializes state at the mesh's rest positions with zero velocity
    /// and zero mass.
    pub fn from_mesh(mesh: &TetMesh) -> Self {
        let n = mesh.vertex_count();
        let d = mesh.dim.size();
        Self {
            dim: mesh.dim,
            positions: mesh.positions.clone(),
            velocities: vec![0.0; n * d],
            forces: vec![0.0; n * d],
            previous: mesh.positions.clone(),
            masses: vec![0.0; n],
            pinned: vec![false; n],
        }
    }

    /// Number of particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.masses.len()
    }

    /// Lumped masses, one per particle.
    #[inline]
    pub fn masses(&self) -> &[Scalar] {
        &self.masses
    }

    /// Pins a particle and zeroes its velocity.
    pub fn pin(&mut self, id: ParticleId) {
        let i = id.index();
        self.pinned[i] = true;
        let range = self.range(i);
        self.velocities[range].iter_mut().for_each(|v| *v = 0.0);
    }

    #[inline]
    pub fn is_pinned(&self, i: usize) -> bool {
        self.pinned[i]
    }

    /// Number of pinned particles.
    pub fn pinned_count(&self) -> usize {
        self.pinned.iter().filter(|&&p| p).count()
    }

    /// Pinned and massless particles are held fixed by the integrators.
    #[inline]
    pub fn is_fixed(&self, i: usize) -> bool {
        self.pinned[i] || self.masses[i] <= 0.0
    }

    /// Coordinate range of particle `i` in the interleaved buffers.
    #[inline]
    pub fn range(&self, i: usize) -> std::ops::Range<usize> {
        let d = self.dim.size();
        i * d..(i + 1) * d
    }

    #[inline]
    pub fn position(&self, i: usize) -> &[Scalar] {
        &self.positions[self.range(i)]
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> &[Scalar] {
        &self.velocities[self.range(i)]
    }

    /// Zeroes the force buffer.
    pub fn zero_forces(&mut self) {
        self.forces.iter_mut().for_each(|f| *f = 0.0);
    }

    /// Saves current positions as the start-of-step snapshot.
    pub fn save_previous(&mut self) {
        self.previous.copy_from_slice(&self.positions);
    }

    /// Lumps element mass onto vertices.
    ///
    /// Each non-degenerate element carries `density · volume`, split
    /// evenly among its `dim + 1` vertices. Replaces any earlier masses.
    pub fn distribute_mass(&mut self, elements: &ElementData, density: Scalar) {
        self.masses.iter_mut().for_each(|m| *m = 0.0);
        let share = 1.0 / self.dim.vertices_per_element() as Scalar;
        for element in elements.active() {
            let m = density * element.volume * share;
            for &i in &element.indices {
                self.masses[i] += m;
            }
        }
    }

    /// Total mass of all particles.
    pub fn total_mass(&self) -> Scalar {
        self.masses.iter().sum()
    }

    /// Compute total kinetic energy: `0.5 · Σ mᵢ‖vᵢ‖²`.
    pub fn kinetic_energy(&self) -> Scalar {
        let d = self.dim.size();
        self.velocities
            .chunks_exact(d)
            .zip(&self.masses)
            .map(|(v, m)| 0.5 * m * v.iter().map(|x| x * x).sum::<Scalar>())
            .sum()
    }

    /// Gravitational potential energy `Σ mᵢ·g·yᵢ` relative to `y = 0`.
    pub fn potential_energy(&self, gravity: Scalar) -> Scalar {
        let up = self.dim.up_axis();
        (0..self.particle_count())
            .map(|i| self.masses[i] * gravity * self.position(i)[up])
            .sum()
    }

    /// Mass-weighted mean position.
    pub fn center_of_mass(&self) -> Vec<Scalar> {
        let d = self.dim.size();
        let total = self.total_mass();
        let mut com = vec![0.0; d];
        if total <= 0.0 {
            return com;
        }
        for (p, m) in self.positions.chunks_exact(d).zip(&self.masses) {
            for k in 0..d {
                com[k] += m * p[k];
            }
        }
        com.iter_mut().for_each(|c| *c /= total);
        com
    }

    /// Sum of the internal force buffer, per axis.
    pub fn net_force(&self) -> Vec<Scalar> {
        let d = self.dim.size();
        let mut net = vec![0.0; d];
        for f in self.forces.chunks_exact(d) {
            for k in 0..d {
                net[k] += f[k];
            }
        }
        net
    }

    /// True when every position and velocity is finite.
    pub fn is_finite(&self) -> bool {
        self.positions.iter().chain(&self.velocities).all(|x| x.is_finite())
    }
}
