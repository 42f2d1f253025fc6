//! Elastic force assembly.
//!
//! For each element:
//! 1. `F = Ds · Dm⁻¹` (small entries snapped to zero)
//! 2. `P = P(F)` from the constitutive model
//! 3. `G = −V · P · Dm⁻ᵀ`; column `c` is the force on vertex `c`, the
//!    reference vertex receives `−Σ_c G_c`
//!
//! Every element's forces therefore sum to exactly zero.

use jello_material::{ConstitutiveModel, Kinematics};
use jello_math::DMatrix;
use jello_types::Scalar;

use crate::element::{ElementData, RestElement};
use crate::state::ParticleState;

/// Forces and strain energy of one element.
#[derive(Debug, Clone)]
pub struct ElementForces {
    /// `dim × (dim + 1)`: column `c` is the force on vertex `c`.
    pub forces: DMatrix<Scalar>,
    /// `V · ψ(F)`.
    pub energy: Scalar,
}

/// Computes the nodal forces of a non-degenerate element.
pub fn element_forces(
    element: &RestElement,
    model: &dyn ConstitutiveModel,
    state: &ParticleState,
) -> ElementForces {
    let d = state.dim.size();
    let f = element.deformation_gradient(&state.positions);
    let kin = Kinematics::new(state.dim, f);

    let p = model.first_piola(&kin);
    let g = p * element.dm_inv.transpose() * (-element.volume);

    let mut forces = DMatrix::zeros(d, d + 1);
    for c in 0..d {
        for k in 0..d {
            forces[(k, c)] = g[(k, c)];
            forces[(k, d)] -= g[(k, c)];
        }
    }

    ElementForces {
        forces,
        energy: element.volume * model.energy_density(&kin),
    }
}

/// Adds the elastic forces of every active element into `state.forces`.
///
/// The caller zeroes the buffer first. Returns the total strain energy.
pub fn accumulate_forces(
    elements: &ElementData,
    model: &dyn ConstitutiveModel,
    state: &mut ParticleState,
) -> Scalar {
    let d = state.dim.size();
    let mut energy = 0.0;
    for element in elements.active() {
        let ElementForces { forces, energy: e } = element_forces(element, model, state);
        for (c, &vertex) in element.indices.iter().enumerate() {
            for k in 0..d {
                state.forces[vertex * d + k] += forces[(k, c)];
            }
        }
        energy += e;
    }
    energy
}

/// Total strain energy at the current positions, without touching forces.
pub fn elastic_energy(
    elements: &ElementData,
    model: &dyn ConstitutiveModel,
    state: &ParticleState,
) -> Scalar {
    elements
        .active()
        .map(|element| {
            let kin = Kinematics::new(state.dim, element.deformation_gradient(&state.positions));
            element.volume * model.energy_density(&kin)
        })
        .sum()
}
