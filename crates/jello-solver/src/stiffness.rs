//! Stiffness (force Jacobian) assembly for the implicit integrator.
//!
//! Per element:
//!
//! ```text
//! K[(p,i),(q,r)] = −V Σ_{k,n} ∂P_ik/∂F_rn · D(q,n) · D(p,k)
//! ```
//!
//! where `D` is the shape-function gradient of [`RestElement::shape_gradient`].
//! Blocks are scatter-added as triplets into a `(dim·n) × (dim·n)` CSR
//! matrix. `K = ∂f/∂x` is symmetric and negative semi-definite near rest.
//!
//! The implicit system is
//!
//! ```text
//! (M/dt² − K) · dx = M·v/dt + f + M·g
//! ```

use jello_material::{ConstitutiveModel, Kinematics};
use jello_math::sparse::CsrMatrix;
use jello_math::DMatrix;
use jello_types::Scalar;

use crate::element::{ElementData, RestElement};
use crate::state::ParticleState;

/// Dense `(dim+1)·dim` square stiffness block of one element, indexed
/// `[p·dim + i, q·dim + r]` for vertex `p`/`q` and axis `i`/`r`.
pub fn element_stiffness(
    element: &RestElement,
    model: &dyn ConstitutiveModel,
    state: &ParticleState,
) -> DMatrix<Scalar> {
    let d = state.dim.size();
    let nv = d + 1;
    let kin = Kinematics::new(state.dim, element.deformation_gradient(&state.positions));
    let dp = model.stress_derivative(&kin);

    let grad = DMatrix::from_fn(nv, d, |q, n| element.shape_gradient(q, n));

    let mut block = DMatrix::zeros(nv * d, nv * d);
    for p in 0..nv {
        for i in 0..d {
            for q in 0..nv {
                for r in 0..d {
                    let mut sum = 0.0;
                    for k in 0..d {
                        for n in 0..d {
                            sum += dp[[i, k, r, n]] * grad[(q, n)] * grad[(p, k)];
                        }
                    }
                    block[(p * d + i, q * d + r)] = -element.volume * sum;
                }
            }
        }
    }
    block
}

/// Assembles the global stiffness matrix `K = ∂f/∂x`.
pub fn assemble_stiffness(
    elements: &ElementData,
    model: &dyn ConstitutiveModel,
    state: &ParticleState,
) -> CsrMatrix {
    let d = state.dim.size();
    let n = state.particle_count() * d;
    let block_size = (d + 1) * d;

    let mut triplets: Vec<(usize, usize, Scalar)> =
        Vec::with_capacity(elements.len() * block_size * block_size);

    for element in elements.active() {
        let block = element_stiffness(element, model, state);
        for (p, &vp) in element.indices.iter().enumerate() {
            for (q, &vq) in element.indices.iter().enumerate() {
                for i in 0..d {
                    for r in 0..d {
                        triplets.push((vp * d + i, vq * d + r, block[(p * d + i, q * d + r)]));
                    }
                }
            }
        }
    }

    CsrMatrix::from_triplets(n, n, &triplets)
}

/// Builds the implicit system matrix `M/dt² − K` and right-hand side
/// `M·v/dt + f + M·g`.
///
/// Rows and columns of fixed (massless) particles are replaced by the
/// identity with a zero right-hand side, so their `dx` is zero.
pub fn assemble_system(
    stiffness: &CsrMatrix,
    state: &ParticleState,
    gravity: &[Scalar],
    dt: Scalar,
) -> (CsrMatrix, Vec<Scalar>) {
    let d = state.dim.size();
    let n = stiffness.rows;
    let inv_dt = 1.0 / dt;
    let inv_dt2 = inv_dt * inv_dt;
    let fixed = |row: usize| state.is_fixed(row / d);

    let mut triplets: Vec<(usize, usize, Scalar)> = Vec::with_capacity(n + stiffness.nnz());
    let mut rhs = vec![0.0; n];

    for (i, &m) in state.masses().iter().enumerate() {
        for k in 0..d {
            let row = i * d + k;
            if state.is_fixed(i) {
                triplets.push((row, row, 1.0));
            } else {
                triplets.push((row, row, m * inv_dt2));
                rhs[row] = m * state.velocities[row] * inv_dt + state.forces[row] + m * gravity[k];
            }
        }
    }

    for row in 0..stiffness.rows {
        if fixed(row) {
            continue;
        }
        for idx in stiffness.row_ptr[row]..stiffness.row_ptr[row + 1] {
            let col = stiffness.col_idx[idx];
            if !fixed(col) {
                triplets.push((row, col, -stiffness.values[idx]));
            }
        }
    }

    (CsrMatrix::from_triplets(n, n, &triplets), rhs)
}
