//! Corotational linear elasticity.
//!
//! Performs the polar decomposition `F = R·S` and penalizes the distance of
//! `F` from its rotation, plus a volume term on `J = det(F)`:
//!
//! - Energy: `ψ = μ‖F − R‖²_F + (λ/2)(J − 1)²`
//! - Stress: `P = 2μ(F − R) + λ(J − 1)·J·F⁻ᵀ`
//!
//! Rigid rotations carry no energy, so large rotations stay artifact-free.

use jello_math::tensor::{levi_civita, Tensor4};
use jello_math::DMatrix;
use jello_types::{Dimension, Scalar};

use crate::cofactor_derivative::cofactor_derivative;
use crate::kinematics::Kinematics;
use crate::properties::LameParameters;
use crate::traits::ConstitutiveModel;

/// Below this, `tr(S)·I − S` (or `tr(S)` in 2-D) is treated as singular and
/// the rotation term of `∂P/∂F` is dropped.
const ROTATION_SINGULAR_EPSILON: Scalar = 1.0e-12;

/// Corotational constitutive model.
#[derive(Debug, Clone, Copy)]
pub struct CorotationalModel {
    pub lame: LameParameters,
}

impl CorotationalModel {
    pub fn new(lame: LameParameters) -> Self {
        Self { lame }
    }

    /// `∂R_jk / ∂F_mn` for the polar rotation.
    ///
    /// 3-D: with `A = tr(S)·I − S`,
    /// `∂R_jk/∂F_mn = Σ R_jp ε_pkd A⁻¹_dc ε_anc R_ma`.
    /// 2-D: `R` is a single angle `θ` and
    /// `∂R_jk/∂F_mn = (R·J₂)_jk · (R_m1 δ_n0 − R_m0 δ_n1) / tr(S)`.
    ///
    /// Returns `None` when the stretch is singular.
    pub fn rotation_derivative(&self, kin: &Kinematics) -> Option<Tensor4> {
        match kin.dim {
            Dimension::Two => rotation_derivative_2d(kin),
            Dimension::Three => rotation_derivative_3d(kin),
        }
    }
}

fn rotation_derivative_2d(kin: &Kinematics) -> Option<Tensor4> {
    let r = &kin.rotation;
    let trace = kin.stretch.trace();
    if trace.abs() < ROTATION_SINGULAR_EPSILON {
        return None;
    }

    // R·J₂ with J₂ = [[0, −1], [1, 0]]
    let rj = DMatrix::from_row_slice(2, 2, &[r[(0, 1)], -r[(0, 0)], r[(1, 1)], -r[(1, 0)]]);

    let mut out = Tensor4::zeros(2);
    for m in 0..2 {
        let dtheta = [r[(m, 1)] / trace, -r[(m, 0)] / trace];
        for (n, dt) in dtheta.iter().enumerate() {
            for j in 0..2 {
                for k in 0..2 {
                    out[[j, k, m, n]] = rj[(j, k)] * dt;
                }
            }
        }
    }
    Some(out)
}

fn rotation_derivative_3d(kin: &Kinematics) -> Option<Tensor4> {
    let r = &kin.rotation;
    let s = &kin.stretch;

    // A_il = Σ ε_ijk ε_lmk S_jm = tr(S)·δ_il − S_li
    let a = DMatrix::from_fn(3, 3, |i, l| {
        let diag = if i == l { s.trace() } else { 0.0 };
        diag - s[(l, i)]
    });
    if a.determinant().abs() < ROTATION_SINGULAR_EPSILON {
        return None;
    }
    let a_inv = a.try_inverse()?;

    // left[j][k][c] = Σ_p Σ_d R_jp ε_pkd A⁻¹_dc
    let mut left = [[[0.0; 3]; 3]; 3];
    // right[c][m][n] = Σ_a ε_anc R_ma
    let mut right = [[[0.0; 3]; 3]; 3];
    for j in 0..3 {
        for k in 0..3 {
            for c in 0..3 {
                let mut sum = 0.0;
                for p in 0..3 {
                    for d in 0..3 {
                        let e = levi_civita(p, k, d);
                        if e != 0.0 {
                            sum += r[(j, p)] * e * a_inv[(d, c)];
                        }
                    }
                }
                left[j][k][c] = sum;
            }
        }
    }
    for c in 0..3 {
        for m in 0..3 {
            for n in 0..3 {
                right[c][m][n] = (0..3).map(|a| levi_civita(a, n, c) * r[(m, a)]).sum();
            }
        }
    }

    let mut out = Tensor4::zeros(3);
    for j in 0..3 {
        for k in 0..3 {
            for m in 0..3 {
                for n in 0..3 {
                    out[[j, k, m, n]] = (0..3).map(|c| left[j][k][c] * right[c][m][n]).sum();
                }
            }
        }
    }
    Some(out)
}

impl ConstitutiveModel for CorotationalModel {
    fn first_piola(&self, kin: &Kinematics) -> DMatrix<Scalar> {
        let LameParameters { mu, lambda } = self.lame;
        (&kin.f - &kin.rotation) * (2.0 * mu) + &kin.cofactor * (lambda * (kin.jacobian - 1.0))
    }

    fn energy_density(&self, kin: &Kinematics) -> Scalar {
        let LameParameters { mu, lambda } = self.lame;
        let diff = &kin.f - &kin.rotation;
        mu * diff.norm_squared() + 0.5 * lambda * (kin.jacobian - 1.0).powi(2)
    }

    /// `∂P/∂F = 2μ(𝕀 − ∂R/∂F) + λ·cof ⊗ cof + λ(J − 1)·∂cof/∂F`.
    fn stress_derivative(&self, kin: &Kinematics) -> Tensor4 {
        let LameParameters { mu, lambda } = self.lame;
        let d = kin.dim.size();

        let mut dp = Tensor4::identity(d);
        if let Some(dr) = self.rotation_derivative(kin) {
            dp.add_scaled(&dr, -1.0);
        }
        let mut out = Tensor4::zeros(d);
        out.add_scaled(&dp, 2.0 * mu);

        let cof = &kin.cofactor;
        for j in 0..d {
            for k in 0..d {
                for m in 0..d {
                    for n in 0..d {
                        out[[j, k, m, n]] += lambda * cof[(m, n)] * cof[(j, k)];
                    }
                }
            }
        }

        let dcof = cofactor_derivative(kin.dim, &kin.f);
        out.add_scaled(&dcof, lambda * (kin.jacobian - 1.0));
        out
    }

    fn name(&self) -> &str {
        "corotational"
    }
}
