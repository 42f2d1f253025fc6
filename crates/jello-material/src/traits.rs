//! Constitutive model trait, the core material abstraction.
//!
//! Every material model implements this trait, so the force and stiffness
//! assemblers never depend on a particular stress formula.

use jello_math::tensor::Tensor4;
use jello_math::DMatrix;
use jello_types::Scalar;

use crate::kinematics::Kinematics;

/// Trait for hyperelastic constitutive models.
///
/// All quantities are per unit rest volume; the assemblers multiply by the
/// element volume.
pub trait ConstitutiveModel: Send + Sync {
    /// First Piola-Kirchhoff stress `P(F)`.
    fn first_piola(&self, kin: &Kinematics) -> DMatrix<Scalar>;

    /// Strain energy density `ψ(F)`.
    fn energy_density(&self, kin: &Kinematics) -> Scalar;

    /// Stress derivative `∂P_jk / ∂F_mn`, indexed `[j, k, m, n]`.
    fn stress_derivative(&self, kin: &Kinematics) -> Tensor4;

    /// Returns the name of this constitutive model.
    fn name(&self) -> &str;
}
