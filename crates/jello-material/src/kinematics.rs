//! Per-element deformation state.

use jello_math::cofactor::{cofactor, determinant};
use jello_math::decomposition::polar_decomposition;
use jello_math::DMatrix;
use jello_types::{Dimension, Scalar};

/// Everything a constitutive model needs about one deformed element.
///
/// Built once per element per step from `F`, then shared by the stress,
/// energy and stress-derivative evaluations.
#[derive(Debug, Clone)]
pub struct Kinematics {
    pub dim: Dimension,
    /// Deformation gradient `F`.
    pub f: DMatrix<Scalar>,
    /// Rotation factor `R` of `F = R·S`, `det(R) = +1`.
    pub rotation: DMatrix<Scalar>,
    /// Symmetric stretch factor `S`.
    pub stretch: DMatrix<Scalar>,
    /// Cofactor matrix `J·F⁻ᵀ`.
    pub cofactor: DMatrix<Scalar>,
    /// `J = det(F)`.
    pub jacobian: Scalar,
}

impl Kinematics {
    pub fn new(dim: Dimension, f: DMatrix<Scalar>) -> Self {
        let polar = polar_decomposition(&f);
        let cofactor = cofactor(dim, &f);
        let jacobian = determinant(dim, &f);
        Self {
            dim,
            f,
            rotation: polar.rotation,
            stretch: polar.stretch,
            cofactor,
            jacobian,
        }
    }

    /// Kinematics of the undeformed state `F = I`.
    pub fn rest(dim: Dimension) -> Self {
        let d = dim.size();
        Self::new(dim, DMatrix::identity(d, d))
    }
}
