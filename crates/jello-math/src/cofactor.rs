//! Closed-form cofactor matrix `J·F⁻ᵀ`.
//!
//! Built from cross terms of `F` rather than a generic inverse, so it stays
//! finite when `F` is singular or nearly so.

use nalgebra::DMatrix;

use jello_types::{Dimension, Scalar};

/// Returns `det(F) · F⁻ᵀ` (the cofactor matrix of `F`).
pub fn cofactor(dim: Dimension, f: &DMatrix<Scalar>) -> DMatrix<Scalar> {
    match dim {
        Dimension::Two => DMatrix::from_row_slice(
            2,
            2,
            &[f[(1, 1)], -f[(1, 0)], -f[(0, 1)], f[(0, 0)]],
        ),
        Dimension::Three => DMatrix::from_row_slice(
            3,
            3,
            &[
                f[(1, 1)] * f[(2, 2)] - f[(1, 2)] * f[(2, 1)],
                f[(1, 2)] * f[(2, 0)] - f[(1, 0)] * f[(2, 2)],
                f[(1, 0)] * f[(2, 1)] - f[(1, 1)] * f[(2, 0)],
                f[(0, 2)] * f[(2, 1)] - f[(0, 1)] * f[(2, 2)],
                f[(0, 0)] * f[(2, 2)] - f[(0, 2)] * f[(2, 0)],
                f[(0, 1)] * f[(2, 0)] - f[(0, 0)] * f[(2, 1)],
                f[(0, 1)] * f[(1, 2)] - f[(0, 2)] * f[(1, 1)],
                f[(0, 2)] * f[(1, 0)] - f[(0, 0)] * f[(1, 2)],
                f[(0, 0)] * f[(1, 1)] - f[(0, 1)] * f[(1, 0)],
            ],
        ),
    }
}

/// Determinant of a 2×2 or 3×3 matrix, expanded along the first row of the
/// cofactor matrix.
pub fn determinant(dim: Dimension, f: &DMatrix<Scalar>) -> Scalar {
    let cof = cofactor(dim, f);
    (0..dim.size()).map(|k| f[(0, k)] * cof[(0, k)]).sum()
}
