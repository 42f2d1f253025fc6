//! Matrix decompositions for the corotational model.
//!
//! Provides the deformation gradient `F = Ds · Dm⁻¹` and the SVD-based
//! polar decomposition `F = R · S` with proper-rotation sign fixing.

use nalgebra::DMatrix;

use jello_types::Scalar;

/// Result of a polar decomposition: `F = R · S`.
#[derive(Debug, Clone)]
pub struct PolarDecomposition {
    /// Proper rotation (orthogonal, `det(R) = +1`).
    pub rotation: DMatrix<Scalar>,
    /// Symmetric stretch `S = V Σ Vᵀ`.
    pub stretch: DMatrix<Scalar>,
    /// Singular values after sign fixing. The last one may be negative
    /// for inverted elements.
    pub singular_values: Vec<Scalar>,
}

/// Compute the polar decomposition of a square deformation gradient.
///
/// 1. SVD: `F = U Σ Vᵀ`
/// 2. If `det(U) < 0`, negate the last column of `U` and the last singular value
/// 3. Same for `V`
/// 4. `R = U Vᵀ`, `S = V Σ Vᵀ`
///
/// An unconstrained SVD may hand back reflections; step 2–3 guarantee
/// `det(R) = +1` so the corotational force never points through a mirror.
pub fn polar_decomposition(f: &DMatrix<Scalar>) -> PolarDecomposition {
    let dim = f.nrows();
    let svd = f.clone().svd(true, true);

    let (mut u, mut v) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t.transpose()),
        _ => {
            return PolarDecomposition {
                rotation: DMatrix::identity(dim, dim),
                stretch: f.clone(),
                singular_values: vec![1.0; dim],
            };
        }
    };
    let mut sigma: Vec<Scalar> = svd.singular_values.iter().copied().collect();
    let last = dim - 1;

    if u.determinant() < 0.0 {
        for x in u.column_mut(last).iter_mut() {
            *x = -*x;
        }
        sigma[last] = -sigma[last];
    }
    if v.determinant() < 0.0 {
        for x in v.column_mut(last).iter_mut() {
            *x = -*x;
        }
        sigma[last] = -sigma[last];
    }

    let rotation = &u * v.transpose();
    let sigma_mat = DMatrix::from_diagonal(&nalgebra::DVector::from_column_slice(&sigma));
    let stretch = &v * sigma_mat * v.transpose();

    PolarDecomposition {
        rotation,
        stretch,
        singular_values: sigma,
    }
}

/// Build the edge matrix of a simplex: column `c` is `x_c − x_last`.
///
/// `vertices` holds `dim + 1` points of `dim` coordinates each.
/// Used for both the rest shape `Dm` and the deformed shape `Ds`.
pub fn edge_matrix(vertices: &[&[Scalar]]) -> DMatrix<Scalar> {
    let dim = vertices.len() - 1;
    let reference = vertices[dim];
    DMatrix::from_fn(dim, dim, |row, col| vertices[col][row] - reference[row])
}

/// Compute the deformation gradient `F = Ds · Dm⁻¹`.
pub fn deformation_gradient(ds: &DMatrix<Scalar>, dm_inv: &DMatrix<Scalar>) -> DMatrix<Scalar> {
    ds * dm_inv
}

/// Snap every entry with magnitude below `epsilon` to exactly zero.
pub fn clamp_small_entries(m: &mut DMatrix<Scalar>, epsilon: Scalar) {
    for x in m.iter_mut() {
        if x.abs() < epsilon {
            *x = 0.0;
        }
    }
}
