//! FEM element precomputation.
//!
//! Each simplex stores its rest-state edge matrix inverse `Dm⁻¹` and rest
//! volume. `Dm` columns are `x_c − x_last` for `c < dim`, so the last vertex
//! is the reference and its shape-function gradient is minus the sum of the
//! others.
//!
//! Elements whose rest volume is (numerically) zero are flagged
//! degenerate: they are never inverted and contribute no force, stiffness
//! or mass.

use jello_math::decomposition::{clamp_small_entries, deformation_gradient, edge_matrix};
use jello_math::DMatrix;
use jello_mesh::TetMesh;
use jello_types::constants::{DEFORMATION_EPSILON, DEGENERATE_VOLUME_THRESHOLD};
use jello_types::{Dimension, ElementId, Scalar};

/// Precomputed rest-state data for a single element.
#[derive(Debug, Clone)]
pub struct RestElement {
    /// Vertex indices (into the particle arena), `dim + 1` of them.
    pub indices: Vec<usize>,
    /// Inverse rest edge matrix. Zero for degenerate elements.
    pub dm_inv: DMatrix<Scalar>,
    /// Rest volume (area in 2-D), always non-negative.
    pub volume: Scalar,
    /// Zero-volume element, skipped by every assembly pass.
    pub degenerate: bool,
}

impl RestElement {
    /// Precomputes `Dm⁻¹` and the rest volume from rest positions.
    pub fn new(dim: Dimension, indices: Vec<usize>, positions: &[Scalar]) -> Self {
        let d = dim.size();
        let dm = Self::edge_matrix_at(d, &indices, positions);
        let signed = jello_math::cofactor::determinant(dim, &dm) / dim.volume_factor();

        let inverse = if signed.abs() < DEGENERATE_VOLUME_THRESHOLD {
            None
        } else {
            dm.try_inverse()
        };

        match inverse {
            Some(dm_inv) => Self {
                indices,
                dm_inv,
                volume: signed.abs(),
                degenerate: false,
            },
            None => Self {
                indices,
                dm_inv: DMatrix::zeros(d, d),
                volume: 0.0,
                degenerate: true,
            },
        }
    }

    fn edge_matrix_at(d: usize, indices: &[usize], positions: &[Scalar]) -> DMatrix<Scalar> {
        let verts: Vec<&[Scalar]> = indices
            .iter()
            .map(|&i| &positions[i * d..(i + 1) * d])
            .collect();
        edge_matrix(&verts)
    }

    /// Shape-function gradient `D(q, n) = ∂F_mn / ∂x_qm`.
    ///
    /// `Dm⁻¹[q][n]` for `q < dim`; for the reference vertex
    /// `q = dim` it is `−Σ_c Dm⁻¹[c][n]`.
    #[inline]
    pub fn shape_gradient(&self, q: usize, n: usize) -> Scalar {
        let d = self.dm_inv.nrows();
        if q < d {
            self.dm_inv[(q, n)]
        } else {
            -(0..d).map(|c| self.dm_inv[(c, n)]).sum::<Scalar>()
        }
    }

    /// Deformation gradient `F = Ds · Dm⁻¹` at the given positions, with
    /// entries below [`DEFORMATION_EPSILON`] snapped to zero.
    pub fn deformation_gradient(&self, positions: &[Scalar]) -> DMatrix<Scalar> {
        let d = self.dm_inv.nrows();
        let ds = Self::edge_matrix_at(d, &self.indices, positions);
        let mut f = deformation_gradient(&ds, &self.dm_inv);
        clamp_small_entries(&mut f, DEFORMATION_EPSILON);
        f
    }
}

/// All elements of a mesh with precomputed rest-state data.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub dim: Dimension,
    pub elements: Vec<RestElement>,
}

impl ElementData {
    /// Precomputes every element of `mesh` from its rest positions.
    ///
    /// Degenerate elements are reported once, as a single warning.
    pub fn from_mesh(mesh: &TetMesh) -> Self {
        let dim = mesh.dim;
        let elements: Vec<RestElement> = (0..mesh.element_count())
            .map(|e| {
                let indices = mesh.element(e).iter().map(|&i| i as usize).collect();
                RestElement::new(dim, indices, &mesh.positions)
            })
            .collect();

        let degenerate: Vec<ElementId> = elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.degenerate)
            .map(|(e, _)| ElementId(e as u32))
            .collect();
        if !degenerate.is_empty() {
            tracing::warn!(
                count = degenerate.len(),
                first = degenerate[0].index(),
                "degenerate elements skipped"
            );
        }

        Self { dim, elements }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the non-degenerate elements.
    pub fn active(&self) -> impl Iterator<Item = &RestElement> {
        self.elements.iter().filter(|e| !e.degenerate)
    }

    /// Number of degenerate elements.
    pub fn degenerate_count(&self) -> usize {
        self.elements.iter().filter(|e| e.degenerate).count()
    }

    /// Sum of rest volumes.
    pub fn total_volume(&self) -> Scalar {
        self.elements.iter().map(|e| e.volume).sum()
    }
}
