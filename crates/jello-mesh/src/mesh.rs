//! Core simplex mesh type.
//!
//! Positions are stored interleaved with stride `dim`:
//! `[x0, y0, (z0), x1, y1, (z1), ...]`, which is the same layout as the
//! global coordinate vector of the solver (`dim·i + k`). Element indices are
//! stored flat with stride `dim + 1`.

use serde::{Deserialize, Serialize};

use jello_math::cofactor::determinant;
use jello_math::decomposition::edge_matrix;
use jello_types::{Dimension, JelloError, JelloResult, Scalar};

/// A tetrahedral (3-D) or triangle (2-D) mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TetMesh {
    /// Spatial dimension.
    pub dim: Dimension,
    /// Vertex positions, interleaved with stride `dim`.
    pub positions: Vec<Scalar>,
    /// Element vertex indices, flat with stride `dim + 1`.
    pub elements: Vec<u32>,
}

impl TetMesh {
    /// Builds and validates a mesh.
    pub fn new(dim: Dimension, positions: Vec<Scalar>, elements: Vec<u32>) -> JelloResult<Self> {
        let mesh = Self {
            dim,
            positions,
            elements,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Builds a mesh from a raw dimension, rejecting anything but 2 or 3.
    pub fn from_raw(dim: usize, positions: Vec<Scalar>, elements: Vec<u32>) -> JelloResult<Self> {
        Self::new(Dimension::new(dim)?, positions, elements)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / self.dim.size()
    }

    /// Returns the number of elements.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len() / self.dim.vertices_per_element()
    }

    /// Returns the coordinates of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> &[Scalar] {
        let d = self.dim.size();
        &self.positions[i * d..(i + 1) * d]
    }

    /// Returns the vertex indices of element `e`.
    #[inline]
    pub fn element(&self, e: usize) -> &[u32] {
        let n = self.dim.vertices_per_element();
        &self.elements[e * n..(e + 1) * n]
    }

    /// Signed volume (area in 2-D) of element `e`: `det(Dm) / dim!`.
    pub fn signed_volume(&self, e: usize) -> Scalar {
        let verts: Vec<&[Scalar]> = self
            .element(e)
            .iter()
            .map(|&v| self.position(v as usize))
            .collect();
        let dm = edge_matrix(&verts);
        determinant(self.dim, &dm) / self.dim.volume_factor()
    }

    /// Sum of absolute element volumes.
    pub fn total_volume(&self) -> Scalar {
        (0..self.element_count())
            .map(|e| self.signed_volume(e).abs())
            .sum()
    }

    /// Axis-aligned bounding box as `(min, max)`. Empty meshes yield zeros.
    pub fn bounds(&self) -> (Vec<Scalar>, Vec<Scalar>) {
        let d = self.dim.size();
        if self.vertex_count() == 0 {
            return (vec![0.0; d], vec![0.0; d]);
        }
        let mut lo = vec![Scalar::INFINITY; d];
        let mut hi = vec![Scalar::NEG_INFINITY; d];
        for p in self.positions.chunks_exact(d) {
            for k in 0..d {
                lo[k] = lo[k].min(p[k]);
                hi[k] = hi[k].max(p[k]);
            }
        }
        (lo, hi)
    }

    /// Translates every vertex by `offset` (length `dim`).
    pub fn translate(&mut self, offset: &[Scalar]) {
        let d = self.dim.size();
        for p in self.positions.chunks_exact_mut(d) {
            for (x, o) in p.iter_mut().zip(offset) {
                *x += o;
            }
        }
    }

    /// Scales every vertex about the origin.
    pub fn scale(&mut self, factor: Scalar) {
        for x in &mut self.positions {
            *x *= factor;
        }
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Position count is a multiple of `dim`
    /// - Index count is a multiple of `dim + 1`
    /// - Indices are within bounds
    /// - No element repeats a vertex
    /// - All coordinates are finite
    ///
    /// Zero-volume elements are allowed here; the solver flags them as
    /// degenerate.
    pub fn validate(&self) -> JelloResult<()> {
        let d = self.dim.size();
        let n = self.dim.vertices_per_element();

        if self.positions.len() % d != 0 {
            return Err(JelloError::InvalidMesh(format!(
                "Position count ({}) is not divisible by dimension {}",
                self.positions.len(),
                d
            )));
        }
        if self.elements.len() % n != 0 {
            return Err(JelloError::InvalidMesh(format!(
                "Index count ({}) is not divisible by {} vertices per element",
                self.elements.len(),
                n
            )));
        }
        if let Some(i) = self.positions.iter().position(|x| !x.is_finite()) {
            return Err(JelloError::InvalidMesh(format!(
                "Non-finite coordinate at position {}",
                i
            )));
        }

        let vertex_count = self.vertex_count();
        for (i, &idx) in self.elements.iter().enumerate() {
            if idx as usize >= vertex_count {
                return Err(JelloError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, vertex_count
                )));
            }
        }

        for e in 0..self.element_count() {
            let verts = self.element(e);
            for a in 0..n {
                if verts[a + 1..].contains(&verts[a]) {
                    return Err(JelloError::InvalidMesh(format!(
                        "Element {} has repeated vertex indices: {:?}",
                        e, verts
                    )));
                }
            }
        }

        Ok(())
    }
}
