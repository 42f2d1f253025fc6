//! Fourth-order tensors over `dim ≤ 3` and the Levi-Civita symbol.

use std::ops::{Index, IndexMut};

use jello_types::Scalar;

/// Alternating tensor `ε_ijk` over indices `0..3`.
///
/// `+1` for even permutations of `(0, 1, 2)`, `−1` for odd ones, `0` when
/// any index repeats.
#[inline]
pub fn levi_civita(i: usize, j: usize, k: usize) -> Scalar {
    match (i, j, k) {
        (0, 1, 2) | (1, 2, 0) | (2, 0, 1) => 1.0,
        (0, 2, 1) | (2, 1, 0) | (1, 0, 2) => -1.0,
        _ => 0.0,
    }
}

/// Dense fourth-order tensor `T[i][j][k][l]` with every index in `0..dim`.
///
/// Used for `∂P/∂F` and its rotation / cofactor parts, indexed as
/// `[j, k, m, n]` = `∂P_jk / ∂F_mn`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor4 {
    dim: usize,
    data: Vec<Scalar>,
}

impl Tensor4 {
    /// Creates a zero tensor.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0.0; dim * dim * dim * dim],
        }
    }

    /// The fourth-order identity `δ_jm δ_kn`.
    pub fn identity(dim: usize) -> Self {
        let mut t = Self::zeros(dim);
        for j in 0..dim {
            for k in 0..dim {
                t[[j, k, j, k]] = 1.0;
            }
        }
        t
    }

    /// Range of every index.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    fn offset(&self, idx: [usize; 4]) -> usize {
        let d = self.dim;
        ((idx[0] * d + idx[1]) * d + idx[2]) * d + idx[3]
    }

    /// `self += scale * other`.
    pub fn add_scaled(&mut self, other: &Tensor4, scale: Scalar) {
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += scale * b;
        }
    }

    /// Largest absolute entry.
    pub fn max_abs(&self) -> Scalar {
        self.data.iter().fold(0.0, |acc, x| acc.max(x.abs()))
    }
}

impl Index<[usize; 4]> for Tensor4 {
    type Output = Scalar;

    #[inline]
    fn index(&self, idx: [usize; 4]) -> &Scalar {
        &self.data[self.offset(idx)]
    }
}

impl IndexMut<[usize; 4]> for Tensor4 {
    #[inline]
    fn index_mut(&mut self, idx: [usize; 4]) -> &mut Scalar {
        let offset = self.offset(idx);
        &mut self.data[offset]
    }
}
