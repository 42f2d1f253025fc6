//! Derivative of the cofactor matrix `∂(J·F⁻ᵀ)_jk / ∂F_mn`.
//!
//! In 3-D every cofactor entry is a 2×2 minor of `F`, so each derivative is
//! either zero or `±F_bd` for a single entry of `F`. The pattern is fixed
//! and tabulated once; row `m` and column `n` of each `(m, n)` block are
//! always zero. In 2-D the cofactor is linear in `F` and its derivative is
//! constant.

use jello_math::tensor::Tensor4;
use jello_math::DMatrix;
use jello_types::{Dimension, Scalar};

/// One entry of the 3-D table: zero, or `sign · F[b][d]`.
#[derive(Debug, Clone, Copy)]
enum Term {
    Zero,
    Entry(Scalar, usize, usize),
}

const Z: Term = Term::Zero;

const fn p(b: usize, d: usize) -> Term {
    Term::Entry(1.0, b, d)
}

const fn n(b: usize, d: usize) -> Term {
    Term::Entry(-1.0, b, d)
}

/// `COFACTOR_DERIVATIVE_3D[m][n][j][k]` is `∂cof_jk / ∂F_mn`.
#[rustfmt::skip]
static COFACTOR_DERIVATIVE_3D: [[[[Term; 3]; 3]; 3]; 3] = [
    // m = 0
    [
        // n = 0
        [
            [Z, Z, Z],
            [Z, p(2, 2), n(2, 1)],
            [Z, n(1, 2), p(1, 1)],
        ],
        // n = 1
        [
            [Z, Z, Z],
            [n(2, 2), Z, p(2, 0)],
            [p(1, 2), Z, n(1, 0)],
        ],
        // n = 2
        [
            [Z, Z, Z],
            [p(2, 1), n(2, 0), Z],
            [n(1, 1), p(1, 0), Z],
        ],
    ],
    // m = 1
    [
        // n = 0
        [
            [Z, n(2, 2), p(2, 1)],
            [Z, Z, Z],
            [Z, p(0, 2), n(0, 1)],
        ],
        // n = 1
        [
            [p(2, 2), Z, n(2, 0)],
            [Z, Z, Z],
            [n(0, 2), Z, p(0, 0)],
        ],
        // n = 2
        [
            [n(2, 1), p(2, 0), Z],
            [Z, Z, Z],
            [p(0, 1), n(0, 0), Z],
        ],
    ],
    // m = 2
    [
        // n = 0
        [
            [Z, p(1, 2), n(1, 1)],
            [Z, n(0, 2), p(0, 1)],
            [Z, Z, Z],
        ],
        // n = 1
        [
            [n(1, 2), Z, p(1, 0)],
            [p(0, 2), Z, n(0, 0)],
            [Z, Z, Z],
        ],
        // n = 2
        [
            [p(1, 1), n(1, 0), Z],
            [n(0, 1), p(0, 0), Z],
            [Z, Z, Z],
        ],
    ],
];

/// `(j, k, m, n, value)` for the non-zero entries of the 2-D derivative.
const COFACTOR_DERIVATIVE_2D: [(usize, usize, usize, usize, Scalar); 4] = [
    (0, 0, 1, 1, 1.0),
    (0, 1, 1, 0, -1.0),
    (1, 0, 0, 1, -1.0),
    (1, 1, 0, 0, 1.0),
];

/// Evaluates `∂(J·F⁻ᵀ)_jk / ∂F_mn` at `F`, indexed `[j, k, m, n]`.
pub fn cofactor_derivative(dim: Dimension, f: &DMatrix<Scalar>) -> Tensor4 {
    let d = dim.size();
    let mut out = Tensor4::zeros(d);
    match dim {
        Dimension::Two => {
            for &(j, k, m, n, value) in &COFACTOR_DERIVATIVE_2D {
                out[[j, k, m, n]] = value;
            }
        }
        Dimension::Three => {
            for (m, by_n) in COFACTOR_DERIVATIVE_3D.iter().enumerate() {
                for (n, block) in by_n.iter().enumerate() {
                    for (j, row) in block.iter().enumerate() {
                        for (k, term) in row.iter().enumerate() {
                            if let Term::Entry(sign, b, c) = *term {
                                out[[j, k, m, n]] = sign * f[(b, c)];
                            }
                        }
                    }
                }
            }
        }
    }
    out
}
