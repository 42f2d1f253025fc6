//! Direct sparse LU solver backed by `faer`.
//!
//! Implements [`LinearSolver`] with faer's supernodal LU factorization.
//! The implicit system changes every step (the stiffness is re-linearised
//! around the current state), so the matrix is refactorized on every call.
//!
//! ## Workflow
//! 1. Convert CSR → CSC via faer `Triplet`s
//! 2. Symbolic analysis (ordering, fill-in prediction)
//! 3. Numeric LU factorization and forward/backward substitution

use faer::linalg::solvers::Solve;
use faer::sparse::linalg::solvers::{Lu, SymbolicLu};
use faer::sparse::{SparseColMat, Triplet};

use jello_types::{JelloError, JelloResult, Scalar};

use crate::solver::{check_dimensions, relative_residual, LinearSolver, SolveReport};
use crate::sparse::CsrMatrix;

/// Sparse LU solver using `faer`.
///
/// Handles indefinite matrices through pivoting. Preferable to MINRES for
/// small meshes where a factorization is cheap and exact.
pub struct FaerLuSolver {
    /// Relative residual above which the solve is reported as not converged.
    pub tolerance: Scalar,
}

impl FaerLuSolver {
    /// Creates a new solver.
    pub fn new() -> Self {
        Self { tolerance: 1e-6 }
    }

    /// Convert our CSR matrix to faer's CSC matrix.
    fn csr_to_csc(matrix: &CsrMatrix) -> JelloResult<SparseColMat<usize, f64>> {
        let mut triplets: Vec<Triplet<usize, usize, f64>> = Vec::with_capacity(matrix.values.len());
        for row in 0..matrix.rows {
            for idx in matrix.row_ptr[row]..matrix.row_ptr[row + 1] {
                let col = matrix.col_idx[idx];
                let val = matrix.values[idx];
                triplets.push(Triplet { row, col, val });
            }
        }

        SparseColMat::try_new_from_triplets(matrix.rows, matrix.cols, &triplets)
            .map_err(|e| JelloError::Solver(format!("Failed to construct faer CSC matrix: {e:?}")))
    }
}

impl Default for FaerLuSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearSolver for FaerLuSolver {
    fn solve(
        &mut self,
        matrix: &CsrMatrix,
        rhs: &[Scalar],
        solution: &mut [Scalar],
    ) -> JelloResult<SolveReport> {
        check_dimensions(matrix, rhs, solution)?;
        if matrix.rows == 0 {
            return Err(JelloError::Solver("Cannot factorize empty matrix".into()));
        }
        let n = matrix.rows;

        let csc = Self::csr_to_csc(matrix)?;

        let symbolic = SymbolicLu::try_new(csc.symbolic().as_ref())
            .map_err(|e| JelloError::Solver(format!("Symbolic analysis failed: {e:?}")))?;
        let lu = Lu::try_new_with_symbolic(symbolic, csc.as_ref())
            .map_err(|e| JelloError::Solver(format!("LU factorization failed: {e:?}")))?;

        let rhs_mat: faer::Mat<f64> = faer::Mat::from_fn(n, 1, |i, _| rhs[i]);
        let sol = lu.solve(&rhs_mat);

        for (i, out) in solution.iter_mut().enumerate() {
            *out = sol[(i, 0)];
        }

        let residual = relative_residual(matrix, rhs, solution);
        Ok(SolveReport {
            iterations: 1,
            residual,
            converged: residual.is_finite() && residual <= self.tolerance,
        })
    }

    fn name(&self) -> &str {
        "faer_lu"
    }
}
