//! Linear solver interface for the implicit step.

use jello_types::{JelloResult, Scalar};

use crate::sparse::CsrMatrix;

/// Outcome of one linear solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Iterations performed (1 for direct solvers).
    pub iterations: u32,
    /// Relative residual `‖b − A·x‖ / ‖b‖`.
    pub residual: Scalar,
    /// Whether the residual reached the requested tolerance.
    pub converged: bool,
}

/// Trait for linear solvers of `A · x = b`.
///
/// Non-convergence is not an error: the best available iterate is written
/// to `solution` and reported through [`SolveReport::converged`].
///
/// # Implementations
/// - [`MinresSolver`](crate::minres::MinresSolver) — symmetric, tolerates indefinite `A`
/// - [`FaerLuSolver`](crate::faer_solver::FaerLuSolver) — direct sparse LU
pub trait LinearSolver: Send {
    /// Solve `matrix · solution = rhs`. `solution` is used as the initial guess
    /// by iterative solvers.
    fn solve(
        &mut self,
        matrix: &CsrMatrix,
        rhs: &[Scalar],
        solution: &mut [Scalar],
    ) -> JelloResult<SolveReport>;

    /// Returns the solver name.
    fn name(&self) -> &str;
}

pub(crate) fn dot(a: &[Scalar], b: &[Scalar]) -> Scalar {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn norm(a: &[Scalar]) -> Scalar {
    dot(a, a).sqrt()
}

/// Relative residual `‖b − A·x‖ / ‖b‖` (absolute when `b = 0`).
pub fn relative_residual(matrix: &CsrMatrix, rhs: &[Scalar], solution: &[Scalar]) -> Scalar {
    let mut ax = vec![0.0; rhs.len()];
    matrix.mul_vec(solution, &mut ax);
    let r: Vec<Scalar> = rhs.iter().zip(&ax).map(|(b, a)| b - a).collect();
    let b_norm = norm(rhs);
    if b_norm > 0.0 {
        norm(&r) / b_norm
    } else {
        norm(&r)
    }
}

pub(crate) fn check_dimensions(
    matrix: &CsrMatrix,
    rhs: &[Scalar],
    solution: &[Scalar],
) -> JelloResult<()> {
    use jello_types::JelloError;

    if matrix.rows != matrix.cols {
        return Err(JelloError::Solver(format!(
            "Matrix must be square, got {}×{}",
            matrix.rows, matrix.cols
        )));
    }
    if rhs.len() != matrix.rows {
        return Err(JelloError::Solver(format!(
            "RHS length ({}) != matrix dimension ({})",
            rhs.len(),
            matrix.rows
        )));
    }
    if solution.len() != matrix.rows {
        return Err(JelloError::Solver(format!(
            "Solution length ({}) != matrix dimension ({})",
            solution.len(),
            matrix.rows
        )));
    }
    Ok(())
}
