//! MINRES solver for symmetric, possibly indefinite systems.
//!
//! The corotational stiffness is not positive-definite away from the rest
//! state, so the implicit system `M/dt² − K` can be indefinite and rules out
//! conjugate gradients or Cholesky. MINRES (Paige & Saunders) only needs
//! symmetry: it runs Lanczos on `A` and minimises `‖b − A·x‖` over the
//! Krylov space with a running QR factorisation of the tridiagonal.

use jello_types::constants::{DEFAULT_SOLVER_ITERATIONS, DEFAULT_SOLVER_TOLERANCE};
use jello_types::{JelloResult, Scalar};

use crate::solver::{check_dimensions, dot, norm, relative_residual, LinearSolver, SolveReport};
use crate::sparse::CsrMatrix;

/// Unpreconditioned MINRES.
#[derive(Debug, Clone)]
pub struct MinresSolver {
    /// Iteration cap. The last iterate is accepted when it is reached.
    pub max_iterations: u32,
    /// Relative residual target `‖r‖ / ‖r₀‖`.
    pub tolerance: Scalar,
}

impl MinresSolver {
    /// Creates a solver with explicit limits.
    pub fn new(max_iterations: u32, tolerance: Scalar) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }
}

impl Default for MinresSolver {
    fn default() -> Self {
        Self::new(DEFAULT_SOLVER_ITERATIONS, DEFAULT_SOLVER_TOLERANCE)
    }
}

impl LinearSolver for MinresSolver {
    fn solve(
        &mut self,
        matrix: &CsrMatrix,
        rhs: &[Scalar],
        solution: &mut [Scalar],
    ) -> JelloResult<SolveReport> {
        check_dimensions(matrix, rhs, solution)?;
        let n = rhs.len();

        // r1 = b − A·x0
        let mut ax = vec![0.0; n];
        matrix.mul_vec(solution, &mut ax);
        let mut r1: Vec<Scalar> = rhs.iter().zip(&ax).map(|(b, a)| b - a).collect();
        let mut y = r1.clone();
        let beta1 = norm(&r1);

        if beta1 == 0.0 {
            return Ok(SolveReport {
                iterations: 0,
                residual: 0.0,
                converged: true,
            });
        }

        let mut r2 = r1.clone();
        let mut v = vec![0.0; n];
        let mut w = vec![0.0; n];
        let mut w1 = vec![0.0; n];
        let mut w2 = vec![0.0; n];

        let mut oldb = 0.0;
        let mut beta = beta1;
        let mut dbar = 0.0;
        let mut epsln = 0.0;
        let mut phibar = beta1;
        let mut cs = -1.0;
        let mut sn = 0.0;

        let mut iterations = 0;

        for itn in 1..=self.max_iterations {
            iterations = itn;

            // Lanczos step
            let s = 1.0 / beta;
            for (vi, yi) in v.iter_mut().zip(&y) {
                *vi = s * yi;
            }
            matrix.mul_vec(&v, &mut y);
            if itn >= 2 {
                let coef = beta / oldb;
                for (yi, ri) in y.iter_mut().zip(&r1) {
                    *yi -= coef * ri;
                }
            }
            let alfa = dot(&v, &y);
            let coef = alfa / beta;
            for (yi, ri) in y.iter_mut().zip(&r2) {
                *yi -= coef * ri;
            }
            std::mem::swap(&mut r1, &mut r2);
            r2.copy_from_slice(&y);
            oldb = beta;
            beta = norm(&r2);

            // Apply the previous rotation, then compute the next one
            let oldeps = epsln;
            let delta = cs * dbar + sn * alfa;
            let gbar = sn * dbar - cs * alfa;
            epsln = sn * beta;
            dbar = -cs * beta;

            let gamma = gbar.hypot(beta).max(Scalar::EPSILON);
            cs = gbar / gamma;
            sn = beta / gamma;
            let phi = cs * phibar;
            phibar *= sn;

            // Update the search direction and the iterate
            let denom = 1.0 / gamma;
            std::mem::swap(&mut w1, &mut w2);
            std::mem::swap(&mut w2, &mut w);
            for i in 0..n {
                w[i] = (v[i] - oldeps * w1[i] - delta * w2[i]) * denom;
                solution[i] += phi * w[i];
            }

            if phibar.abs() <= self.tolerance * beta1 || beta <= Scalar::EPSILON * beta1 {
                break;
            }
        }

        let residual = relative_residual(matrix, rhs, solution);
        Ok(SolveReport {
            iterations,
            residual,
            converged: phibar.abs() <= self.tolerance * beta1 || residual <= self.tolerance,
        })
    }

    fn name(&self) -> &str {
        "minres"
    }
}
