//! # jello-math
//!
//! Linear algebra primitives for the Jello simulator.
//!
//! Provides:
//! - Re-exports of the `nalgebra` dynamic matrix types used for per-element
//!   `dim×dim` algebra (2-D and 3-D share one code path)
//! - Polar decomposition via SVD with reflection handling
//! - Closed-form cofactor matrix `J·F⁻ᵀ`
//! - Fourth-order tensors and the Levi-Civita symbol
//! - Sparse matrix representation (CSR) and linear solvers (MINRES, faer LU)

pub mod cofactor;
pub mod decomposition;
pub mod faer_solver;
pub mod minres;
pub mod solver;
pub mod sparse;
pub mod tensor;

// Re-export nalgebra types as the canonical math types for Jello.
pub use nalgebra::{DMatrix, DVector};

pub use solver::{LinearSolver, SolveReport};
