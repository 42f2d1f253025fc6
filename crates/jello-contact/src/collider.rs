//! Collider trait shared by all scene shapes.

use jello_types::{Dimension, JelloResult, Scalar};

/// An obstacle that can push particles out of itself.
pub trait Collider {
    /// Returns a corrected position when `candidate` penetrates the shape,
    /// `None` otherwise.
    fn check_collision(&self, candidate: &[Scalar]) -> Option<Vec<Scalar>>;

    /// Moves the shape forward by one step. Static shapes ignore this.
    fn advance(&mut self, _dt: Scalar) {}

    /// Checks that the shape's vectors match the simulation dimension.
    fn validate(&self, dim: Dimension) -> JelloResult<()>;
}
