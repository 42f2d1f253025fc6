//! Collision response policies.
//!
//! Once a scene reports a corrected position, the response decides the
//! particle's final position and velocity for the step.

use serde::{Deserialize, Serialize};

use jello_types::Scalar;

/// What to do with a particle whose candidate position penetrates the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionResponse {
    /// Restore the position from before the step and zero the velocity.
    #[default]
    Revert,
    /// Accept the corrected position; velocity becomes
    /// `(corrected − previous) / dt`.
    Project,
}

impl CollisionResponse {
    /// Writes the post-collision state of one particle.
    ///
    /// `previous` is the position at the start of the step, `corrected` the
    /// scene's suggestion.
    pub fn apply(
        self,
        previous: &[Scalar],
        corrected: &[Scalar],
        dt: Scalar,
        position: &mut [Scalar],
        velocity: &mut [Scalar],
    ) {
        match self {
            Self::Revert => {
                position.copy_from_slice(previous);
                velocity.iter_mut().for_each(|v| *v = 0.0);
            }
            Self::Project => {
                position.copy_from_slice(corrected);
                for ((v, c), p) in velocity.iter_mut().zip(corrected).zip(previous) {
                    *v = (c - p) / dt;
                }
            }
        }
    }
}

/// Result of resolving the collisions of one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactResult {
    /// Number of particles that were corrected.
    pub resolved_count: u32,
    /// Largest distance between a candidate and its corrected position.
    pub max_penetration: Scalar,
}

impl ContactResult {
    /// Records one correction.
    pub fn record(&mut self, candidate: &[Scalar], corrected: &[Scalar]) {
        let depth = candidate
            .iter()
            .zip(corrected)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<Scalar>()
            .sqrt();
        self.resolved_count += 1;
        self.max_penetration = self.max_penetration.max(depth);
    }
}
