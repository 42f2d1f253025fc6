//! Moving axis-aligned box collision.
//!
//! A box translating at constant velocity, used to shove the body around.
//! Penetrating particles are pushed out through the nearest face.

use serde::{Deserialize, Serialize};

use jello_types::{Dimension, JelloError, JelloResult, Scalar};

use crate::collider::Collider;

/// Axis-aligned box moving at a constant velocity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatform {
    /// Current minimum corner.
    pub min: Vec<Scalar>,
    /// Current maximum corner.
    pub max: Vec<Scalar>,
    /// Translation per second.
    #[serde(default)]
    pub velocity: Vec<Scalar>,
}

impl MovingPlatform {
    pub fn new(min: Vec<Scalar>, max: Vec<Scalar>, velocity: Vec<Scalar>) -> Self {
        Self { min, max, velocity }
    }

    fn contains(&self, p: &[Scalar]) -> bool {
        p.iter()
            .zip(self.min.iter().zip(&self.max))
            .all(|(x, (lo, hi))| *x > *lo && *x < *hi)
    }
}

impl Collider for MovingPlatform {
    fn check_collision(&self, candidate: &[Scalar]) -> Option<Vec<Scalar>> {
        if !self.contains(candidate) {
            return None;
        }

        // Shortest way out: (axis, target coordinate, depth)
        let mut best = (0, self.min[0], Scalar::INFINITY);
        for (axis, x) in candidate.iter().enumerate() {
            let to_min = x - self.min[axis];
            let to_max = self.max[axis] - x;
            if to_min < best.2 {
                best = (axis, self.min[axis], to_min);
            }
            if to_max < best.2 {
                best = (axis, self.max[axis], to_max);
            }
        }

        let mut corrected = candidate.to_vec();
        corrected[best.0] = best.1;
        Some(corrected)
    }

    fn advance(&mut self, dt: Scalar) {
        for (axis, v) in self.velocity.iter().enumerate() {
            self.min[axis] += v * dt;
            self.max[axis] += v * dt;
        }
    }

    fn validate(&self, dim: Dimension) -> JelloResult<()> {
        let d = dim.size();
        if self.min.len() != d || self.max.len() != d {
            return Err(JelloError::InvalidConfig(format!(
                "platform corners must have {d} components"
            )));
        }
        if !self.velocity.is_empty() && self.velocity.len() != d {
            return Err(JelloError::InvalidConfig(format!(
                "platform velocity must have {d} components"
            )));
        }
        if self.min.iter().zip(&self.max).any(|(lo, hi)| lo >= hi) {
            return Err(JelloError::InvalidConfig(
                "platform min corner must be below max corner on every axis".into(),
            ));
        }
        Ok(())
    }
}
