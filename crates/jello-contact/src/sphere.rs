//! Analytical sphere collision (a circle in 2-D).
//!
//! Particles inside the sphere are projected radially to its surface.

use serde::{Deserialize, Serialize};

use jello_types::{Dimension, JelloError, JelloResult, Scalar};

use crate::collider::Collider;

/// Analytical sphere collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    /// Center of the sphere (`dim` components).
    pub center: Vec<Scalar>,
    /// Radius of the sphere.
    pub radius: Scalar,
}

impl SphereCollider {
    /// Creates a new sphere collider.
    pub fn new(center: Vec<Scalar>, radius: Scalar) -> Self {
        Self { center, radius }
    }
}

impl Collider for SphereCollider {
    fn check_collision(&self, candidate: &[Scalar]) -> Option<Vec<Scalar>> {
        let offset: Vec<Scalar> = candidate.iter().zip(&self.center).map(|(p, c)| p - c).collect();
        let dist2: Scalar = offset.iter().map(|x| x * x).sum();
        if dist2 >= self.radius * self.radius {
            return None;
        }

        let mut corrected = self.center.clone();
        if dist2 > 1e-24 {
            let scale = self.radius / dist2.sqrt();
            for (c, o) in corrected.iter_mut().zip(&offset) {
                *c += o * scale;
            }
        } else {
            // Exactly at the center, push up
            corrected[1] += self.radius;
        }
        Some(corrected)
    }

    fn validate(&self, dim: Dimension) -> JelloResult<()> {
        if self.center.len() != dim.size() {
            return Err(JelloError::InvalidConfig(format!(
                "sphere center has {} components, expected {}",
                self.center.len(),
                dim.size()
            )));
        }
        if !(self.radius > 0.0) {
            return Err(JelloError::InvalidConfig(format!(
                "sphere radius must be positive, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}
