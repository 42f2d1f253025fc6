//! Ground plane collision.
//!
//! Prevents particles from penetrating a horizontal plane at
//! `y = height`. The plane is infinite unless `half_extent` is set, in
//! which case it is a square (a segment in 2-D) centered on the vertical
//! axis and particles outside it fall past.

use serde::{Deserialize, Serialize};

use jello_types::{Dimension, JelloError, JelloResult, Scalar};

use crate::collider::Collider;

/// Ground plane collision at a fixed height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    /// Height of the plane (coordinate along axis 1).
    pub height: Scalar,
    /// Half side length of a finite square plane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_extent: Option<Scalar>,
}

impl GroundPlane {
    /// Creates an infinite ground plane at the given height.
    pub fn new(height: Scalar) -> Self {
        Self {
            height,
            half_extent: None,
        }
    }

    /// Creates a finite square plane.
    pub fn square(height: Scalar, half_extent: Scalar) -> Self {
        Self {
            height,
            half_extent: Some(half_extent),
        }
    }

    fn covers(&self, candidate: &[Scalar]) -> bool {
        match self.half_extent {
            None => true,
            Some(h) => candidate
                .iter()
                .enumerate()
                .filter(|&(axis, _)| axis != 1)
                .all(|(_, x)| x.abs() < h),
        }
    }
}

impl Collider for GroundPlane {
    fn check_collision(&self, candidate: &[Scalar]) -> Option<Vec<Scalar>> {
        if candidate[1] < self.height && self.covers(candidate) {
            let mut corrected = candidate.to_vec();
            corrected[1] = self.height;
            Some(corrected)
        } else {
            None
        }
    }

    fn validate(&self, _dim: Dimension) -> JelloResult<()> {
        if let Some(h) = self.half_extent {
            if !(h > 0.0) {
                return Err(JelloError::InvalidConfig(format!(
                    "plane half_extent must be positive, got {h}"
                )));
            }
        }
        Ok(())
    }
}
