//! Spatial dimension of a simulation.
//!
//! Triangles in 2-D and tetrahedra in 3-D share the whole pipeline;
//! everything downstream asks the `Dimension` for its sizes.

use serde::{Deserialize, Serialize};

use crate::error::{JelloError, JelloResult};
use crate::Scalar;

/// Spatial dimension: 2-D triangle meshes or 3-D tetrahedral meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Dimension {
    Two,
    Three,
}

impl Dimension {
    /// Validates a raw dimension. Anything other than 2 or 3 is fatal.
    pub fn new(dim: usize) -> JelloResult<Self> {
        match dim {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(JelloError::InvalidDimension(other)),
        }
    }

    /// Number of coordinates per particle.
    #[inline]
    pub fn size(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Number of vertices per simplex element (`dim + 1`).
    #[inline]
    pub fn vertices_per_element(self) -> usize {
        self.size() + 1
    }

    /// Factor relating `det(Dm)` to the simplex volume (2 or 6).
    #[inline]
    pub fn volume_factor(self) -> Scalar {
        match self {
            Self::Two => 2.0,
            Self::Three => 6.0,
        }
    }

    /// Index of the "up" axis used by gravity and planes.
    #[inline]
    pub fn up_axis(self) -> usize {
        1
    }
}

impl TryFrom<usize> for Dimension {
    type Error = JelloError;

    fn try_from(value: usize) -> JelloResult<Self> {
        Self::new(value)
    }
}

impl From<Dimension> for usize {
    fn from(dim: Dimension) -> usize {
        dim.size()
    }
}
