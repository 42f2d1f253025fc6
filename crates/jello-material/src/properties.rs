//! Material parameters.
//!
//! The simulator is driven by a stiffness constant `k` (a Young's modulus
//! proxy) and a Poisson ratio `ν`. The stress formulas use the Lamé
//! parameters derived from them:
//!
//! | Parameter | Formula |
//! |---|---|
//! | shear modulus `μ` | `k / (2(1 + ν))` |
//! | first Lamé `λ` | `k·ν / ((1 + ν)(1 − 2ν))` |

use serde::{Deserialize, Serialize};

use jello_types::constants::{DEFAULT_DENSITY, DEFAULT_POISSON_RATIO, DEFAULT_STIFFNESS};
use jello_types::{JelloError, JelloResult, Scalar};

/// User-facing material constants, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialParams {
    /// Stiffness constant `k` (Pa).
    pub stiffness: Scalar,
    /// Poisson ratio `ν`, in `(−1, 0.5)`.
    pub poisson_ratio: Scalar,
    /// Mass density (kg/m³, or kg/m² in 2-D).
    pub density: Scalar,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            stiffness: DEFAULT_STIFFNESS,
            poisson_ratio: DEFAULT_POISSON_RATIO,
            density: DEFAULT_DENSITY,
        }
    }
}

impl MaterialParams {
    /// Soft, bouncy gelatin.
    pub fn jello() -> Self {
        Self::default()
    }

    /// Stiffer, nearly incompressible rubber.
    pub fn rubber() -> Self {
        Self {
            stiffness: 1.0e5,
            poisson_ratio: 0.3,
            density: 100.0,
        }
    }

    /// Looks up a named preset (`"jello"`, `"rubber"`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "jello" => Some(Self::jello()),
            "rubber" => Some(Self::rubber()),
            _ => None,
        }
    }

    /// Checks `k > 0`, `−1 < ν < 0.5` and `density > 0`.
    pub fn validate(&self) -> JelloResult<()> {
        if !(self.stiffness > 0.0 && self.stiffness.is_finite()) {
            return Err(JelloError::InvalidMaterial(format!(
                "stiffness must be positive, got {}",
                self.stiffness
            )));
        }
        if !(self.poisson_ratio > -1.0 && self.poisson_ratio < 0.5) {
            return Err(JelloError::InvalidMaterial(format!(
                "poisson_ratio must lie in (-1, 0.5), got {}",
                self.poisson_ratio
            )));
        }
        if !(self.density > 0.0 && self.density.is_finite()) {
            return Err(JelloError::InvalidMaterial(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        Ok(())
    }

    /// Derives the Lamé parameters.
    pub fn lame(&self) -> LameParameters {
        LameParameters::from_stiffness(self.stiffness, self.poisson_ratio)
    }
}

/// Lamé parameters `(μ, λ)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LameParameters {
    /// Shear modulus.
    pub mu: Scalar,
    /// First Lamé parameter.
    pub lambda: Scalar,
}

impl LameParameters {
    /// `μ = k / (2(1+ν))`, `λ = k·ν / ((1+ν)(1−2ν))`.
    pub fn from_stiffness(k: Scalar, nu: Scalar) -> Self {
        Self {
            mu: k / (2.0 * (1.0 + nu)),
            lambda: k * nu / ((1.0 + nu) * (1.0 - 2.0 * nu)),
        }
    }
}
