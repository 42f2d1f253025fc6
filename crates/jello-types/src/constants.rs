//! Physical constants and simulation defaults.
//!
//! Defaults reproduce the rubber-like setup the solver was tuned against:
//! 24 frames per second with 600 sub-steps per frame.

use crate::Scalar;

/// Default gravitational acceleration magnitude (m/s²).
pub const GRAVITY: Scalar = 9.81;

/// Default output frame rate (frames per second).
pub const DEFAULT_FRAME_RATE: u32 = 24;

/// Default number of solver steps between two emitted frames.
pub const DEFAULT_STEPS_PER_FRAME: u32 = 600;

/// Default timestep (seconds): one frame split into `DEFAULT_STEPS_PER_FRAME` steps.
pub const DEFAULT_DT: Scalar =
    1.0 / (DEFAULT_FRAME_RATE as Scalar * DEFAULT_STEPS_PER_FRAME as Scalar);

/// Default material stiffness constant `k` (Young's modulus proxy, Pa).
pub const DEFAULT_STIFFNESS: Scalar = 10_000.0;

/// Default Poisson ratio.
pub const DEFAULT_POISSON_RATIO: Scalar = 0.2;

/// Default mass density (kg/m³ in 3-D, kg/m² in 2-D).
pub const DEFAULT_DENSITY: Scalar = 100.0;

/// Deformation-gradient entries below this magnitude are snapped to zero.
pub const DEFORMATION_EPSILON: Scalar = 1.0e-9;

/// Elements whose rest volume magnitude is below this are degenerate.
pub const DEGENERATE_VOLUME_THRESHOLD: Scalar = 1.0e-14;

/// Default MINRES iteration cap per implicit step.
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 500;

/// Default relative residual tolerance for the implicit solve.
pub const DEFAULT_SOLVER_TOLERANCE: Scalar = 1.0e-8;
