//! Scalar type alias for the simulation.
//!
//! The analytic stiffness tensor and the Krylov solve are sensitive to
//! round-off, so the CPU pipeline runs in double precision.

/// The floating-point type used throughout the simulation.
pub type Scalar = f64;
