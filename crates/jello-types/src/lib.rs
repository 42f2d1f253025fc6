//! # jello-types
//!
//! Shared types, identifiers, error types, and simulation constants
//! for the Jello soft-body simulator.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that all other Jello crates share.

pub mod constants;
pub mod dimension;
pub mod error;
pub mod ids;
pub mod scalar;

pub use dimension::Dimension;
pub use error::{JelloError, JelloResult};
pub use ids::{ElementId, ParticleId};
pub use scalar::Scalar;
