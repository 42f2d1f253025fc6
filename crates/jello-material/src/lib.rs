//! # jello-material
//!
//! Constitutive model abstraction and material parameters.
//!
//! ## Design
//!
//! The [`ConstitutiveModel`] trait defines the interface for computing the
//! first Piola-Kirchhoff stress and its derivative `∂P/∂F` from the
//! per-element [`Kinematics`] bundle (`F`, its polar factors and cofactor).
//! The solver only talks to the trait, so the force and stiffness
//! assemblers stay independent of the stress formula.
//!
//! [`MaterialParams`] holds the user-facing constants (`k`, `ν`, density)
//! and converts them to [`LameParameters`].

pub mod cofactor_derivative;
pub mod corotational;
pub mod kinematics;
pub mod properties;
pub mod traits;

pub use corotational::CorotationalModel;
pub use kinematics::Kinematics;
pub use properties::{LameParameters, MaterialParams};
pub use traits::ConstitutiveModel;
