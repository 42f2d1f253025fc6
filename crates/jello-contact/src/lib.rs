//! # jello-contact
//!
//! Collision scenes for the Jello simulator.
//!
//! A [`Scene`] answers one question per particle and step: given a
//! candidate position, is it inside an obstacle, and if so where should it
//! go instead? What happens to the particle afterwards is decided by the
//! [`CollisionResponse`] policy.
//!
//! Every shape works in 2-D and 3-D; axis 1 is "up".

pub mod collider;
pub mod ground_plane;
pub mod platform;
pub mod response;
pub mod scene;
pub mod sphere;

pub use collider::Collider;
pub use ground_plane::GroundPlane;
pub use platform::MovingPlatform;
pub use response::{CollisionResponse, ContactResult};
pub use scene::Scene;
pub use sphere::SphereCollider;
