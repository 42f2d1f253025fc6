//! Collision scenes.
//!
//! [`Scene`] is a closed set of shapes, selected from configuration:
//!
//! ```toml
//! [scene]
//! type = "plane"
//! height = 0.0
//! ```

use serde::{Deserialize, Serialize};

use jello_types::{Dimension, JelloResult, Scalar};

use crate::collider::Collider;
use crate::ground_plane::GroundPlane;
use crate::platform::MovingPlatform;
use crate::sphere::SphereCollider;

/// A collision scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scene {
    /// No obstacles: the body falls freely.
    Empty,
    Plane(GroundPlane),
    Sphere(SphereCollider),
    MovingPlatform(MovingPlatform),
    /// Several shapes, checked in order. Each shape sees the position
    /// corrected by the shapes before it.
    Composite { shapes: Vec<Scene> },
}

impl Default for Scene {
    fn default() -> Self {
        Self::ground()
    }
}

impl Scene {
    /// Infinite ground plane at `y = 0`.
    pub fn ground() -> Self {
        Self::Plane(GroundPlane::new(0.0))
    }

    /// A finite floor with a staggered grid of pegs above it.
    pub fn plinko(dim: Dimension) -> Self {
        let mut shapes = vec![Scene::Plane(GroundPlane::square(0.0, 2.0))];
        for row in 0..3 {
            let y = 0.4 + 0.35 * row as Scalar;
            let stagger = if row % 2 == 0 { 0.0 } else { 0.25 };
            for col in -2..=2 {
                let x = 0.5 * col as Scalar + stagger;
                let mut center = vec![x, y];
                if dim == Dimension::Three {
                    center.push(0.0);
                }
                shapes.push(Scene::Sphere(SphereCollider::new(center, 0.1)));
            }
        }
        Self::Composite { shapes }
    }

    /// A ground plane and a wall sliding along `+x`.
    pub fn bulldoze(dim: Dimension) -> Self {
        let (min, max, velocity) = match dim {
            Dimension::Two => (vec![-1.5, 0.0], vec![-1.0, 1.0], vec![0.5, 0.0]),
            Dimension::Three => (
                vec![-1.5, 0.0, -1.0],
                vec![-1.0, 1.0, 1.0],
                vec![0.5, 0.0, 0.0],
            ),
        };
        Self::Composite {
            shapes: vec![
                Scene::ground(),
                Scene::MovingPlatform(MovingPlatform::new(min, max, velocity)),
            ],
        }
    }

    /// Looks up a named scene (`"empty"`, `"ground"`, `"plinko"`, `"bulldoze"`).
    pub fn preset(name: &str, dim: Dimension) -> Option<Self> {
        match name {
            "empty" => Some(Self::Empty),
            "ground" => Some(Self::ground()),
            "plinko" => Some(Self::plinko(dim)),
            "bulldoze" => Some(Self::bulldoze(dim)),
            _ => None,
        }
    }

    /// Number of primitive shapes.
    pub fn shape_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Composite { shapes } => shapes.iter().map(Scene::shape_count).sum(),
            _ => 1,
        }
    }
}

impl Collider for Scene {
    fn check_collision(&self, candidate: &[Scalar]) -> Option<Vec<Scalar>> {
        match self {
            Self::Empty => None,
            Self::Plane(plane) => plane.check_collision(candidate),
            Self::Sphere(sphere) => sphere.check_collision(candidate),
            Self::MovingPlatform(platform) => platform.check_collision(candidate),
            Self::Composite { shapes } => {
                let mut current: Option<Vec<Scalar>> = None;
                for shape in shapes {
                    let probe = current.as_deref().unwrap_or(candidate);
                    if let Some(corrected) = shape.check_collision(probe) {
                        current = Some(corrected);
                    }
                }
                current
            }
        }
    }

    fn advance(&mut self, dt: Scalar) {
        match self {
            Self::MovingPlatform(platform) => platform.advance(dt),
            Self::Composite { shapes } => shapes.iter_mut().for_each(|s| s.advance(dt)),
            _ => {}
        }
    }

    fn validate(&self, dim: Dimension) -> JelloResult<()> {
        match self {
            Self::Empty => Ok(()),
            Self::Plane(plane) => plane.validate(dim),
            Self::Sphere(sphere) => sphere.validate(dim),
            Self::MovingPlatform(platform) => platform.validate(dim),
            Self::Composite { shapes } => shapes.iter().try_for_each(|s| s.validate(dim)),
        }
    }
}
