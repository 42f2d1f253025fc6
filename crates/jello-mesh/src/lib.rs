//! # jello-mesh
//!
//! Simplex mesh representation for the Jello simulator.
//!
//! ## Key Types
//!
//! - [`TetMesh`] — Rest positions plus `dim + 1` vertex index tuples.
//!   Tetrahedra in 3-D, triangles in 2-D.
//! - Procedural generators for tests and demo scenes (single simplices,
//!   subdivided cubes and squares).

pub mod generators;
pub mod mesh;

pub use mesh::TetMesh;
