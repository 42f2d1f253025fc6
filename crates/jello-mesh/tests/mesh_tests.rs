//! Integration tests for jello-mesh.

use jello_mesh::generators::{cube, single_tetrahedron, single_triangle, square};
use jello_mesh::TetMesh;
use jello_types::{Dimension, JelloError};

// ─── TetMesh Tests ────────────────────────────────────────────

#[test]
fn basic_counts() {
    let mesh = single_tetrahedron();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.element_count(), 1);
    assert_eq!(mesh.position(1), &[1.0, 0.0, 0.0]);
    assert_eq!(mesh.element(0), &[0, 1, 2, 3]);
}

#[test]
fn validate_ok() {
    assert!(single_tetrahedron().validate().is_ok());
    assert!(single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_ragged_positions() {
    let mut mesh = single_tetrahedron();
    mesh.positions.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = single_tetrahedron();
    mesh.elements[3] = 10;
    assert!(matches!(mesh.validate(), Err(JelloError::InvalidMesh(_))));
}

#[test]
fn validate_catches_repeated_vertex() {
    let mut mesh = single_triangle();
    mesh.elements = vec![0, 1, 0];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_non_finite() {
    let mut mesh = single_triangle();
    mesh.positions[2] = f64::NAN;
    assert!(mesh.validate().is_err());
}

#[test]
fn from_raw_rejects_bad_dimension() {
    let result = TetMesh::from_raw(4, vec![0.0; 4], vec![]);
    assert!(matches!(result, Err(JelloError::InvalidDimension(4))));
}

#[test]
fn signed_volume_follows_orientation() {
    let mut mesh = single_tetrahedron();
    // Dm columns are x_c − x_last
    let v = mesh.signed_volume(0);
    assert!((v.abs() - 1.0 / 6.0).abs() < 1e-12);
    mesh.elements.swap(0, 1);
    assert!((mesh.signed_volume(0) + v).abs() < 1e-12);
}

#[test]
fn bounds_and_translate() {
    let mut mesh = single_triangle();
    mesh.translate(&[1.0, 2.0]);
    let (lo, hi) = mesh.bounds();
    assert_eq!(lo, vec![1.0, 2.0]);
    assert_eq!(hi, vec![2.0, 3.0]);
    mesh.scale(2.0);
    assert_eq!(mesh.position(0), &[2.0, 4.0]);
}

#[test]
fn mesh_json_roundtrip() {
    let mesh = single_triangle();
    let json = serde_json::to_string(&mesh).unwrap();
    let back: TetMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mesh);
    assert_eq!(back.dim, Dimension::Two);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn cube_counts() {
    let mesh = cube(2, 1.0, [0.0, 0.0, 0.0]);
    assert_eq!(mesh.vertex_count(), 27);
    assert_eq!(mesh.element_count(), 40);
    assert!(mesh.validate().is_ok());
}

#[test]
fn cube_volume_is_exact() {
    let mesh = cube(3, 0.5, [1.0, 2.0, 3.0]);
    assert!((mesh.total_volume() - 0.125).abs() < 1e-12);
    for e in 0..mesh.element_count() {
        assert!(mesh.signed_volume(e).abs() > 1e-6, "element {e} is degenerate");
    }
}

#[test]
fn cube_bounds() {
    let mesh = cube(2, 0.2, [-0.1, 0.05, -0.1]);
    let (lo, hi) = mesh.bounds();
    for k in 0..3 {
        assert!((hi[k] - lo[k] - 0.2).abs() < 1e-12);
    }
    assert!((lo[1] - 0.05).abs() < 1e-12);
}

#[test]
fn cube_clamps_zero_subdivisions() {
    let mesh = cube(0, 1.0, [0.0; 3]);
    assert_eq!(mesh.element_count(), 5);
}

#[test]
fn square_counts_and_area() {
    let mesh = square(4, 2.0, [0.0, 0.0]);
    assert_eq!(mesh.vertex_count(), 25);
    assert_eq!(mesh.element_count(), 32);
    assert!(mesh.validate().is_ok());
    assert!((mesh.total_volume() - 4.0).abs() < 1e-12);
}
