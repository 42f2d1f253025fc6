//! Procedural mesh generators for tests and demo scenes.
//!
//! All generators are deterministic and produce valid meshes, so they
//! return a [`TetMesh`] directly rather than a `Result`.

use jello_types::{Dimension, Scalar};

use crate::mesh::TetMesh;

/// The unit right tetrahedron `(0,0,0), (1,0,0), (0,1,0), (0,0,1)`.
///
/// # Example
/// ```
/// use jello_mesh::generators::single_tetrahedron;
/// let mesh = single_tetrahedron();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert!((mesh.total_volume() - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn single_tetrahedron() -> TetMesh {
    TetMesh {
        dim: Dimension::Three,
        positions: vec![
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ],
        elements: vec![0, 1, 2, 3],
    }
}

/// The unit right triangle `(0,0), (1,0), (0,1)`.
pub fn single_triangle() -> TetMesh {
    TetMesh {
        dim: Dimension::Two,
        positions: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        elements: vec![0, 1, 2],
    }
}

/// Generates an axis-aligned cube subdivided `n` times along each axis.
///
/// The cube spans `origin .. origin + size` on every axis. Each cell is
/// split into 5 tetrahedra, alternating between the two mirror-image
/// decompositions so neighbouring cells share face diagonals.
///
/// # Arguments
/// - `n` — Cells per axis (vertex count = `(n + 1)³`). Clamped to at least 1.
/// - `size` — Edge length in meters.
/// - `origin` — Minimum corner.
pub fn cube(n: usize, size: Scalar, origin: [Scalar; 3]) -> TetMesh {
    let n = n.max(1);
    let step = size / n as Scalar;
    let stride = n + 1;

    let mut positions = Vec::with_capacity(stride * stride * stride * 3);
    for i in 0..=n {
        for j in 0..=n {
            for k in 0..=n {
                positions.push(origin[0] + step * i as Scalar);
                positions.push(origin[1] + step * j as Scalar);
                positions.push(origin[2] + step * k as Scalar);
            }
        }
    }

    let node = |i: usize, j: usize, k: usize| ((i * stride + j) * stride + k) as u32;

    let mut elements = Vec::with_capacity(n * n * n * 5 * 4);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                // Local cell corners:
                //
                //     4 o----------o 7
                //       | 5 o----------o 6
                //       |   |      ·   |        y
                //       |   |      ·   |        ^
                //     0 o---|· · · · 3 |        |
                //           o----------o         --> x
                //           1          2
                let c0 = node(i, j, k);
                let c1 = node(i, j, k + 1);
                let c2 = node(i + 1, j, k + 1);
                let c3 = node(i + 1, j, k);
                let c4 = node(i, j + 1, k);
                let c5 = node(i, j + 1, k + 1);
                let c6 = node(i + 1, j + 1, k + 1);
                let c7 = node(i + 1, j + 1, k);

                let even = (i % 2 == 0) == (j % 2 == k % 2);
                let tets: [[u32; 4]; 5] = if even {
                    [
                        [c0, c1, c2, c5],
                        [c2, c5, c6, c7],
                        [c2, c7, c3, c0],
                        [c7, c4, c0, c5],
                        [c0, c2, c7, c5],
                    ]
                } else {
                    [
                        [c4, c6, c5, c1],
                        [c6, c2, c1, c3],
                        [c6, c7, c3, c4],
                        [c3, c4, c0, c1],
                        [c4, c3, c6, c1],
                    ]
                };
                for tet in tets {
                    elements.extend_from_slice(&tet);
                }
            }
        }
    }

    TetMesh {
        dim: Dimension::Three,
        positions,
        elements,
    }
}

/// Generates an axis-aligned square subdivided `n` times along each axis,
/// two triangles per cell.
///
/// The square spans `origin .. origin + size` on both axes.
pub fn square(n: usize, size: Scalar, origin: [Scalar; 2]) -> TetMesh {
    let n = n.max(1);
    let step = size / n as Scalar;
    let stride = n + 1;

    let mut positions = Vec::with_capacity(stride * stride * 2);
    for j in 0..=n {
        for i in 0..=n {
            positions.push(origin[0] + step * i as Scalar);
            positions.push(origin[1] + step * j as Scalar);
        }
    }

    let mut elements = Vec::with_capacity(n * n * 6);
    for j in 0..n {
        for i in 0..n {
            let bottom_left = (j * stride + i) as u32;
            let bottom_right = bottom_left + 1;
            let top_left = bottom_left + stride as u32;
            let top_right = top_left + 1;

            elements.extend_from_slice(&[bottom_left, bottom_right, top_left]);
            elements.extend_from_slice(&[bottom_right, top_right, top_left]);
        }
    }

    TetMesh {
        dim: Dimension::Two,
        positions,
        elements,
    }
}
