//! Integration tests for jello-math.

use jello_math::cofactor::{cofactor, determinant};
use jello_math::decomposition::{
    clamp_small_entries, deformation_gradient, edge_matrix, polar_decomposition,
};
use jello_math::faer_solver::FaerLuSolver;
use jello_math::minres::MinresSolver;
use jello_math::solver::relative_residual;
use jello_math::sparse::CsrMatrix;
use jello_math::tensor::{levi_civita, Tensor4};
use jello_math::{DMatrix, LinearSolver};
use jello_types::Dimension;

fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
    (a - b).iter().fold(0.0, |acc, x| acc.max(x.abs()))
}

fn rotation_z(angle: f64) -> DMatrix<f64> {
    let (s, c) = angle.sin_cos();
    DMatrix::from_row_slice(3, 3, &[c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0])
}

// ─── Polar Decomposition Tests ────────────────────────────────

#[test]
fn polar_identity() {
    let f = DMatrix::<f64>::identity(3, 3);
    let pd = polar_decomposition(&f);
    assert!(max_abs_diff(&pd.rotation, &f) < 1e-10);
    assert!(max_abs_diff(&pd.stretch, &f) < 1e-10);
}

#[test]
fn polar_recovers_rotation_and_stretch() {
    let r0 = rotation_z(0.7);
    let s0 = DMatrix::from_row_slice(3, 3, &[2.0, 0.3, 0.0, 0.3, 1.5, 0.1, 0.0, 0.1, 0.8]);
    let f = &r0 * &s0;
    let pd = polar_decomposition(&f);

    assert!(max_abs_diff(&pd.rotation, &r0) < 1e-9, "R = {}", pd.rotation);
    assert!(max_abs_diff(&pd.stretch, &s0) < 1e-9, "S = {}", pd.stretch);
    assert!(max_abs_diff(&(&pd.rotation * &pd.stretch), &f) < 1e-9);
}

#[test]
fn polar_reflection_yields_proper_rotation() {
    let f = DMatrix::from_row_slice(3, 3, &[-1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0]);
    let pd = polar_decomposition(&f);
    let det = pd.rotation.determinant();
    assert!((det - 1.0).abs() < 1e-10, "det(R) = {det}");
    // Orthogonality
    let rtr = pd.rotation.transpose() * &pd.rotation;
    assert!(max_abs_diff(&rtr, &DMatrix::identity(3, 3)) < 1e-10);
    // R·S still reproduces F
    assert!(max_abs_diff(&(&pd.rotation * &pd.stretch), &f) < 1e-9);
}

#[test]
fn polar_reflection_2d() {
    let f = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
    let pd = polar_decomposition(&f);
    assert!((pd.rotation.determinant() - 1.0).abs() < 1e-10);
    assert!(max_abs_diff(&(&pd.rotation * &pd.stretch), &f) < 1e-9);
}

#[test]
fn polar_zero_matrix_does_not_panic() {
    let f = DMatrix::<f64>::zeros(3, 3);
    let pd = polar_decomposition(&f);
    assert!(pd.rotation.iter().all(|x| x.is_finite()));
    assert!((pd.rotation.determinant() - 1.0).abs() < 1e-10);
}

// ─── Deformation Gradient Tests ───────────────────────────────

#[test]
fn edge_matrix_uses_last_vertex_as_reference() {
    let p0 = [1.0, 0.0, 0.0];
    let p1 = [0.0, 2.0, 0.0];
    let p2 = [0.0, 0.0, 3.0];
    let p3 = [0.0, 0.0, 0.0];
    let dm = edge_matrix(&[&p0, &p1, &p2, &p3]);
    let expected = DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0]);
    assert_eq!(dm, expected);

    // Translating every vertex leaves the edge matrix unchanged
    let q: Vec<[f64; 3]> = [p0, p1, p2, p3]
        .iter()
        .map(|p| [p[0] + 5.0, p[1] - 1.0, p[2] + 0.5])
        .collect();
    let shifted = edge_matrix(&[&q[0], &q[1], &q[2], &q[3]]);
    assert!(max_abs_diff(&shifted, &expected) < 1e-12);
}

#[test]
fn deformation_gradient_identity() {
    let dm = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.0, 2.0]);
    let dm_inv = dm.clone().try_inverse().unwrap();
    let f = deformation_gradient(&dm, &dm_inv);
    assert!(max_abs_diff(&f, &DMatrix::identity(2, 2)) < 1e-12);
}

#[test]
fn clamp_snaps_small_entries() {
    let mut m = DMatrix::from_row_slice(2, 2, &[1.0, 1e-12, -5e-10, 2e-9]);
    clamp_small_entries(&mut m, 1e-9);
    assert_eq!(m[(0, 1)], 0.0);
    assert_eq!(m[(1, 0)], 0.0);
    assert_eq!(m[(1, 1)], 2e-9);
    assert_eq!(m[(0, 0)], 1.0);
}

// ─── Cofactor Tests ───────────────────────────────────────────

#[test]
fn cofactor_matches_det_inverse_transpose_3d() {
    let f = DMatrix::from_row_slice(3, 3, &[1.2, 0.1, -0.3, 0.4, 0.9, 0.2, -0.1, 0.5, 1.1]);
    let expected = f.determinant() * f.clone().try_inverse().unwrap().transpose();
    let cof = cofactor(Dimension::Three, &f);
    assert!(max_abs_diff(&cof, &expected) < 1e-12);
    assert!((determinant(Dimension::Three, &f) - f.determinant()).abs() < 1e-12);
}

#[test]
fn cofactor_matches_det_inverse_transpose_2d() {
    let f = DMatrix::from_row_slice(2, 2, &[1.5, -0.2, 0.7, 0.8]);
    let expected = f.determinant() * f.clone().try_inverse().unwrap().transpose();
    let cof = cofactor(Dimension::Two, &f);
    assert!(max_abs_diff(&cof, &expected) < 1e-12);
}

#[test]
fn cofactor_of_singular_matrix_is_finite() {
    let f = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 0.0]);
    let cof = cofactor(Dimension::Three, &f);
    assert!(cof.iter().all(|x| x.is_finite()));
    assert!(determinant(Dimension::Three, &f).abs() < 1e-12);
}

// ─── Tensor Tests ─────────────────────────────────────────────

#[test]
fn levi_civita_signs() {
    assert_eq!(levi_civita(0, 1, 2), 1.0);
    assert_eq!(levi_civita(1, 2, 0), 1.0);
    assert_eq!(levi_civita(2, 1, 0), -1.0);
    assert_eq!(levi_civita(0, 0, 1), 0.0);
    // ε_ijk ε_ijk = 6
    let mut sum = 0.0;
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                sum += levi_civita(i, j, k) * levi_civita(i, j, k);
            }
        }
    }
    assert_eq!(sum, 6.0);
}

#[test]
fn tensor_identity_and_scaling() {
    let mut t = Tensor4::identity(3);
    assert_eq!(t[[1, 2, 1, 2]], 1.0);
    assert_eq!(t[[1, 2, 2, 1]], 0.0);
    let other = Tensor4::identity(3);
    t.add_scaled(&other, -0.5);
    assert_eq!(t[[0, 0, 0, 0]], 0.5);
    assert_eq!(t.max_abs(), 0.5);
    assert_eq!(t.dim(), 3);
}

// ─── Sparse Matrix Tests ──────────────────────────────────────

#[test]
fn csr_from_triplets_sums_duplicates() {
    let triplets = vec![(0, 1, 2.0), (0, 0, 1.0), (0, 1, 3.0), (2, 2, 4.0), (1, 0, -1.0)];
    let m = CsrMatrix::from_triplets(3, 3, &triplets);
    assert_eq!(m.nnz(), 4);
    assert_eq!(m.get(0, 1), 5.0);
    assert_eq!(m.get(0, 0), 1.0);
    assert_eq!(m.get(1, 1), 0.0);
    assert_eq!(m.row_ptr, vec![0, 2, 3, 4]);
    assert_eq!(m.col_idx[..2], [0, 1]);
}

#[test]
fn csr_mul_vec() {
    let m = CsrMatrix::from_triplets(2, 2, &[(0, 0, 2.0), (0, 1, 1.0), (1, 1, 3.0)]);
    let mut y = vec![0.0; 2];
    m.mul_vec(&[1.0, 2.0], &mut y);
    assert_eq!(y, vec![4.0, 6.0]);
    assert!(!m.is_symmetric(1e-12));
}

#[test]
fn csr_symmetry_check() {
    let m = CsrMatrix::from_triplets(2, 2, &[(0, 1, 1.5), (1, 0, 1.5), (0, 0, 1.0)]);
    assert!(m.is_symmetric(1e-12));
    let empty = CsrMatrix::new(3, 3);
    assert_eq!(empty.nnz(), 0);
    assert!(empty.is_symmetric(1e-12));
}

#[test]
fn csr_from_no_triplets_is_empty() {
    let m = CsrMatrix::from_triplets(4, 4, &[]);
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.row_ptr, vec![0; 5]);
    let mut y = vec![1.0; 4];
    m.mul_vec(&[1.0, 2.0, 3.0, 4.0], &mut y);
    assert!(y.iter().all(|&v| v == 0.0));
}

#[test]
fn csr_serialization_preserves_structure() {
    let m = CsrMatrix::from_triplets(3, 3, &[(0, 0, 4.0), (1, 2, -1.0), (2, 1, -1.0)]);
    let json = serde_json::to_string(&m).unwrap();
    let back: CsrMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back.row_ptr, m.row_ptr);
    assert_eq!(back.col_idx, m.col_idx);
    assert_eq!(back.values, m.values);
}

// ─── Linear Solver Tests ──────────────────────────────────────

fn tridiagonal(n: usize, diag: f64, off: f64) -> CsrMatrix {
    let mut triplets = Vec::new();
    for i in 0..n {
        triplets.push((i, i, diag));
        if i + 1 < n {
            triplets.push((i, i + 1, off));
            triplets.push((i + 1, i, off));
        }
    }
    CsrMatrix::from_triplets(n, n, &triplets)
}

#[test]
fn minres_solves_spd_system() {
    let a = tridiagonal(20, 4.0, -1.0);
    let rhs: Vec<f64> = (0..20).map(|i| (i as f64).sin() + 1.0).collect();
    let mut x = vec![0.0; 20];
    let mut solver = MinresSolver::new(200, 1e-10);
    let report = solver.solve(&a, &rhs, &mut x).unwrap();
    assert!(report.converged, "report: {report:?}");
    assert!(relative_residual(&a, &rhs, &x) < 1e-9);
    assert_eq!(solver.name(), "minres");
}

#[test]
fn minres_solves_indefinite_system() {
    // Diagonal entries alternate in sign: symmetric but indefinite.
    let n = 12;
    let mut triplets = Vec::new();
    for i in 0..n {
        let d = if i % 2 == 0 { 3.0 + i as f64 } else { -2.0 - i as f64 };
        triplets.push((i, i, d));
        if i + 1 < n {
            triplets.push((i, i + 1, 0.5));
            triplets.push((i + 1, i, 0.5));
        }
    }
    let a = CsrMatrix::from_triplets(n, n, &triplets);
    let rhs = vec![1.0; n];
    let mut x = vec![0.0; n];
    let report = MinresSolver::new(100, 1e-10).solve(&a, &rhs, &mut x).unwrap();
    assert!(report.converged);
    assert!(relative_residual(&a, &rhs, &x) < 1e-8);
}

#[test]
fn minres_zero_rhs_returns_immediately() {
    let a = tridiagonal(4, 2.0, 0.5);
    let mut x = vec![0.0; 4];
    let report = MinresSolver::default().solve(&a, &[0.0; 4], &mut x).unwrap();
    assert_eq!(report.iterations, 0);
    assert!(report.converged);
    assert!(x.iter().all(|&v| v == 0.0));
}

#[test]
fn minres_iteration_cap_is_not_an_error() {
    let a = tridiagonal(50, 2.0, -1.0);
    let rhs = vec![1.0; 50];
    let mut x = vec![0.0; 50];
    let report = MinresSolver::new(2, 1e-14).solve(&a, &rhs, &mut x).unwrap();
    assert_eq!(report.iterations, 2);
    assert!(!report.converged);
    assert!(x.iter().all(|v| v.is_finite()));
}

#[test]
fn solver_rejects_mismatched_lengths() {
    let a = tridiagonal(3, 2.0, 0.0);
    let mut x = vec![0.0; 2];
    assert!(MinresSolver::default().solve(&a, &[1.0; 3], &mut x).is_err());
}

#[test]
fn faer_lu_solves_indefinite_system() {
    let a = CsrMatrix::from_triplets(
        3,
        3,
        &[(0, 0, 2.0), (1, 1, -3.0), (2, 2, 1.0), (0, 2, 1.0), (2, 0, 1.0)],
    );
    let rhs = vec![1.0, 2.0, 3.0];
    let mut x = vec![0.0; 3];
    let mut solver = FaerLuSolver::new();
    let report = solver.solve(&a, &rhs, &mut x).unwrap();
    assert!(report.converged, "report: {report:?}");
    assert!(relative_residual(&a, &rhs, &x) < 1e-10);
    assert_eq!(solver.name(), "faer_lu");
}
