//! Normalized eight-point fundamental-matrix estimation.

use nalgebra::{DMatrix, SMatrix};
use sfm_core::{Mat3, Pt2, Real};

use crate::math::{mat3_from_svd_row, normalize_points_2d};

/// Normalized 8-point algorithm for the fundamental matrix.
///
/// `pts1` and `pts2` are corresponding pixel points in two images. The
/// returned matrix is forced to rank-2 and satisfies `p2ᵀ F p1 = 0` up to
/// numerical error. Returns `None` with fewer than 8 correspondences,
/// mismatched slice lengths, or a degenerate (e.g. coincident) sample.
pub fn fundamental_8point(pts1: &[Pt2], pts2: &[Pt2]) -> Option<Mat3> {
    let n = pts1.len();
    if n < 8 || pts2.len() != n {
        return None;
    }

    let (pts1_n, t1) = normalize_points_2d(pts1)?;
    let (pts2_n, t2) = normalize_points_2d(pts2)?;

    // Design matrix A (n x 9) for p2^T F p1 = 0.
    let mut a = DMatrix::<Real>::zeros(n, 9);
    for (i, (p1, p2)) in pts1_n.iter().zip(pts2_n.iter()).enumerate() {
        let x = p1.x;
        let y = p1.y;
        let xp = p2.x;
        let yp = p2.y;

        a[(i, 0)] = xp * x;
        a[(i, 1)] = xp * y;
        a[(i, 2)] = xp;
        a[(i, 3)] = yp * x;
        a[(i, 4)] = yp * y;
        a[(i, 5)] = yp;
        a[(i, 6)] = x;
        a[(i, 7)] = y;
        a[(i, 8)] = 1.0;
    }

    // Pad to at least 9 rows so the SVD exposes the full right nullspace.
    let mut a_work = a;
    if a_work.nrows() < a_work.ncols() {
        let rows = a_work.nrows();
        let cols = a_work.ncols();
        let mut a_pad = DMatrix::<Real>::zeros(cols, cols);
        a_pad.view_mut((0, 0), (rows, cols)).copy_from(&a_work);
        a_work = a_pad;
    }

    // Right-singular vector of the smallest singular value.
    let svd = a_work.svd(true, true);
    let v_t = svd.v_t?;
    let mut f = mat3_from_svd_row(&v_t, v_t.nrows() - 1);

    // Enforce the rank-2 epipolar constraint.
    let svd_f = f.svd(true, true);
    let u = svd_f.u?;
    let v_t = svd_f.v_t?;
    let mut s = svd_f.singular_values;
    s[2] = 0.0;
    let s_mat = SMatrix::<Real, 3, 3>::from_diagonal(&s);
    f = u * s_mat * v_t;

    // Denormalize: F = T2^T F_n T1.
    Some(t2.transpose() * f * t1)
}
