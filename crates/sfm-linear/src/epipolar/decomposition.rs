//! Essential matrix construction and decomposition into candidate poses.

use sfm_core::{Mat3, RelativePose};

/// Convert a fundamental matrix to an essential matrix: `E = K2ᵀ · F · K1`.
pub fn essential_from_fundamental(f: &Mat3, k1: &Mat3, k2: &Mat3) -> Mat3 {
    k2.transpose() * f * k1
}

/// Decompose an essential matrix into the four candidate relative poses.
///
/// The translation direction is the third column of the left singular-vector
/// matrix; the two rotations are built from the fixed 90° rotation basis `W`
/// applied on both sides of the singular vectors, each negated if its
/// determinant is −1. The candidates are the Cartesian product
/// `{R1, R2} × {+t, −t}`, in that enumeration order. The correct pose must
/// be selected by cheirality checks on triangulated points; the translation
/// is unit-length (direction only).
///
/// Returns `None` if the SVD factors are unavailable.
pub fn decompose_essential(e: &Mat3) -> Option<[RelativePose; 4]> {
    let svd = e.svd(true, true);
    let mut u = svd.u?;
    let mut v_t = svd.v_t?;

    if u.determinant() < 0.0 {
        u.column_mut(2).neg_mut();
    }
    if v_t.determinant() < 0.0 {
        v_t.row_mut(2).neg_mut();
    }

    let w = Mat3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);

    let mut r1 = u * w * v_t;
    let mut r2 = u * w.transpose() * v_t;
    if r1.determinant() < 0.0 {
        r1 = -r1;
    }
    if r2.determinant() < 0.0 {
        r2 = -r2;
    }

    let t = u.column(2).normalize();

    Some([
        RelativePose::new(r1, t),
        RelativePose::new(r1, -t),
        RelativePose::new(r2, t),
        RelativePose::new(r2, -t),
    ])
}
