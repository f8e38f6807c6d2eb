//! Two-view linear triangulation (DLT).
//!
//! Builds a 4×4 homogeneous system from the two cameras' 3×4 projection
//! matrices (camera 1 fixed at the identity pose) and solves it via SVD.
//! Degeneracies are rejected by ordered short-circuit checks rather than
//! an aggregate score: each one independently yields "no point".

use sfm_core::{Mat3, Mat34, Mat4, Pt2, Pt3, Real, RelativePose};

/// Smallest admissible largest singular value of the DLT system.
const MIN_SINGULAR_VALUE: Real = 1e-10;
/// Largest admissible condition number of the DLT system.
const MAX_CONDITION_NUMBER: Real = 1e8;
/// Relative floor below which the smallest singular value counts as an
/// exact nullspace rather than a residual.
const EXACT_NULLSPACE_FLOOR: Real = 1e-12;
/// Smallest admissible magnitude of the homogeneous scale coordinate.
const MIN_HOMOGENEOUS_W: Real = 1e-10;
/// Smallest admissible depth of the point in camera 1.
const MIN_DEPTH: Real = 1e-6;
/// Largest admissible squared distance from camera 1's origin.
const MAX_DISTANCE_SQ: Real = 1e8;

/// The 3×4 projection matrix `K · [R | t]`.
pub fn projection_matrix(k: &Mat3, pose: &RelativePose) -> Mat34 {
    k * pose.extrinsics()
}

/// Triangulate a 3D point from two calibrated pixel observations.
///
/// `p1` and `p2` are pixel coordinates in cameras 1 and 2, `k1` and `k2`
/// the intrinsics, and `pose` maps camera 1's frame into camera 2's.
/// The result is expressed in camera 1's frame.
///
/// Returns `None` when the system has no meaningful solution, is
/// ill-conditioned, the point lies at infinity, behind (or at) camera 1,
/// or implausibly far from it.
pub fn triangulate_point(
    p1: &Pt2,
    p2: &Pt2,
    k1: &Mat3,
    k2: &Mat3,
    pose: &RelativePose,
) -> Option<Pt3> {
    let cam1 = projection_matrix(k1, &RelativePose::identity());
    let cam2 = projection_matrix(k2, pose);

    // Two rows per view: u * P_row2 - P_row0 and v * P_row2 - P_row1.
    let mut a = Mat4::zeros();
    for (i, (p, cam)) in [(p1, &cam1), (p2, &cam2)].iter().enumerate() {
        let row0 = cam.row(0);
        let row1 = cam.row(1);
        let row2 = cam.row(2);
        a.row_mut(2 * i).copy_from(&(p.x * row2 - row0));
        a.row_mut(2 * i + 1).copy_from(&(p.y * row2 - row1));
    }

    let svd = a.svd(true, true);
    let s = svd.singular_values;

    if s[0] < MIN_SINGULAR_VALUE {
        return None;
    }
    // Exactly consistent observations drive the smallest singular value to
    // zero; that is a true nullspace, not ill-conditioning. Conditioning is
    // then judged on the solvable part, which still rejects rank-deficient
    // systems such as parallel rays.
    let floor = s[0] * EXACT_NULLSPACE_FLOOR;
    let cond = if s[3] > floor {
        s[0] / s[3]
    } else {
        s[0] / s[2].max(floor)
    };
    if cond > MAX_CONDITION_NUMBER {
        return None;
    }

    let v_t = svd.v_t?;
    let x_h = v_t.row(3);

    let w = x_h[3];
    if w.abs() < MIN_HOMOGENEOUS_W {
        return None;
    }

    let p = Pt3::new(x_h[0] / w, x_h[1] / w, x_h[2] / w);

    // Camera 1 sits at the identity pose, so its depth is the z coordinate.
    if p.z <= MIN_DEPTH {
        return None;
    }
    if p.coords.norm_squared() > MAX_DISTANCE_SQ {
        return None;
    }

    Some(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Rotation3;
    use sfm_core::Vec3;

    fn intrinsics() -> Mat3 {
        Mat3::new(800.0, 0.0, 320.0, 0.0, 800.0, 240.0, 0.0, 0.0, 1.0)
    }

    fn pose() -> RelativePose {
        let r = Rotation3::from_euler_angles(0.01, -0.02, 0.005);
        RelativePose::new(*r.matrix(), Vec3::new(-0.4, 0.02, 0.01))
    }

    fn project(cam: &Mat34, p: &Pt3) -> Pt2 {
        let x = cam * nalgebra::Vector4::new(p.x, p.y, p.z, 1.0);
        Pt2::new(x.x / x.z, x.y / x.z)
    }

    fn observe(pw: &Pt3, pose: &RelativePose) -> (Pt2, Pt2) {
        let k = intrinsics();
        let cam1 = projection_matrix(&k, &RelativePose::identity());
        let cam2 = projection_matrix(&k, pose);
        (project(&cam1, pw), project(&cam2, pw))
    }

    #[test]
    fn recovers_point_on_ray_intersection() {
        let pose = pose();
        let pw = Pt3::new(0.3, -0.2, 5.0);
        let (p1, p2) = observe(&pw, &pose);

        let k = intrinsics();
        let est = triangulate_point(&p1, &p2, &k, &k, &pose).expect("valid geometry");
        assert_relative_eq!(est, pw, epsilon = 1e-6);

        // Positive depth in both frames.
        assert!(est.z > 0.0);
        assert!(pose.transform_point(&est).z > 0.0);
    }

    #[test]
    fn noise_free_observations_are_not_treated_as_ill_conditioned() {
        // Exact projections collapse the smallest singular value of the DLT
        // system to zero. That must read as an exact solution, not as a
        // degenerate configuration.
        let pose = pose();
        let k = intrinsics();
        for pw in [
            Pt3::new(-0.8, 0.5, 3.0),
            Pt3::new(1.2, -0.7, 8.0),
            Pt3::new(0.0, 0.0, 4.5),
        ] {
            let (p1, p2) = observe(&pw, &pose);
            let est = triangulate_point(&p1, &p2, &k, &k, &pose).expect("consistent rays");
            assert_relative_eq!(est, pw, epsilon = 1e-6);
        }
    }

    #[test]
    fn rejects_point_behind_camera() {
        let pose = pose();
        let pw = Pt3::new(0.1, 0.1, -5.0);
        let (p1, p2) = observe(&pw, &pose);

        let k = intrinsics();
        assert!(triangulate_point(&p1, &p2, &k, &k, &pose).is_none());
    }

    #[test]
    fn rejects_implausibly_distant_point() {
        let pose = pose();
        let pw = Pt3::new(0.0, 0.0, 2.0e4);
        let (p1, p2) = observe(&pw, &pose);

        let k = intrinsics();
        assert!(triangulate_point(&p1, &p2, &k, &k, &pose).is_none());
    }

    #[test]
    fn rejects_point_at_infinity() {
        // Identical observations under an identity pose: the rays are
        // parallel and the system is ill-conditioned or w vanishes.
        let k = intrinsics();
        let p = Pt2::new(320.0, 240.0);
        let ident = RelativePose::identity();
        assert!(triangulate_point(&p, &p, &k, &k, &ident).is_none());
    }
}
