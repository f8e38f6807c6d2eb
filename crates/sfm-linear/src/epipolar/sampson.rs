//! Sampson error for epipolar inlier tests.

use sfm_core::{to_homogeneous, Mat3, Pt2, Real};

/// Squared Sampson distance of a correspondence under a fundamental matrix.
///
/// First-order approximation of the geometric distance to the epipolar
/// line, in pixels squared when `f` relates pixel coordinates. A vanishing
/// denominator (both epipolar line gradients zero) yields `Real::MAX` so
/// the correspondence can never pass an inlier threshold.
pub fn sampson_error_sq(f: &Mat3, p1: &Pt2, p2: &Pt2) -> Real {
    let x1 = to_homogeneous(p1);
    let x2 = to_homogeneous(p2);

    let fx1 = f * x1;
    let ftx2 = f.transpose() * x2;

    let denom = fx1.x * fx1.x + fx1.y * fx1.y + ftx2.x * ftx2.x + ftx2.y * ftx2.y;
    if denom < 1e-12 {
        return Real::MAX;
    }

    let num = x2.dot(&fx1);
    num * num / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Rotation3;
    use sfm_core::{skew_symmetric, Vec3};

    fn synthetic_f() -> (Mat3, Mat3, Rotation3<Real>, Vec3) {
        let k = Mat3::new(800.0, 0.0, 320.0, 0.0, 800.0, 240.0, 0.0, 0.0, 1.0);
        let r = Rotation3::from_euler_angles(0.05, -0.02, 0.1);
        let t = Vec3::new(0.4, 0.0, 0.05);
        let k_inv = k.try_inverse().unwrap();
        let e = skew_symmetric(&t) * r.matrix();
        let f = k_inv.transpose() * e * k_inv;
        (f, k, r, t)
    }

    #[test]
    fn exact_correspondence_has_zero_error() {
        let (f, k, r, t) = synthetic_f();
        let pw = Vec3::new(0.2, -0.1, 5.0);

        let p1h = k * pw;
        let p2h = k * (r.matrix() * pw + t);
        let p1 = Pt2::new(p1h.x / p1h.z, p1h.y / p1h.z);
        let p2 = Pt2::new(p2h.x / p2h.z, p2h.y / p2h.z);

        assert!(sampson_error_sq(&f, &p1, &p2) < 1e-14);
    }

    #[test]
    fn displaced_correspondence_has_positive_error() {
        let (f, k, r, t) = synthetic_f();
        let pw = Vec3::new(0.2, -0.1, 5.0);

        let p1h = k * pw;
        let p2h = k * (r.matrix() * pw + t);
        let p1 = Pt2::new(p1h.x / p1h.z, p1h.y / p1h.z);
        let p2 = Pt2::new(p2h.x / p2h.z + 10.0, p2h.y / p2h.z + 10.0);

        assert!(sampson_error_sq(&f, &p1, &p2) > 1.0);
    }

    #[test]
    fn vanishing_denominator_is_not_an_inlier() {
        let f = Mat3::zeros();
        let p = Pt2::new(1.0, 1.0);
        assert_eq!(sampson_error_sq(&f, &p, &p), Real::MAX);
    }
}
