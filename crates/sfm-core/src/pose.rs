//! Relative camera pose between two views.

use serde::{Deserialize, Serialize};

use crate::math::{Mat3, Mat34, Pt3, Vec3};

/// Rigid transform mapping camera A's frame into camera B's frame.
///
/// The translation is defined only up to an unknown scale and sign, as
/// recovered from an essential matrix. The rotation is orthonormal with
/// determinant +1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativePose {
    pub rotation: Mat3,
    pub translation: Vec3,
}

impl RelativePose {
    pub fn new(rotation: Mat3, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self {
            rotation: Mat3::identity(),
            translation: Vec3::zeros(),
        }
    }

    /// Map a point expressed in camera A's frame into camera B's frame.
    pub fn transform_point(&self, p: &Pt3) -> Pt3 {
        Pt3::from(self.rotation * p.coords + self.translation)
    }

    /// The 3×4 extrinsics matrix `[R | t]`.
    pub fn extrinsics(&self) -> Mat34 {
        let mut rt = Mat34::zeros();
        rt.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation);
        rt.set_column(3, &self.translation);
        rt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Rotation3;

    #[test]
    fn transform_point_applies_rotation_then_translation() {
        let r = Rotation3::from_euler_angles(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        let pose = RelativePose::new(*r.matrix(), Vec3::new(1.0, 0.0, 0.0));
        let p = pose.transform_point(&Pt3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Pt3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn extrinsics_layout() {
        let pose = RelativePose::new(Mat3::identity(), Vec3::new(0.1, 0.2, 0.3));
        let rt = pose.extrinsics();
        assert_relative_eq!(rt[(0, 0)], 1.0);
        assert_relative_eq!(rt[(2, 3)], 0.3);
    }
}
