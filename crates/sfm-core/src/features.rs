//! Images, keypoints and correspondences.
//!
//! Keypoints are index-addressable within their image's feature set; the
//! index is the sole identity used by correspondences and edges.

use serde::{Deserialize, Serialize};

use crate::math::{Mat3, Pt2, Real};

/// Opaque identifier of an image within one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(pub usize);

/// A detected 2D feature location in pixel coordinates.
///
/// Scale and orientation produced by a detector are not used by the
/// geometry core and are not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: Real,
    pub y: Real,
}

impl Keypoint {
    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    /// Pixel position as a point.
    pub fn position(&self) -> Pt2 {
        Pt2::new(self.x, self.y)
    }
}

/// An ordered, index-addressable set of keypoints for one image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    keypoints: Vec<Keypoint>,
}

impl FeatureSet {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    pub fn get(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }
}

/// An index pair linking a keypoint in image A to one in image B.
///
/// `query` indexes into image A's feature set and `train` into image B's.
/// Indices must be valid for their respective feature sets; duplicates are
/// tolerated and not deduplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correspondence {
    pub query: usize,
    pub train: usize,
}

impl Correspondence {
    pub fn new(query: usize, train: usize) -> Self {
        Self { query, train }
    }
}

/// One input image: identity, intrinsic calibration, and the feature set
/// assigned once by the detection phase.
///
/// The intrinsics matrix is read-only after construction; the geometry
/// core never mutates anything but `features`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    /// 3×3 intrinsic calibration matrix `K`.
    pub k: Mat3,
    /// Detected features; `None` until detection ran (or if it failed).
    pub features: Option<FeatureSet>,
}

impl Image {
    pub fn new(id: ImageId, k: Mat3) -> Self {
        Self {
            id,
            k,
            features: None,
        }
    }

    /// Number of detected keypoints, zero when detection has not run.
    pub fn num_keypoints(&self) -> usize {
        self.features.as_ref().map_or(0, FeatureSet::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_set_is_index_addressable() {
        let fs = FeatureSet::new(vec![Keypoint::new(1.0, 2.0), Keypoint::new(3.0, 4.0)]);
        assert_eq!(fs.len(), 2);
        assert_eq!(fs.get(1).map(|k| k.x), Some(3.0));
        assert!(fs.get(2).is_none());
    }

    #[test]
    fn image_without_detection_has_no_keypoints() {
        let img = Image::new(ImageId(0), Mat3::identity());
        assert_eq!(img.num_keypoints(), 0);
    }
}
