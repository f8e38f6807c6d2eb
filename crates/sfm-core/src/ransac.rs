//! Options and results for RANSAC-based relative-pose estimation.
//!
//! The estimator itself lives in `sfm-linear`; the types are kept here so
//! the pipeline can carry them in its configuration.

use serde::{Deserialize, Serialize};

use crate::math::Real;
use crate::pose::RelativePose;

/// Configuration parameters for the relative-pose RANSAC estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseRansacOptions {
    /// Number of RANSAC iterations.
    pub max_iters: usize,
    /// Inlier threshold on the Sampson distance, in pixels.
    pub thresh_px: Real,
    /// Random-number generator seed (for reproducibility).
    pub seed: u64,
    /// Maximum number of inliers triangulated during cheirality
    /// verification of a candidate pose.
    pub verify_samples: usize,
}

impl Default for PoseRansacOptions {
    fn default() -> Self {
        Self {
            max_iters: 2000,
            thresh_px: 1.5,
            seed: 1_234_567,
            verify_samples: 10,
        }
    }
}

/// Output of a relative-pose RANSAC run.
///
/// A `pose` of `None` with empty `inliers` is the normal "no relation
/// found" outcome, not an error.
#[derive(Debug, Clone)]
pub struct PoseRansacResult {
    /// Best verified pose found, if any.
    pub pose: Option<RelativePose>,
    /// Indices of inlier correspondences supporting the pose.
    pub inliers: Vec<usize>,
    /// Iteration (1-based) at which the best pose was accepted.
    pub iters: usize,
}

impl Default for PoseRansacResult {
    fn default() -> Self {
        Self {
            pose: None,
            inliers: Vec::new(),
            iters: 0,
        }
    }
}

impl PoseRansacResult {
    /// Whether a verified pose was found.
    pub fn found(&self) -> bool {
        self.pose.is_some()
    }
}
