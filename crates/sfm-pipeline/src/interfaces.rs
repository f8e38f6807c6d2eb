//! Seams to the external feature detector and matcher.
//!
//! Both are treated as black boxes: the detector produces an ordered
//! keypoint set per image, the matcher an ordered list of index pairs
//! between two feature sets. Implementations must be `Sync` because the
//! orchestrator invokes them from parallel tasks.

use sfm_core::{CancelToken, Correspondence, FeatureSet, Image};

/// Per-image keypoint detection.
pub trait FeatureDetector: Sync {
    /// Detect features for one image.
    ///
    /// A failure here is recovered locally by the orchestrator: the image
    /// proceeds without a feature set and other images are unaffected.
    fn detect(&self, image: &Image) -> anyhow::Result<FeatureSet>;
}

/// Per-pair descriptor matching.
pub trait FeatureMatcher: Sync {
    /// Match two feature sets into index-pair correspondences.
    ///
    /// `query` indices refer to `a`, `train` indices to `b`; every index
    /// must be valid for its feature set. The matcher should observe the
    /// cancellation token and may return a partial (or empty) list when
    /// cancelled; the orchestrator discards the pair in that case.
    fn match_features(
        &self,
        a: &FeatureSet,
        b: &FeatureSet,
        cancel: &CancelToken,
    ) -> Vec<Correspondence>;
}
