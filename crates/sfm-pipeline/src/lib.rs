//! Concurrent pairwise reconstruction orchestration.
//!
//! Given N calibrated images, this crate detects features for each image,
//! matches every unordered pair, estimates a verified relative pose per
//! pair, and assembles the accepted edges into a [`sfm_core::PoseGraph`].
//!
//! The feature detector and matcher are external collaborators supplied
//! through the [`FeatureDetector`] and [`FeatureMatcher`] traits. Phases
//! run as unordered task batches on rayon with a join barrier in between;
//! progress is reported into per-phase sub-ranges of `[0, 1]` and
//! cancellation is cooperative throughout.
//!
//! ```no_run
//! use sfm_core::{CancelToken, Image, ImageId, Mat3};
//! use sfm_pipeline::{run_pairwise, PairwiseOptions};
//! # use sfm_core::FeatureSet;
//! # struct MyDetector;
//! # impl sfm_pipeline::FeatureDetector for MyDetector {
//! #     fn detect(&self, _: &Image) -> anyhow::Result<FeatureSet> { unimplemented!() }
//! # }
//! # struct MyMatcher;
//! # impl sfm_pipeline::FeatureMatcher for MyMatcher {
//! #     fn match_features(&self, _: &FeatureSet, _: &FeatureSet, _: &CancelToken) -> Vec<sfm_core::Correspondence> { unimplemented!() }
//! # }
//!
//! let k = Mat3::new(800.0, 0.0, 320.0, 0.0, 800.0, 240.0, 0.0, 0.0, 1.0);
//! let mut images: Vec<Image> = (0..4).map(|i| Image::new(ImageId(i), k)).collect();
//!
//! let cancel = CancelToken::new();
//! let graph = run_pairwise(
//!     &mut images,
//!     &MyDetector,
//!     &MyMatcher,
//!     &PairwiseOptions::default(),
//!     None,
//!     &cancel,
//! );
//! println!("accepted {} pairwise poses", graph.num_edges());
//! ```

mod interfaces;
mod pairwise;

pub use interfaces::{FeatureDetector, FeatureMatcher};
pub use pairwise::{
    enumerate_pairs, estimate_pose_from_points, run_pairwise, PairwiseOptions, PipelineError,
};
