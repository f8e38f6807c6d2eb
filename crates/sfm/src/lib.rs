//! High-level entry crate for the `sfm-rs` toolbox.
//!
//! Re-exports the three layers of the workspace:
//!
//! - [`core`] — math aliases, the image/feature/pose data model, the pose
//!   graph, progress and cancellation primitives;
//! - [`linear`] — closed-form two-view solvers (eight-point fundamental,
//!   essential decomposition, DLT triangulation) and the RANSAC
//!   relative-pose estimator;
//! - [`pipeline`] — concurrent pairwise orchestration over a set of
//!   calibrated images.
//!
//! Typical use drives the pipeline with an external detector and matcher:
//!
//! ```no_run
//! use sfm::core::{CancelToken, Image, ImageId, Mat3};
//! use sfm::pipeline::{run_pairwise, PairwiseOptions};
//! # struct Detector;
//! # impl sfm::pipeline::FeatureDetector for Detector {
//! #     fn detect(&self, _: &Image) -> anyhow::Result<sfm::core::FeatureSet> { unimplemented!() }
//! # }
//! # struct Matcher;
//! # impl sfm::pipeline::FeatureMatcher for Matcher {
//! #     fn match_features(
//! #         &self,
//! #         _: &sfm::core::FeatureSet,
//! #         _: &sfm::core::FeatureSet,
//! #         _: &CancelToken,
//! #     ) -> Vec<sfm::core::Correspondence> { unimplemented!() }
//! # }
//!
//! let k = Mat3::new(800.0, 0.0, 320.0, 0.0, 800.0, 240.0, 0.0, 0.0, 1.0);
//! let mut images: Vec<Image> = (0..10).map(|i| Image::new(ImageId(i), k)).collect();
//!
//! let cancel = CancelToken::new();
//! let progress = |fraction: f64, status: &str| eprintln!("[{fraction:.2}] {status}");
//! let graph = run_pairwise(
//!     &mut images,
//!     &Detector,
//!     &Matcher,
//!     &PairwiseOptions::default(),
//!     Some(&progress),
//!     &cancel,
//! );
//!
//! for edge in graph.edges() {
//!     println!("{:?} -> {:?}: {} inliers", edge.a, edge.b, edge.inliers.len());
//! }
//! ```

pub use sfm_core as core;
pub use sfm_linear as linear;
pub use sfm_pipeline as pipeline;
