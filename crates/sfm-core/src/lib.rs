//! Core types for the `sfm-rs` reconstruction toolbox.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Vec3`, `Pt2`, `Mat3`, ...),
//! - the pairwise-reconstruction data model (images, keypoints, feature
//!   sets, correspondences, relative poses, edges, pose graph),
//! - options and result types for the robust relative-pose estimator,
//! - cooperative cancellation and phase-scoped progress reporting.
//!
//! The solvers themselves live in `sfm-linear`; the concurrent
//! orchestration lives in `sfm-pipeline`.

/// Linear algebra type aliases and helpers.
pub mod math;
/// Images, keypoints, feature sets and correspondences.
pub mod features;
/// Relative camera pose between two views.
pub mod pose;
/// Verified pairwise-pose graph.
pub mod graph;
/// Options and results for RANSAC relative-pose estimation.
pub mod ransac;
/// Cooperative cancellation token.
pub mod cancel;
/// Progress reporting over phase sub-ranges.
pub mod progress;

pub use cancel::*;
pub use features::*;
pub use graph::*;
pub use math::*;
pub use pose::*;
pub use progress::*;
pub use ransac::*;
