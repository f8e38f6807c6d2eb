//! Closed-form two-view solvers for `sfm-rs`.
//!
//! This crate contains:
//! - the normalized eight-point fundamental-matrix estimator,
//! - essential-matrix conversion and decomposition into pose candidates,
//! - squared Sampson error for epipolar inlier tests,
//! - two-view DLT triangulation with explicit degeneracy rejection,
//! - the RANSAC relative-pose estimator with cheirality verification.
//!
//! All solvers are deterministic given fixed inputs (the RANSAC seed lives
//! in [`sfm_core::PoseRansacOptions`]) and report geometric failure as
//! `None`/empty results rather than errors.

pub mod epipolar;
pub mod math;
mod relative_pose;
mod triangulation;

pub use epipolar::{
    decompose_essential, essential_from_fundamental, fundamental_8point, sampson_error_sq,
};
pub use relative_pose::{estimate_relative_pose, verify_cheirality};
pub use triangulation::{projection_matrix, triangulate_point};
