//! Epipolar geometry: fundamental and essential matrices.
//!
//! - Fundamental matrix `F` relates **pixel coordinates**: inlier
//!   correspondences satisfy `p2ᵀ · F · p1 ≈ 0` with `p1` from image A and
//!   `p2` from image B, in homogeneous form.
//! - Essential matrix `E = K2ᵀ · F · K1` encodes the relative pose up to
//!   scale and sign and decomposes into four `(R, t)` candidates.

mod decomposition;
mod fundamental;
mod sampson;

pub use decomposition::{decompose_essential, essential_from_fundamental};
pub use fundamental::fundamental_8point;
pub use sampson::sampson_error_sq;
