//! RANSAC relative-pose estimation with cheirality verification.
//!
//! Runs a fixed iteration budget. Each iteration samples eight
//! correspondences, fits a fundamental matrix, converts it to an essential
//! matrix and scores the *shared* Sampson inlier set of `F` against the
//! full correspondence list; the four decomposed pose candidates therefore
//! carry identical counts and are disambiguated purely by cheirality, in
//! enumeration order. A candidate replaces the running best only after
//! verification succeeds.
//!
//! Finding nothing within the budget is a normal outcome, not an error.

use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, SeedableRng};
use sfm_core::{CancelToken, Mat3, PoseRansacOptions, PoseRansacResult, Pt2, RelativePose};

use crate::epipolar::{decompose_essential, essential_from_fundamental, fundamental_8point, sampson_error_sq};
use crate::triangulation::triangulate_point;

const SAMPLE_SIZE: usize = 8;

/// Robustly estimate the relative pose of camera 2 with respect to camera 1.
///
/// `pts1` and `pts2` are corresponding pixel points in images A and B with
/// intrinsics `k1` and `k2`. The returned inlier indices refer to the input
/// slices. When a cancellation token is supplied it is checked between
/// iterations; an aborted run returns the best result found so far.
///
/// This function never panics on degenerate input: iterations whose sample
/// yields no fundamental matrix, no decomposition, or no verified candidate
/// simply contribute nothing.
pub fn estimate_relative_pose(
    pts1: &[Pt2],
    pts2: &[Pt2],
    k1: &Mat3,
    k2: &Mat3,
    opts: &PoseRansacOptions,
    cancel: Option<&CancelToken>,
) -> PoseRansacResult {
    let mut best = PoseRansacResult::default();

    let n = pts1.len();
    if n < SAMPLE_SIZE || pts2.len() != n {
        return best;
    }

    let all_indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let thresh_sq = opts.thresh_px * opts.thresh_px;

    let mut sample1 = vec![Pt2::origin(); SAMPLE_SIZE];
    let mut sample2 = vec![Pt2::origin(); SAMPLE_SIZE];

    for iter in 0..opts.max_iters {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            break;
        }

        // Draw 8 distinct correspondences.
        all_indices
            .as_slice()
            .choose_multiple(&mut rng, SAMPLE_SIZE)
            .enumerate()
            .for_each(|(k, &idx)| {
                sample1[k] = pts1[idx];
                sample2[k] = pts2[idx];
            });

        let Some(f) = fundamental_8point(&sample1, &sample2) else {
            continue;
        };

        let e = essential_from_fundamental(&f, k1, k2);
        let Some(candidates) = decompose_essential(&e) else {
            continue;
        };

        // Shared inlier set of the sampled F over the full correspondence
        // list; not recomputed per pose candidate.
        let inliers: Vec<usize> = (0..n)
            .filter(|&i| sampson_error_sq(&f, &pts1[i], &pts2[i]) <= thresh_sq)
            .collect();

        if inliers.len() <= best.inliers.len() {
            continue;
        }

        for pose in candidates {
            if verify_cheirality(&pose, pts1, pts2, k1, k2, &inliers, opts.verify_samples) {
                best.pose = Some(pose);
                best.inliers.clone_from(&inliers);
                best.iters = iter + 1;
                break;
            }
        }
    }

    best
}

/// Geometric verification of a candidate pose against its inliers.
///
/// Triangulates up to the first `max_samples` inlier correspondences and
/// counts those with positive depth in both camera frames (camera 1
/// directly, camera 2 after the pose transform). Passes iff strictly more
/// than half of the sampled points satisfy this; an empty inlier set fails
/// immediately.
pub fn verify_cheirality(
    pose: &RelativePose,
    pts1: &[Pt2],
    pts2: &[Pt2],
    k1: &Mat3,
    k2: &Mat3,
    inliers: &[usize],
    max_samples: usize,
) -> bool {
    if inliers.is_empty() || max_samples == 0 {
        return false;
    }

    let sampled = inliers.len().min(max_samples);
    let mut in_front = 0usize;

    for &i in inliers.iter().take(sampled) {
        let Some(p) = triangulate_point(&pts1[i], &pts2[i], k1, k2, pose) else {
            continue;
        };
        if p.z > 0.0 && pose.transform_point(&p).z > 0.0 {
            in_front += 1;
        }
    }

    2 * in_front > sampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Rotation3;
    use sfm_core::{Pt3, Vec3};

    fn intrinsics() -> Mat3 {
        Mat3::new(800.0, 0.0, 320.0, 0.0, 800.0, 240.0, 0.0, 0.0, 1.0)
    }

    fn scene_pose() -> RelativePose {
        let r = Rotation3::from_euler_angles(0.03, -0.05, 0.01);
        RelativePose::new(*r.matrix(), Vec3::new(-0.5, 0.05, 0.02))
    }

    fn observe(pw: &Pt3, pose: &RelativePose, k: &Mat3) -> (Pt2, Pt2) {
        let p1h = k * pw.coords;
        let p2h = k * pose.transform_point(pw).coords;
        (
            Pt2::new(p1h.x / p1h.z, p1h.y / p1h.z),
            Pt2::new(p2h.x / p2h.z, p2h.y / p2h.z),
        )
    }

    fn scene_points(count: usize) -> Vec<Pt3> {
        (0..count)
            .map(|i| {
                Pt3::new(
                    -1.5 + 0.31 * ((i % 11) as f64),
                    -1.0 + 0.27 * ((i % 8) as f64),
                    4.0 + 0.45 * ((i % 7) as f64),
                )
            })
            .collect()
    }

    #[test]
    fn too_few_correspondences_yield_nothing() {
        let k = intrinsics();
        let pts: Vec<Pt2> = (0..7).map(|i| Pt2::new(i as f64, i as f64)).collect();
        let res = estimate_relative_pose(
            &pts,
            &pts,
            &k,
            &k,
            &PoseRansacOptions::default(),
            None,
        );
        assert!(!res.found());
        assert!(res.inliers.is_empty());
    }

    #[test]
    fn cancelled_token_returns_immediately() {
        let k = intrinsics();
        let pose = scene_pose();
        let (pts1, pts2): (Vec<Pt2>, Vec<Pt2>) = scene_points(60)
            .iter()
            .map(|pw| observe(pw, &pose, &k))
            .unzip();

        let token = CancelToken::new();
        token.cancel();
        let res = estimate_relative_pose(
            &pts1,
            &pts2,
            &k,
            &k,
            &PoseRansacOptions::default(),
            Some(&token),
        );
        assert!(!res.found());
    }

    #[test]
    fn cheirality_rejects_reversed_translation() {
        let k = intrinsics();
        let pose = scene_pose();
        let points = scene_points(20);
        let (pts1, pts2): (Vec<Pt2>, Vec<Pt2>) =
            points.iter().map(|pw| observe(pw, &pose, &k)).unzip();
        let inliers: Vec<usize> = (0..pts1.len()).collect();

        assert!(verify_cheirality(&pose, &pts1, &pts2, &k, &k, &inliers, 10));

        let reversed = RelativePose::new(pose.rotation, -pose.translation);
        assert!(!verify_cheirality(
            &reversed, &pts1, &pts2, &k, &k, &inliers, 10
        ));
    }

    #[test]
    fn recovers_pose_from_clean_correspondences() {
        let k = intrinsics();
        let pose = scene_pose();
        let (pts1, pts2): (Vec<Pt2>, Vec<Pt2>) = scene_points(80)
            .iter()
            .map(|pw| observe(pw, &pose, &k))
            .unzip();

        let opts = PoseRansacOptions {
            max_iters: 200,
            ..Default::default()
        };
        let res = estimate_relative_pose(&pts1, &pts2, &k, &k, &opts, None);

        assert!(res.found());
        assert_eq!(res.inliers.len(), pts1.len());

        let est = res.pose.unwrap();
        let r_diff = est.rotation.transpose() * pose.rotation;
        let ang = ((r_diff.trace() - 1.0) * 0.5).clamp(-1.0, 1.0).acos();
        assert!(ang < 1e-4, "rotation error too large: {ang}");
    }
}
