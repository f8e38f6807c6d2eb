//! Phased pairwise orchestration: detect, match, estimate, assemble.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sfm_core::{
    CancelToken, Correspondence, Edge, Image, Mat3, PhaseProgress, PoseGraph, PoseRansacOptions,
    PoseRansacResult, ProgressSink, Pt2, Real,
};
use sfm_linear::estimate_relative_pose;

use crate::interfaces::{FeatureDetector, FeatureMatcher};

/// Errors raised by caller misuse of the pipeline entry points.
///
/// Geometric failure (degenerate pairs, unverified poses) is never an
/// error; it is absorbed as "no relation for this pair".
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The manual-pose path received point lists of different lengths.
    #[error("mismatched point counts: {left} vs {right}")]
    MismatchedPointCounts { left: usize, right: usize },
}

/// Configuration for one pairwise reconstruction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairwiseOptions {
    /// A pair is skipped unless both images have more keypoints than this.
    pub min_keypoints: usize,
    /// A pair is skipped unless the matcher returns more correspondences
    /// than this.
    pub min_matches: usize,
    /// An edge is accepted only with more verified inliers than this.
    pub min_edge_inliers: usize,
    /// Progress sub-range of the detection phase.
    pub detect_range: (Real, Real),
    /// Progress sub-range of the matching/pose phase.
    pub match_range: (Real, Real),
    /// Parameters of the per-pair RANSAC pose search.
    pub ransac: PoseRansacOptions,
}

impl Default for PairwiseOptions {
    fn default() -> Self {
        Self {
            min_keypoints: 50,
            min_matches: 50,
            min_edge_inliers: 20,
            detect_range: (0.1, 0.4),
            match_range: (0.4, 0.7),
            ransac: PoseRansacOptions::default(),
        }
    }
}

/// All unordered index pairs `{i, j}` with `i < j` over `n` images.
pub fn enumerate_pairs(n: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(n.saturating_mul(n.saturating_sub(1)) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((i, j));
        }
    }
    pairs
}

/// Run the full pairwise reconstruction over a set of calibrated images.
///
/// Phase 1 detects features for every image in parallel and assigns them to
/// `images[i].features`; a per-image detector failure is logged and leaves
/// that image without features. Phase 2 matches every unordered pair and
/// runs the RANSAC pose search, also in parallel; both phases join before
/// the next begins. Accepted edges are inserted into the returned graph,
/// first accepted wins per unordered pair.
///
/// Cancellation is cooperative: completed detections and already-accepted
/// edges are retained, unprocessed work is skipped.
pub fn run_pairwise<D, M>(
    images: &mut [Image],
    detector: &D,
    matcher: &M,
    opts: &PairwiseOptions,
    progress: Option<&dyn ProgressSink>,
    cancel: &CancelToken,
) -> PoseGraph
where
    D: FeatureDetector + ?Sized,
    M: FeatureMatcher + ?Sized,
{
    detect_features(images, detector, opts, progress, cancel);
    let images: &[Image] = images;

    let pairs = enumerate_pairs(images.len());
    let phase = PhaseProgress::new(progress, pairs.len(), opts.match_range);

    let candidates: Vec<Option<Edge>> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let edge = match_pair(images, i, j, matcher, opts, cancel);
            phase.tick("estimating pairwise poses");
            edge
        })
        .collect();

    let mut graph = PoseGraph::new(images.iter().map(|img| img.id).collect());
    for edge in candidates.into_iter().flatten() {
        graph.insert_edge(edge);
    }
    graph
}

/// Detection phase: one task per image, joined before returning.
fn detect_features<D>(
    images: &mut [Image],
    detector: &D,
    opts: &PairwiseOptions,
    progress: Option<&dyn ProgressSink>,
    cancel: &CancelToken,
) where
    D: FeatureDetector + ?Sized,
{
    let phase = PhaseProgress::new(progress, images.len(), opts.detect_range);

    images.par_iter_mut().for_each(|image| {
        if !cancel.is_cancelled() {
            match detector.detect(image) {
                Ok(features) => image.features = Some(features),
                Err(err) => {
                    warn!("feature detection failed for image {:?}: {err}", image.id);
                }
            }
        }
        phase.tick("detecting image features");
    });
}

/// Evaluate one unordered pair; `None` means "no relation", never an error.
fn match_pair<M>(
    images: &[Image],
    i: usize,
    j: usize,
    matcher: &M,
    opts: &PairwiseOptions,
    cancel: &CancelToken,
) -> Option<Edge>
where
    M: FeatureMatcher + ?Sized,
{
    if cancel.is_cancelled() {
        return None;
    }

    let (img_a, img_b) = (&images[i], &images[j]);
    let fa = img_a.features.as_ref()?;
    let fb = img_b.features.as_ref()?;
    if fa.len() <= opts.min_keypoints || fb.len() <= opts.min_keypoints {
        return None;
    }

    let matches = matcher.match_features(fa, fb, cancel);
    if cancel.is_cancelled() {
        return None;
    }
    // A matcher is an external component; drop any correspondence whose
    // indices fall outside the feature sets it was handed.
    let matches: Vec<Correspondence> = matches
        .into_iter()
        .filter(|m| {
            let in_range = m.query < fa.len() && m.train < fb.len();
            if !in_range {
                warn!(
                    "pair ({:?}, {:?}): dropping out-of-range match ({}, {})",
                    img_a.id, img_b.id, m.query, m.train
                );
            }
            in_range
        })
        .collect();
    if matches.len() <= opts.min_matches {
        debug!(
            "pair ({:?}, {:?}): only {} matches, skipping",
            img_a.id,
            img_b.id,
            matches.len()
        );
        return None;
    }

    let pts1: Vec<Pt2> = matches
        .iter()
        .map(|m| fa.keypoints()[m.query].position())
        .collect();
    let pts2: Vec<Pt2> = matches
        .iter()
        .map(|m| fb.keypoints()[m.train].position())
        .collect();

    // One base seed, decorrelated per pair, so runs stay reproducible.
    let ransac_opts = PoseRansacOptions {
        seed: opts
            .ransac
            .seed
            .wrapping_add((i * images.len() + j) as u64),
        ..opts.ransac.clone()
    };

    let result = estimate_relative_pose(
        &pts1,
        &pts2,
        &img_a.k,
        &img_b.k,
        &ransac_opts,
        Some(cancel),
    );
    if cancel.is_cancelled() {
        return None;
    }

    let pose = result.pose?;
    if result.inliers.len() <= opts.min_edge_inliers {
        debug!(
            "pair ({:?}, {:?}): {} inliers below edge threshold",
            img_a.id,
            img_b.id,
            result.inliers.len()
        );
        return None;
    }

    debug!(
        "pair ({:?}, {:?}): accepted with {} inliers after {} iterations",
        img_a.id,
        img_b.id,
        result.inliers.len(),
        result.iters
    );

    Some(Edge {
        a: img_a.id,
        b: img_b.id,
        pose,
        inliers: result.inliers.iter().map(|&k| matches[k]).collect(),
    })
}

/// Manual-pose path: estimate a relative pose from raw 2D point pairs.
///
/// Bypasses detection and matching for interactive/manual calibration use;
/// runs the same RANSAC estimator. A result with no pose is the normal
/// "no relation found" outcome.
pub fn estimate_pose_from_points(
    pts1: &[Pt2],
    pts2: &[Pt2],
    k1: &Mat3,
    k2: &Mat3,
    opts: &PoseRansacOptions,
) -> Result<PoseRansacResult, PipelineError> {
    if pts1.len() != pts2.len() {
        return Err(PipelineError::MismatchedPointCounts {
            left: pts1.len(),
            right: pts2.len(),
        });
    }
    Ok(estimate_relative_pose(pts1, pts2, k1, k2, opts, None))
}
