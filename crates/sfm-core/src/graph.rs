//! Reconstruction graph of verified pairwise poses.
//!
//! Nodes are the input images; edges carry a verified relative pose and the
//! inlier correspondences that support it. The graph is built incrementally
//! and never removes edges; it is not required to be connected.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::features::{Correspondence, ImageId};
use crate::pose::RelativePose;

/// An accepted relation between two images.
///
/// Created only after RANSAC and cheirality verification succeed;
/// immutable thereafter. The pose maps image `a`'s camera frame into
/// image `b`'s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub a: ImageId,
    pub b: ImageId,
    pub pose: RelativePose,
    /// Inlier subset of the correspondences that produced the pose.
    pub inliers: Vec<Correspondence>,
}

/// Incrementally built graph of images and verified pairwise poses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseGraph {
    nodes: Vec<ImageId>,
    edges: Vec<Edge>,
    pair_keys: HashSet<(ImageId, ImageId)>,
}

impl PoseGraph {
    pub fn new(nodes: Vec<ImageId>) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
            pair_keys: HashSet::new(),
        }
    }

    pub fn nodes(&self) -> &[ImageId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Whether an edge exists for the unordered pair `{a, b}`.
    pub fn contains_pair(&self, a: ImageId, b: ImageId) -> bool {
        self.pair_keys.contains(&unordered_key(a, b))
    }

    /// Insert an edge unless its unordered image pair is already present.
    ///
    /// Returns `true` if the edge was inserted. The first accepted edge for
    /// a pair wins; later submissions for the same pair (in either order)
    /// are ignored.
    pub fn insert_edge(&mut self, edge: Edge) -> bool {
        if !self.pair_keys.insert(unordered_key(edge.a, edge.b)) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Edge for the unordered pair `{a, b}`, if one was accepted.
    pub fn edge_between(&self, a: ImageId, b: ImageId) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| unordered_key(e.a, e.b) == unordered_key(a, b))
    }
}

fn unordered_key(a: ImageId, b: ImageId) -> (ImageId, ImageId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
