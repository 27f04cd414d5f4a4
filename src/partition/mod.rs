//! Partition tree (vantage-point style) engine.
//!
//! An internal node holds one vantage point and an ascending sequence of
//! distance thresholds; each child corresponds to a band of distances from
//! the vantage point. No per-child covering radius exists — routing and
//! pruning rely entirely on the threshold sequence being non-decreasing and
//! the bands partitioning the non-negative line.
//!
//! - [`builder::picksplit`] chooses a vantage point by trial scoring and
//!   computes the thresholds;
//! - [`route::choose`] routes an inserted key to its band;
//! - [`consistent`] prunes bands during queries and checks leaves exactly.

pub mod builder;
pub mod consistent;
pub mod route;

pub use builder::{PartitionSplit, picksplit};
pub use consistent::{PartitionPredicate, RangeQuery, inner_consistent, leaf_consistent};
pub use route::{ChooseResult, choose};

use serde::{Deserialize, Serialize};

/// The payload of a partition tree inner node.
///
/// `node_labels[i]` is the inclusive lower distance bound of band `i`; band
/// `i` ends where band `i + 1` begins, and the last band is unbounded above.
/// The labels are non-decreasing and `node_labels.len()` equals the child
/// count. The first label is always `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionNode<K> {
    /// The vantage point all members are measured against.
    pub prefix: K,
    /// Ascending band lower bounds, one per child.
    pub node_labels: Vec<f64>,
}

impl<K> PartitionNode<K> {
    /// Number of child bands.
    pub fn band_count(&self) -> usize {
        self.node_labels.len()
    }
}
