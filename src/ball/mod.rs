//! Ball tree (M-tree style) engine.
//!
//! Internal nodes of a ball tree hold [`BallEntry`] payloads: a
//! representative center key, the distance to the parent's center, and a
//! covering radius bounding every descendant key's distance to the center.
//! This module provides:
//! - covering-radius and containment arithmetic on entries ([`BallEntry`]);
//! - union-region computation over sibling entries ([`union::union`]);
//! - insertion penalties ([`BallEntry::penalty`]);
//! - eight selectable two-way node-splitting strategies
//!   ([`picksplit::picksplit`]);
//! - triangle-inequality query pruning ([`consistent::consistent`]).

pub mod consistent;
pub mod options;
pub mod picksplit;
pub mod union;

pub use consistent::{BallPredicate, Consistency, consistent};
pub use options::{BallOptions, PickSplitStrategy, UnionStrategy};
pub use picksplit::{BallSplit, picksplit, picksplit_with_rng};
pub use union::union;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// A ball tree entry: a center key plus the region bookkeeping that makes
/// triangle-inequality pruning sound.
///
/// Invariant: every key stored underneath this entry is within
/// `covering_radius` of `center` (float tolerance is absorbed by clamping
/// negative adjusted distances to zero, see [`BallEntry::bounded_distance`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallEntry<K> {
    /// Representative key of the region.
    pub center: K,
    /// Distance from this entry's center to its parent's center.
    pub parent_distance: f64,
    /// Maximum distance from `center` to any key in this entry's subtree.
    pub covering_radius: f64,
}

impl<K> BallEntry<K> {
    /// Create a leaf entry for a freshly inserted key: zero radius, zero
    /// parent distance.
    pub fn new(center: K) -> Self {
        BallEntry {
            center,
            parent_distance: 0.0,
            covering_radius: 0.0,
        }
    }

    /// Create an entry with an explicit covering radius.
    pub fn with_radius(center: K, covering_radius: f64) -> Self {
        BallEntry {
            center,
            parent_distance: 0.0,
            covering_radius,
        }
    }

    /// Exact metric distance between the two entries' centers, ignoring
    /// both covering radii.
    pub fn exact_distance<M: Metric<K>>(&self, metric: &M, other: &BallEntry<K>) -> f64 {
        metric.distance(&self.center, &other.center)
    }

    /// Lower bound on the distance between any two keys drawn from the two
    /// entries' regions: the center distance minus both covering radii,
    /// clamped at zero when the regions overlap.
    pub fn bounded_distance<M: Metric<K>>(&self, metric: &M, other: &BallEntry<K>) -> f64 {
        let adjusted =
            self.exact_distance(metric, other) - self.covering_radius - other.covering_radius;
        adjusted.max(0.0)
    }

    /// Whether the two balls overlap: center distance strictly less than the
    /// sum of the radii.
    pub fn overlaps<M: Metric<K>>(&self, metric: &M, other: &BallEntry<K>) -> bool {
        self.exact_distance(metric, other) - (self.covering_radius + other.covering_radius) < 0.0
    }

    /// Whether this ball strictly contains the other:
    /// `distance + other.radius < self.radius`.
    pub fn contains<M: Metric<K>>(&self, metric: &M, other: &BallEntry<K>) -> bool {
        self.exact_distance(metric, other) + other.covering_radius < self.covering_radius
    }

    /// Whether this ball is strictly contained by the other.
    pub fn contained_by<M: Metric<K>>(&self, metric: &M, other: &BallEntry<K>) -> bool {
        other.contains(metric, self)
    }

    /// Cost of inserting `new` underneath this entry: the covering-radius
    /// growth it would force, zero if `new` already fits inside this ball.
    pub fn penalty<M: Metric<K>>(&self, metric: &M, new: &BallEntry<K>) -> f64 {
        let required = self.exact_distance(metric, new) + new.covering_radius;
        if required < self.covering_radius {
            0.0
        } else {
            required - self.covering_radius
        }
    }
}

impl<K: fmt::Display> fmt::Display for BallEntry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.covering_radius == 0.0 {
            write!(f, "{}", self.center)
        } else {
            write!(
                f,
                "coveringRadius|{} parentDistance|{} data|{}",
                self.covering_radius, self.parent_distance, self.center
            )
        }
    }
}
