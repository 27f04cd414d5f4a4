//! Query consistency evaluation for the partition tree.
//!
//! Inner nodes are pruned with the triangle inequality against the band
//! thresholds; leaves are checked exactly, so no recheck flag is needed at
//! either level. The partition topology supports a range predicate and
//! equality; conjunctions of several predicates are rejected outright
//! rather than mis-evaluated as a disjunction.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VantageError};
use crate::metric::Metric;

use super::PartitionNode;

/// A range query region: every key within `radius` of `center` matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeQuery<K> {
    /// Center of the query region.
    pub center: K,
    /// Match radius, inclusive.
    pub radius: f64,
}

impl<K> RangeQuery<K> {
    /// Create a range query region.
    pub fn new(center: K, radius: f64) -> Self {
        RangeQuery { center, radius }
    }

    /// Exact containment check for a single key.
    pub fn matches<M: Metric<K>>(&self, metric: &M, key: &K) -> bool {
        metric.distance(key, &self.center) <= self.radius
    }
}

/// The predicates a partition tree query can evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PartitionPredicate<K> {
    /// All keys within a radius of a center key.
    Range(RangeQuery<K>),
    /// Exact equality (distance zero).
    Equals(K),
}

/// Reject predicate conjunctions: evaluating them against a single band
/// pruning pass would silently turn the conjunction into a disjunction.
fn single_predicate<K>(predicates: &[PartitionPredicate<K>]) -> Result<&PartitionPredicate<K>> {
    match predicates {
        [predicate] => Ok(predicate),
        [] => Err(VantageError::query("no query predicate supplied")),
        _ => Err(VantageError::query(
            "this index cannot support multiple conditionals",
        )),
    }
}

/// Decide which child bands of an inner node a query must descend into.
///
/// For a query at distance `d` from the vantage point with radius `r`, band
/// `i` is excluded when the query sphere lies entirely below the band
/// (`d + r < lower`) or entirely beyond it (`upper + r <= d`). An equality
/// predicate is evaluated as a zero-radius range. A node in the "all
/// children equivalent" state short-circuits to visiting every child.
pub fn inner_consistent<K, M>(
    metric: &M,
    node: &PartitionNode<K>,
    all_the_same: bool,
    predicates: &[PartitionPredicate<K>],
) -> Result<Vec<usize>>
where
    M: Metric<K>,
{
    let predicate = single_predicate(predicates)?;

    let (query_key, search_radius) = match predicate {
        PartitionPredicate::Range(range) => (&range.center, range.radius),
        PartitionPredicate::Equals(key) => (key, 0.0),
    };

    if all_the_same {
        return Ok((0..node.band_count()).collect());
    }

    let distance = metric.distance(&node.prefix, query_key);

    let mut nodes = Vec::with_capacity(node.band_count());
    for i in 0..node.band_count() {
        let min_distance = node.node_labels[i];
        let mut consistent = true;

        if distance + search_radius < min_distance {
            consistent = false;
        } else if i + 1 < node.band_count() {
            let max_distance = node.node_labels[i + 1];
            if max_distance + search_radius <= distance {
                consistent = false;
            }
        }

        if consistent {
            nodes.push(i);
        }
    }

    Ok(nodes)
}

/// Decide whether a stored leaf key satisfies the query exactly.
pub fn leaf_consistent<K, M>(
    metric: &M,
    leaf: &K,
    predicates: &[PartitionPredicate<K>],
) -> Result<bool>
where
    M: Metric<K>,
{
    let predicate = single_predicate(predicates)?;

    let matches = match predicate {
        PartitionPredicate::Range(range) => range.matches(metric, leaf),
        PartitionPredicate::Equals(key) => metric.distance(leaf, key) == 0.0,
    };

    Ok(matches)
}
