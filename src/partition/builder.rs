//! Vantage-point selection and threshold computation.
//!
//! Splitting an overflowing partition node means choosing a vantage point
//! among the members and cutting the sorted distance sequence into bands.
//! Up to ten candidates (the first ten members, in original order) are
//! scored; the candidate producing the most distinct, most evenly spaced
//! distances wins.

use log::debug;

use crate::error::{Result, VantageError};
use crate::metric::Metric;

use super::PartitionNode;

/// Result of a partition split.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSplit<K> {
    /// The winning vantage point and the band thresholds.
    pub node: PartitionNode<K>,
    /// Band index assigned to each input member, parallel to the input.
    pub tuple_nodes: Vec<usize>,
}

/// A member's distance to the candidate vantage point, tagged with its
/// original position.
#[derive(Debug, Clone, Copy)]
struct DistanceItem {
    index: usize,
    distance: f64,
}

/// Number of vantage-point candidates tried per split.
const CANDIDATE_LIMIT: usize = 10;

/// Denominator of the optimal band size: bands aim at `ceil(n / 8)` members.
const BAND_DIVISOR: usize = 8;

/// Score one candidate vantage point.
///
/// Returns the members sorted by distance to the candidate together with two
/// selection scores: `val1` is the sum of squared tie-run lengths over the
/// sorted distances (fewer, longer ties score worse), and `val2` is the
/// coefficient of variation of the consecutive distance gaps, using the
/// legacy `n - 2` standard-deviation divisor.
///
/// Degenerate inputs are given a deterministic convention: with fewer than
/// three members, or when the mean gap is zero, `val2` is `0.0`.
fn split_params<K, M>(
    metric: &M,
    members: &[K],
    split_index: usize,
) -> (Vec<DistanceItem>, f64, f64)
where
    M: Metric<K>,
{
    let n = members.len();
    let split_key = &members[split_index];

    let mut items: Vec<DistanceItem> = members
        .iter()
        .enumerate()
        .map(|(index, key)| DistanceItem {
            index,
            distance: if index == split_index {
                0.0
            } else {
                metric.distance(split_key, key)
            },
        })
        .collect();

    items.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    let mut val1 = 0.0f64;
    let mut same_count = 1usize;
    let mut prev_distance = items[0].distance;
    let mut avg = 0.0f64;

    for item in items.iter().skip(1) {
        let distance = item.distance;
        if distance != prev_distance {
            val1 += (same_count * same_count) as f64;
            same_count = 1;
        } else {
            same_count += 1;
        }

        avg += distance - prev_distance;
        prev_distance = distance;
    }
    val1 += (same_count * same_count) as f64;

    if n < 3 {
        return (items, val1, 0.0);
    }

    avg /= (n - 1) as f64;
    if avg == 0.0 {
        // All distances equal: the gap statistics carry no signal.
        return (items, val1, 0.0);
    }

    let mut std_dev = 0.0f64;
    let mut prev_distance = items[0].distance;
    for item in items.iter().skip(1) {
        let delta = item.distance - prev_distance;
        std_dev += (delta - avg) * (delta - avg);
        prev_distance = item.distance;
    }
    std_dev = (std_dev / (n - 2) as f64).sqrt();

    (items, val1, std_dev / avg)
}

/// Split an overflowing node's members into distance bands around the best
/// vantage point.
///
/// Tries the first `min(10, n)` members as candidates and keeps the one with
/// the strictly lowest `val1`, breaking ties by strictly lower `val2`. Band
/// boundaries then follow the winning candidate's sorted distance order: a
/// band closes once it would exceed the optimal size `ceil(n / 8)`, and a
/// boundary-tied run is kept or pushed to the next band by whichever choice
/// deviates less from the optimal size.
pub fn picksplit<K, M>(metric: &M, members: &[K]) -> Result<PartitionSplit<K>>
where
    K: Clone,
    M: Metric<K>,
{
    let n = members.len();
    if n == 0 {
        return Err(VantageError::invalid_operation(
            "cannot split an empty member set",
        ));
    }

    let optimal_node_size = n.div_ceil(BAND_DIVISOR);
    debug!("partition picksplit across {n} members, optimal band size {optimal_node_size}");

    let mut best_items: Vec<DistanceItem> = Vec::new();
    let mut best_index = 0;
    let mut best_val1 = 0.0;
    let mut best_val2 = 0.0;
    let mut first = true;

    for i in 0..CANDIDATE_LIMIT.min(n) {
        let (items, val1, val2) = split_params(metric, members, i);

        if first || val1 < best_val1 || (val1 == best_val1 && val2 < best_val2) {
            first = false;
            best_items = items;
            best_index = i;
            best_val1 = val1;
            best_val2 = val2;
        }
    }

    debug!(
        "partition picksplit chose vantage point {best_index} (val1 {best_val1}, val2 {best_val2})"
    );

    let mut tuple_nodes = vec![0usize; n];
    let mut node_labels = vec![0.0f64];

    let mut node_start_index = 0usize;
    let mut node_end_index = 0usize;
    let mut node_end_distance = 0.0f64;

    // The best candidate is a member, so the sorted sequence starts at 0 and
    // every band boundary falls on a distance increase.
    let mut prev = 0.0f64;
    for i in 0..n {
        let distance = best_items[i].distance;
        if distance > prev {
            if i - node_start_index < optimal_node_size {
                node_end_index = i;
                node_end_distance = distance;
            } else {
                // Decide whether the tied run before `i` stays in the
                // current band: compare each choice's deviation from the
                // optimal size. The asymmetric right-hand side reproduces
                // the legacy comparison.
                let current_deviation =
                    (node_end_index as i64 - node_start_index as i64 - optimal_node_size as i64)
                        .abs();
                let extended_deviation =
                    (i as i64 - node_start_index as i64).abs() - optimal_node_size as i64;
                // A still-empty band must absorb the tied run regardless of
                // the deviation, so every band is non-empty and the labels
                // stay strictly increasing.
                if current_deviation > extended_deviation
                    || node_end_index == node_start_index
                {
                    node_end_index = i;
                    node_end_distance = distance;
                }

                for item in &best_items[node_start_index..node_end_index] {
                    tuple_nodes[item.index] = node_labels.len() - 1;
                }
                node_start_index = node_end_index;
                node_labels.push(node_end_distance);
            }
        }
        // Equal distances never open a band; `prev` only moves forward.
        prev = distance;
    }
    for item in &best_items[node_start_index..n] {
        tuple_nodes[item.index] = node_labels.len() - 1;
    }

    Ok(PartitionSplit {
        node: PartitionNode {
            prefix: members[best_index].clone(),
            node_labels,
        },
        tuple_nodes,
    })
}
