//! Insert routing for the partition tree.

use crate::metric::Metric;

use super::PartitionNode;

/// Where an inserted key should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooseResult {
    /// Descend into the given child band.
    Match {
        /// Index of the chosen band.
        node: usize,
    },
    /// All children are equivalent; the host may pick any of them.
    AnyNode,
}

/// Route a new key to a child band of a partition node.
///
/// Computes the key's distance to the vantage point and selects the band
/// whose range holds it: the first label (after the leading zero) strictly
/// greater than the distance closes the band, and a distance beyond every
/// label falls into the last, unbounded band. A node in the "all children
/// equivalent" state defers the choice to the host.
pub fn choose<K, M>(
    metric: &M,
    node: &PartitionNode<K>,
    key: &K,
    all_the_same: bool,
) -> ChooseResult
where
    M: Metric<K>,
{
    if all_the_same {
        return ChooseResult::AnyNode;
    }

    let distance = metric.distance(&node.prefix, key);

    let mut chosen = node.node_labels.len() - 1;
    for (i, &label) in node.node_labels.iter().enumerate().skip(1) {
        if distance < label {
            chosen = i - 1;
            break;
        }
    }

    ChooseResult::Match { node: chosen }
}
