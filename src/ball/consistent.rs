//! Query consistency evaluation for the ball tree.
//!
//! A query descends the tree by asking, per stored entry, whether the
//! subtree under it can contain a match. Inner entries are bounding regions,
//! so most inner matches are necessary-but-not-sufficient and carry a
//! recheck flag; leaf entries are exact values and are checked exactly.

use serde::{Deserialize, Serialize};

use crate::metric::Metric;

use super::BallEntry;

/// The predicates a ball tree query can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPredicate {
    /// Exact equality of centers.
    Same,
    /// The stored region and the query region overlap.
    Overlaps,
    /// The stored region contains the query region.
    Contains,
    /// The stored region is contained by the query region.
    ContainedBy,
}

/// Outcome of a consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consistency {
    /// Whether the subtree (or leaf) can satisfy the predicate.
    pub matches: bool,
    /// Whether a match must be re-verified with the exact predicate at the
    /// leaf level.
    pub recheck: bool,
}

impl Consistency {
    fn exact(matches: bool) -> Self {
        Consistency {
            matches,
            recheck: false,
        }
    }

    fn rechecked(matches: bool, recheck: bool) -> Self {
        Consistency { matches, recheck }
    }
}

/// Decide whether a stored entry is consistent with a query predicate.
///
/// `is_leaf` selects between the exact leaf rules and the bounding-region
/// inner rules. Inner `Same` and `Contains` matches always require a
/// recheck: a bounding region can contain the query region without any
/// actual leaf satisfying the exact predicate. Inner `Overlaps` and
/// `ContainedBy` matches are definitive only when the stored region is
/// entirely inside the query region.
pub fn consistent<K, M>(
    metric: &M,
    key: &BallEntry<K>,
    query: &BallEntry<K>,
    predicate: BallPredicate,
    is_leaf: bool,
) -> Consistency
where
    K: PartialEq,
    M: Metric<K>,
{
    if is_leaf {
        match predicate {
            BallPredicate::Same => Consistency::exact(key.center == query.center),
            BallPredicate::Overlaps => Consistency::exact(key.overlaps(metric, query)),
            BallPredicate::Contains => Consistency::exact(key.contains(metric, query)),
            BallPredicate::ContainedBy => Consistency::exact(key.contained_by(metric, query)),
        }
    } else {
        match predicate {
            BallPredicate::Same => Consistency::rechecked(key.contains(metric, query), true),
            BallPredicate::Overlaps => Consistency::rechecked(
                key.overlaps(metric, query),
                !key.contained_by(metric, query),
            ),
            BallPredicate::Contains => Consistency::rechecked(key.contains(metric, query), true),
            BallPredicate::ContainedBy => Consistency::rechecked(
                key.overlaps(metric, query),
                !key.contained_by(metric, query),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{BitKey128, Hamming};

    fn ball(bits: u128, radius: f64) -> BallEntry<BitKey128> {
        BallEntry::with_radius(BitKey128::new(bits), radius)
    }

    #[test]
    fn test_leaf_same_is_exact() {
        let metric = Hamming;
        let key = ball(0b1010, 0.0);

        let hit = consistent(&metric, &key, &ball(0b1010, 0.0), BallPredicate::Same, true);
        assert!(hit.matches);
        assert!(!hit.recheck);

        let miss = consistent(&metric, &key, &ball(0b1011, 0.0), BallPredicate::Same, true);
        assert!(!miss.matches);
    }

    #[test]
    fn test_inner_same_is_containment_with_recheck() {
        let metric = Hamming;
        // Inner region of radius 6 around zero.
        let key = ball(0, 6.0);
        let query = ball(0b111, 0.0); // distance 3, inside the region

        let result = consistent(&metric, &key, &query, BallPredicate::Same, false);
        assert!(result.matches);
        assert!(result.recheck);
    }

    #[test]
    fn test_overlap_uses_both_radii() {
        let metric = Hamming;
        let key = ball(0, 2.0);
        // Distance 4, radii 2 + 1: no overlap.
        let apart = ball(0b1111, 1.0);
        assert!(!consistent(&metric, &key, &apart, BallPredicate::Overlaps, true).matches);

        // Distance 4, radii 2 + 3: overlap.
        let near = ball(0b1111, 3.0);
        assert!(consistent(&metric, &key, &near, BallPredicate::Overlaps, true).matches);
    }

    #[test]
    fn test_inner_overlap_recheck_depends_on_containment() {
        let metric = Hamming;
        // Stored region entirely inside the query region: the overlap answer
        // is definitive.
        let key = ball(0b1, 1.0);
        let query = ball(0, 10.0);
        let inside = consistent(&metric, &key, &query, BallPredicate::Overlaps, false);
        assert!(inside.matches);
        assert!(!inside.recheck);

        // Partially overlapping regions still require a recheck.
        let partial_key = ball(0, 5.0);
        let partial_query = ball(0b1111_1111, 5.0);
        let partial = consistent(
            &metric,
            &partial_key,
            &partial_query,
            BallPredicate::Overlaps,
            false,
        );
        assert!(partial.matches);
        assert!(partial.recheck);
    }

    #[test]
    fn test_contains_and_contained_by_are_inverse() {
        let metric = Hamming;
        let big = ball(0, 8.0);
        let small = ball(0b11, 2.0);

        assert!(consistent(&metric, &big, &small, BallPredicate::Contains, true).matches);
        assert!(!consistent(&metric, &big, &small, BallPredicate::ContainedBy, true).matches);
        assert!(consistent(&metric, &small, &big, BallPredicate::ContainedBy, true).matches);
        assert!(!consistent(&metric, &small, &big, BallPredicate::Contains, true).matches);
    }

    #[test]
    fn test_inner_contained_by_widens_to_overlap() {
        let metric = Hamming;
        // The stored inner region only overlaps the query region, but some
        // leaf underneath may still be contained, so the subtree must be
        // visited with recheck.
        let key = ball(0, 5.0);
        let query = ball(0b1111_1111, 5.0);
        let result = consistent(&metric, &key, &query, BallPredicate::ContainedBy, false);
        assert!(result.matches);
        assert!(result.recheck);
    }
}
