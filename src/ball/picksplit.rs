//! Two-way node splitting for the ball tree.
//!
//! An overflowing node is rebalanced by choosing two seed centers among its
//! members and assigning every member to the seed it is closer to, growing
//! the two covering radii as the assignment proceeds. Seed selection is
//! strategy-configurable; the sampling strategies score 100 random seed
//! pairs by running a full trial assignment for each, so all distance
//! lookups go through one shared [`DistanceCache`].

use log::debug;
use rand::prelude::*;

use crate::cache::DistanceCache;
use crate::error::{Result, VantageError};
use crate::metric::Metric;

use super::BallEntry;
use super::options::{PickSplitStrategy, TRIAL_COUNT};

/// Result of a two-way split: the member indices assigned to each side and
/// the combined entry covering each side.
#[derive(Debug, Clone)]
pub struct BallSplit<K> {
    /// Indices of members assigned to the left side.
    pub left: Vec<usize>,
    /// Indices of members assigned to the right side.
    pub right: Vec<usize>,
    /// Combined entry for the left side.
    pub left_union: BallEntry<K>,
    /// Combined entry for the right side.
    pub right_union: BallEntry<K>,
}

/// Overlap "lens" area of two circles with radii `r1` and `r2` whose centers
/// are `distance` apart.
///
/// Zero when the circles are disjoint, the full smaller-circle area when one
/// circle is nested in the other, the standard two-circle intersection area
/// otherwise. The member domain has no true dimensionality, so this is a
/// heuristic score for comparing candidate splits, not a geometric claim
/// about the regions.
pub fn overlap_area(r1: f64, r2: f64, distance: f64) -> f64 {
    use std::f64::consts::PI;

    if distance >= r1 + r2 {
        return 0.0;
    }
    if distance <= (r1 - r2).abs() {
        let r = r1.min(r2);
        return PI * r * r;
    }

    let d2 = distance * distance;
    let alpha = ((d2 + r1 * r1 - r2 * r2) / (2.0 * distance * r1)).clamp(-1.0, 1.0);
    let beta = ((d2 + r2 * r2 - r1 * r1) / (2.0 * distance * r2)).clamp(-1.0, 1.0);
    let triangle = 0.5
        * ((-distance + r1 + r2)
            * (distance + r1 - r2)
            * (distance - r1 + r2)
            * (distance + r1 + r2))
            .max(0.0)
            .sqrt();

    r1 * r1 * alpha.acos() + r2 * r2 * beta.acos() - triangle
}

/// Split an overflowing node's members into two sides.
///
/// Uses the process-wide random source for the sampling strategies; tests
/// that need determinism should call [`picksplit_with_rng`] with a seeded
/// generator.
pub fn picksplit<K, M>(
    metric: &M,
    entries: &[BallEntry<K>],
    strategy: PickSplitStrategy,
) -> Result<BallSplit<K>>
where
    K: Clone,
    M: Metric<K>,
{
    picksplit_with_rng(metric, entries, strategy, &mut rand::rng())
}

/// [`picksplit`] with an injected random source.
pub fn picksplit_with_rng<K, M, R>(
    metric: &M,
    entries: &[BallEntry<K>],
    strategy: PickSplitStrategy,
    rng: &mut R,
) -> Result<BallSplit<K>>
where
    K: Clone,
    M: Metric<K>,
    R: Rng,
{
    let n = entries.len();
    if n < 2 {
        return Err(VantageError::invalid_operation(format!(
            "picksplit needs at least two members, got {n}"
        )));
    }

    debug!("picksplit over {n} members with strategy {strategy:?}");

    let mut cache = DistanceCache::new(n);
    let dist = |cache: &mut DistanceCache, i: usize, j: usize| {
        cache.get(i, j, || entries[i].exact_distance(metric, &entries[j]))
    };

    let (left_index, right_index) = match strategy {
        PickSplitStrategy::Random => random_pair(rng, n),
        PickSplitStrategy::FirstTwo => (0, 1),
        PickSplitStrategy::MaxDistanceFromFirst => {
            let mut max_distance = -1.0;
            let mut right_candidate = 1;
            for r in 0..n {
                let distance = dist(&mut cache, 0, r);
                if distance > max_distance {
                    max_distance = distance;
                    right_candidate = r;
                }
            }
            (0, right_candidate)
        }
        PickSplitStrategy::MaxDistancePair => {
            let mut max_distance = -1.0;
            let mut pair = (0, 1);
            for l in 0..n {
                for r in l..n {
                    let distance = dist(&mut cache, l, r);
                    if distance > max_distance {
                        max_distance = distance;
                        pair = (l, r);
                    }
                }
            }
            pair
        }
        PickSplitStrategy::SamplingMinCoveringSum => sample_best(rng, n, |pair| {
            let (left_radius, right_radius) =
                trial_assignment(entries, &mut cache, metric, pair);
            left_radius + right_radius
        }),
        PickSplitStrategy::SamplingMinCoveringMax => sample_best(rng, n, |pair| {
            let (left_radius, right_radius) =
                trial_assignment(entries, &mut cache, metric, pair);
            left_radius.max(right_radius)
        }),
        PickSplitStrategy::SamplingMinOverlapArea => sample_best(rng, n, |pair| {
            let distance = cache.get(pair.0, pair.1, || {
                entries[pair.0].exact_distance(metric, &entries[pair.1])
            });
            let (left_radius, right_radius) =
                trial_assignment(entries, &mut cache, metric, pair);
            overlap_area(left_radius, right_radius, distance)
        }),
        PickSplitStrategy::SamplingMinAreaSum => sample_best(rng, n, |pair| {
            let (left_radius, right_radius) =
                trial_assignment(entries, &mut cache, metric, pair);
            left_radius * left_radius + right_radius * right_radius
        }),
    };

    debug!("picksplit seeds: left {left_index}, right {right_index}");

    let mut split = BallSplit {
        left: Vec::with_capacity(n),
        right: Vec::with_capacity(n),
        left_union: entries[left_index].clone(),
        right_union: entries[right_index].clone(),
    };

    for current in 0..n {
        let distance_left = dist(&mut cache, left_index, current);
        let distance_right = dist(&mut cache, right_index, current);
        let member = &entries[current];

        if distance_left <= distance_right {
            let required = distance_left + member.covering_radius;
            if required > split.left_union.covering_radius {
                split.left_union.covering_radius = required;
            }
            split.left.push(current);
        } else {
            let required = distance_right + member.covering_radius;
            if required > split.right_union.covering_radius {
                split.right_union.covering_radius = required;
            }
            split.right.push(current);
        }
    }

    Ok(split)
}

/// Draw a random seed pair with `left < right`.
fn random_pair<R: Rng>(rng: &mut R, n: usize) -> (usize, usize) {
    let left = rng.random_range(0..n - 1);
    let right = left + 1 + rng.random_range(0..n - left - 1);
    (left, right)
}

/// Draw [`TRIAL_COUNT`] random seed pairs and keep the lowest-scoring one.
fn sample_best<R, F>(rng: &mut R, n: usize, mut score: F) -> (usize, usize)
where
    R: Rng,
    F: FnMut((usize, usize)) -> f64,
{
    let mut best_pair = (0, 1);
    let mut best_score = f64::INFINITY;

    for _ in 0..TRIAL_COUNT {
        let pair = random_pair(rng, n);
        let current = score(pair);
        if current < best_score {
            best_score = current;
            best_pair = pair;
        }
    }

    best_pair
}

/// Assign every member to the closer of the two candidate seeds and return
/// the covering radius each side would need.
fn trial_assignment<K, M>(
    entries: &[BallEntry<K>],
    cache: &mut DistanceCache,
    metric: &M,
    (left, right): (usize, usize),
) -> (f64, f64)
where
    M: Metric<K>,
{
    let mut left_radius = 0.0f64;
    let mut right_radius = 0.0f64;

    for current in 0..entries.len() {
        let distance_left =
            cache.get(left, current, || entries[left].exact_distance(metric, &entries[current]));
        let distance_right = cache.get(right, current, || {
            entries[right].exact_distance(metric, &entries[current])
        });

        if distance_left <= distance_right {
            let required = distance_left + entries[current].covering_radius;
            if required > left_radius {
                left_radius = required;
            }
        } else {
            let required = distance_right + entries[current].covering_radius;
            if required > right_radius {
                right_radius = required;
            }
        }
    }

    (left_radius, right_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{BitKey128, Hamming, Levenshtein};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::PI;

    const ALL_STRATEGIES: [PickSplitStrategy; 8] = [
        PickSplitStrategy::Random,
        PickSplitStrategy::FirstTwo,
        PickSplitStrategy::MaxDistanceFromFirst,
        PickSplitStrategy::MaxDistancePair,
        PickSplitStrategy::SamplingMinCoveringSum,
        PickSplitStrategy::SamplingMinCoveringMax,
        PickSplitStrategy::SamplingMinOverlapArea,
        PickSplitStrategy::SamplingMinAreaSum,
    ];

    fn bit_entries() -> Vec<BallEntry<BitKey128>> {
        [0u128, 0b1, 0b11, 0b1111_0000, 0b1111_0001, u128::MAX, u128::MAX - 1]
            .into_iter()
            .map(|bits| BallEntry::new(BitKey128::new(bits)))
            .collect()
    }

    #[test]
    fn test_first_two_always_uses_first_members() {
        let metric = Levenshtein;
        let entries: Vec<BallEntry<String>> = ["zzzz", "a", "zzzy", "b", "c"]
            .into_iter()
            .map(|s| BallEntry::new(s.to_string()))
            .collect();

        let split =
            picksplit(&metric, &entries, PickSplitStrategy::FirstTwo).unwrap();
        assert_eq!(split.left_union.center, "zzzz");
        assert_eq!(split.right_union.center, "a");
        // Seed members stay on their own sides.
        assert!(split.left.contains(&0));
        assert!(split.right.contains(&1));
    }

    #[test]
    fn test_every_strategy_assigns_each_member_once() {
        let metric = Hamming;
        let entries = bit_entries();
        let mut rng = StdRng::seed_from_u64(42);

        for strategy in ALL_STRATEGIES {
            let split = picksplit_with_rng(&metric, &entries, strategy, &mut rng).unwrap();
            assert_eq!(
                split.left.len() + split.right.len(),
                entries.len(),
                "{strategy:?} lost or duplicated members"
            );

            let mut seen = vec![false; entries.len()];
            for &i in split.left.iter().chain(split.right.iter()) {
                assert!(!seen[i], "{strategy:?} assigned member {i} twice");
                seen[i] = true;
            }
            assert!(!split.left.is_empty());
            assert!(!split.right.is_empty());
        }
    }

    #[test]
    fn test_covering_radius_invariant_after_split() {
        let metric = Hamming;
        let entries = bit_entries();
        let mut rng = StdRng::seed_from_u64(7);

        for strategy in ALL_STRATEGIES {
            let split = picksplit_with_rng(&metric, &entries, strategy, &mut rng).unwrap();

            for (side, side_union) in [
                (&split.left, &split.left_union),
                (&split.right, &split.right_union),
            ] {
                for &i in side.iter() {
                    let d = side_union.exact_distance(&metric, &entries[i])
                        + entries[i].covering_radius;
                    assert!(
                        d <= side_union.covering_radius + 1e-9,
                        "{strategy:?}: member {i} at {d} outside radius {}",
                        side_union.covering_radius
                    );
                }
            }
        }
    }

    #[test]
    fn test_max_distance_pair_separates_extremes() {
        let metric = Hamming;
        let entries = bit_entries();
        let split =
            picksplit(&metric, &entries, PickSplitStrategy::MaxDistancePair).unwrap();
        // 0 and u128::MAX are the farthest pair (128 bits apart).
        let seeds = [split.left_union.center.bits(), split.right_union.center.bits()];
        assert!(seeds.contains(&0));
        assert!(seeds.contains(&u128::MAX));
    }

    #[test]
    fn test_picksplit_rejects_tiny_inputs() {
        let metric = Hamming;
        let one = vec![BallEntry::new(BitKey128::new(1))];
        assert!(picksplit(&metric, &one, PickSplitStrategy::FirstTwo).is_err());
        let none: Vec<BallEntry<BitKey128>> = vec![];
        assert!(picksplit(&metric, &none, PickSplitStrategy::FirstTwo).is_err());
    }

    #[test]
    fn test_overlap_area_cases() {
        // Disjoint circles have no overlap.
        assert_eq!(overlap_area(1.0, 1.0, 5.0), 0.0);
        assert_eq!(overlap_area(2.0, 3.0, 5.0), 0.0);

        // A nested circle contributes its full area.
        let nested = overlap_area(10.0, 1.0, 2.0);
        assert!((nested - PI).abs() < 1e-9);

        // Coincident equal circles overlap completely.
        let full = overlap_area(2.0, 2.0, 0.0);
        assert!((full - PI * 4.0).abs() < 1e-9);

        // Partial overlap is positive and smaller than either circle.
        let partial = overlap_area(2.0, 2.0, 3.0);
        assert!(partial > 0.0);
        assert!(partial < PI * 4.0);

        // Symmetric in the radii.
        assert_eq!(overlap_area(2.0, 3.0, 4.0), overlap_area(3.0, 2.0, 4.0));
    }

    #[test]
    fn test_sampling_strategies_are_deterministic_with_seeded_rng() {
        let metric = Hamming;
        let entries = bit_entries();

        let mut rng1 = StdRng::seed_from_u64(1234);
        let mut rng2 = StdRng::seed_from_u64(1234);
        let a = picksplit_with_rng(
            &metric,
            &entries,
            PickSplitStrategy::SamplingMinOverlapArea,
            &mut rng1,
        )
        .unwrap();
        let b = picksplit_with_rng(
            &metric,
            &entries,
            PickSplitStrategy::SamplingMinOverlapArea,
            &mut rng2,
        )
        .unwrap();
        assert_eq!(a.left, b.left);
        assert_eq!(a.right, b.right);
    }
}
