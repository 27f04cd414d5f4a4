//! Union-region computation over sibling ball entries.

use crate::error::{Result, VantageError};
use crate::metric::Metric;

use super::BallEntry;
use super::options::UnionStrategy;

/// Combine sibling entries into one entry covering all of them.
///
/// Candidate centers are either just the first entry
/// ([`UnionStrategy::First`]) or every entry
/// ([`UnionStrategy::MinMaxDistance`]). For each candidate the maximal
/// required covering radius over all siblings is computed; the candidate
/// minimizing that maximum wins and is returned as a copy carrying the
/// computed radius.
///
/// The per-sibling requirement uses the clamped region distance when the
/// candidate does not already overlap the sibling, and falls back to the
/// exact center distance for a tighter bound when it does.
pub fn union<K, M>(
    metric: &M,
    entries: &[BallEntry<K>],
    strategy: UnionStrategy,
) -> Result<BallEntry<K>>
where
    K: Clone,
    M: Metric<K>,
{
    if entries.is_empty() {
        return Err(VantageError::invalid_operation(
            "cannot union an empty entry set",
        ));
    }

    let search_range = match strategy {
        UnionStrategy::First => 1,
        UnionStrategy::MinMaxDistance => entries.len(),
    };

    let mut covering_radii = vec![0.0f64; search_range];

    for (i, radius) in covering_radii.iter_mut().enumerate() {
        let candidate = &entries[i];

        for entry in entries {
            let bounded = candidate.bounded_distance(metric, entry);

            let required = if bounded > 0.0 {
                bounded + candidate.covering_radius + 2.0 * entry.covering_radius
            } else {
                let exact = candidate.exact_distance(metric, entry);
                let intersect =
                    exact - (candidate.covering_radius + entry.covering_radius);
                candidate.covering_radius + 2.0 * entry.covering_radius + intersect
            };

            if *radius < required {
                *radius = required;
            }
        }
    }

    let mut minimum_index = 0;
    for i in 1..search_range {
        if covering_radii[i] < covering_radii[minimum_index] {
            minimum_index = i;
        }
    }

    let mut out = entries[minimum_index].clone();
    out.covering_radius = covering_radii[minimum_index];
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{BitKey128, Hamming, Levenshtein};

    fn leaf(bits: u128) -> BallEntry<BitKey128> {
        BallEntry::new(BitKey128::new(bits))
    }

    #[test]
    fn test_union_of_single_entry_keeps_center() {
        let metric = Hamming;
        let entry = leaf(0b1010);
        let out = union(&metric, &[entry.clone()], UnionStrategy::MinMaxDistance).unwrap();
        assert_eq!(out.center, entry.center);
        assert!(out.covering_radius >= entry.covering_radius);
    }

    #[test]
    fn test_union_covers_every_member() {
        let metric = Hamming;
        let entries = vec![leaf(0), leaf(0b111), leaf(0b1111_0000), leaf(u128::MAX)];

        for strategy in [UnionStrategy::First, UnionStrategy::MinMaxDistance] {
            let out = union(&metric, &entries, strategy).unwrap();
            for entry in &entries {
                let d = out.exact_distance(&metric, entry) + entry.covering_radius;
                assert!(
                    d <= out.covering_radius,
                    "member at {d} outside union radius {} for {strategy:?}",
                    out.covering_radius
                );
            }
        }
    }

    #[test]
    fn test_union_first_uses_first_entry_center() {
        let metric = Levenshtein;
        let entries = vec![
            BallEntry::new("center".to_string()),
            BallEntry::new("far-away-string".to_string()),
        ];
        let out = union(&metric, &entries, UnionStrategy::First).unwrap();
        assert_eq!(out.center, "center");
    }

    #[test]
    fn test_union_min_max_picks_tighter_candidate() {
        let metric = Hamming;
        // The middle key needs a smaller radius than either extreme.
        let entries = vec![leaf(0), leaf(0b11), leaf(0b1111)];
        let first = union(&metric, &entries, UnionStrategy::First).unwrap();
        let best = union(&metric, &entries, UnionStrategy::MinMaxDistance).unwrap();
        assert!(best.covering_radius <= first.covering_radius);
    }

    #[test]
    fn test_union_empty_is_error() {
        let metric = Hamming;
        let entries: Vec<BallEntry<BitKey128>> = vec![];
        assert!(union(&metric, &entries, UnionStrategy::MinMaxDistance).is_err());
    }
}
