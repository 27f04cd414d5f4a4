//! Scalar key metric.

use super::Metric;
use super::text::levenshtein;

/// Edit distance between the decimal renderings of two `i64` keys.
///
/// This is deliberately not `|a - b|`: the tree shape and query results of
/// the scalar opclass are defined in terms of the textual edit distance
/// between the two values' decimal representations, and changing the metric
/// would change both. `distance(100, 250) == 2` (two substituted digits),
/// `distance(100, 9999) == 4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalEditDistance;

impl Metric<i64> for DecimalEditDistance {
    fn distance(&self, a: &i64, b: &i64) -> f64 {
        levenshtein(&a.to_string(), &b.to_string()) as f64
    }
}
