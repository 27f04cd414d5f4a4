//! String edit distance.

use super::Metric;

/// Classic Levenshtein edit distance with unit insertion, deletion, and
/// substitution costs.
///
/// Computed with a single rolling column of length `a.len() + 1`, so the
/// space cost is linear in one operand while the time cost is O(n*m).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut column: Vec<usize> = (0..=a.len()).collect();

    for (x, bc) in b.iter().enumerate() {
        column[0] = x + 1;
        let mut last_diag = x;

        for (y, ac) in a.iter().enumerate() {
            let old_diag = column[y + 1];
            let substitution = last_diag + if ac == bc { 0 } else { 1 };
            column[y + 1] = (column[y + 1] + 1).min(column[y] + 1).min(substitution);
            last_diag = old_diag;
        }
    }

    column[a.len()]
}

/// Unit-cost string edit distance metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl Metric<String> for Levenshtein {
    fn distance(&self, a: &String, b: &String) -> f64 {
        levenshtein(a, b) as f64
    }
}

impl Metric<str> for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> f64 {
        levenshtein(a, b) as f64
    }
}
