//! Lazily-filled pairwise distance cache.
//!
//! The split heuristics probe the same key pairs many times: sampling
//! strategies run up to 100 full trial assignments, and the exhaustive pair
//! scan is O(n^2). A single metric call can itself be O(len^2) for string
//! keys, so every split shares one [`DistanceCache`] and each pair is
//! computed at most once.

/// A symmetric, lazily-filled square matrix of pairwise distances.
///
/// Slots start at a sentinel value; `get(i, j)` computes and memoizes the
/// distance on first access, and `get(i, j) == get(j, i)` with a single
/// computation for both orders.
#[derive(Debug)]
pub struct DistanceCache {
    size: usize,
    values: Vec<f64>,
}

// Distances are non-negative, so a negative slot means "not yet computed".
const UNCOMPUTED: f64 = -1.0;

impl DistanceCache {
    /// Create a cache for `size` candidates with every pair uncomputed.
    pub fn new(size: usize) -> Self {
        DistanceCache {
            size,
            values: vec![UNCOMPUTED; size * size],
        }
    }

    /// Number of candidates this cache covers.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Fetch the distance between candidates `i` and `j`, invoking `compute`
    /// only if the pair has not been seen in either order.
    pub fn get<F>(&mut self, i: usize, j: usize, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        let slot = i * self.size + j;
        if self.values[slot] < 0.0 {
            let distance = compute();
            self.values[slot] = distance;
            self.values[j * self.size + i] = distance;
        }
        self.values[slot]
    }
}
