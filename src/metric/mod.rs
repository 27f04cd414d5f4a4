//! Pluggable distance metrics.
//!
//! Every tree in this crate is generic over a [`Metric`]: a pure, total
//! distance function satisfying the metric axioms (symmetry, identity,
//! triangle inequality). The split and pruning engines never look inside a
//! key; they only ever call [`Metric::distance`].
//!
//! Shipped metrics:
//! - [`DecimalEditDistance`] — edit distance between the decimal renderings
//!   of two `i64` keys ([`scalar`]);
//! - [`Hamming`] — population count of XOR over fixed-width 128-bit keys
//!   ([`hamming`]);
//! - [`Levenshtein`] — unit-cost string edit distance ([`text`]).

pub mod hamming;
pub mod scalar;
pub mod text;

pub use hamming::{BitKey128, Hamming};
pub use scalar::DecimalEditDistance;
pub use text::{Levenshtein, levenshtein};

/// A distance function over keys of type `K`.
///
/// Implementations must be deterministic and side-effect-free, with
/// `distance(a, b) == distance(b, a)`, `distance(a, a) == 0`, and the
/// triangle inequality `distance(a, c) <= distance(a, b) + distance(b, c)`.
pub trait Metric<K: ?Sized> {
    /// Compute the distance between two keys. Always non-negative.
    fn distance(&self, a: &K, b: &K) -> f64;
}
