//! # Vantage
//!
//! Metric-space indexing primitives for Rust.
//!
//! Vantage implements the computational core of two balanced metric trees
//! over domains that have a distance function but no total order:
//!
//! - a **ball tree** (M-tree style), whose internal entries carry a
//!   representative center and a covering radius, together with eight
//!   selectable node-splitting strategies, union-region computation,
//!   insertion penalties, and triangle-inequality query pruning;
//! - a **partition tree** (vantage-point style), whose internal nodes carry a
//!   vantage point and an ascending sequence of distance thresholds, built by
//!   trial sampling of candidate vantage points and quantile-based band
//!   computation.
//!
//! Both trees are generic over a pluggable [`metric::Metric`]; scalar,
//! 128-bit Hamming, and string edit-distance metrics ship with the crate.
//! The host storage engine owns the tree pages and the calling convention;
//! this crate supplies the pure routing, splitting, and consistency logic.

pub mod ball;
pub mod cache;
pub mod error;
pub mod metric;
pub mod opclass;
pub mod partition;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
