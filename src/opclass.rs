//! The contract surface exposed to the host index framework.
//!
//! The host access-method machinery owns pages, tuples, and the calling
//! convention; this module describes the static shape of each operator
//! class (payload encodings, recheck capability) and provides the identity
//! compress/decompress hooks. The operational callbacks live in
//! [`crate::ball`] and [`crate::partition`]; the per-index options are
//! [`crate::ball::BallOptions`].

use serde::{Deserialize, Serialize};

/// On-disk payload encodings the host must provide for a tree's node data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadKind {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit float.
    Float64,
    /// Fixed-width 128-bit vector.
    Bits128,
    /// Variable-length text.
    Text,
}

/// Static description of an operator class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpclassConfig {
    /// Encoding of the inner-node prefix (vantage point or ball center).
    pub prefix: PayloadKind,
    /// Encoding of the per-child labels (band thresholds); `None` for tree
    /// families that carry no labels.
    pub label: Option<PayloadKind>,
    /// Whether index scans can return stored keys without refetching.
    pub can_return_data: bool,
    /// Whether arbitrarily long keys are accepted.
    pub long_values_ok: bool,
}

/// Configuration of the scalar partition tree opclass: integer vantage
/// points, float band thresholds, no long keys.
pub fn partition_config() -> OpclassConfig {
    OpclassConfig {
        prefix: PayloadKind::Int64,
        label: Some(PayloadKind::Float64),
        can_return_data: true,
        long_values_ok: false,
    }
}

/// Configuration of a ball tree opclass over the given key encoding. Ball
/// trees carry no child labels; bounding information lives in the entries
/// themselves, and inner matches may demand a leaf recheck.
pub fn ball_config(key: PayloadKind) -> OpclassConfig {
    OpclassConfig {
        prefix: key,
        label: None,
        can_return_data: true,
        long_values_ok: key == PayloadKind::Text,
    }
}

/// Identity compression hook: the engine stores keys verbatim; any
/// compaction is the host's concern.
pub fn compress<K>(key: K) -> K {
    key
}

/// Identity decompression hook.
pub fn decompress<K>(key: K) -> K {
    key
}
