//! Ball tree opclass options.
//!
//! The host passes these per index instance; the engine never consults a
//! mutable global. Strategy identifiers arriving as text (reloption-style)
//! are parsed with [`FromStr`]; an unrecognized identifier is a fatal
//! configuration error, never a silent default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VantageError};

/// How `union` chooses its candidate centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnionStrategy {
    /// Only the first sibling entry is considered as the combined center.
    First,
    /// Every sibling entry is considered; the one minimizing the maximal
    /// required covering radius wins.
    MinMaxDistance,
}

impl Default for UnionStrategy {
    fn default() -> Self {
        UnionStrategy::MinMaxDistance
    }
}

impl FromStr for UnionStrategy {
    type Err = VantageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(UnionStrategy::First),
            "min_max_distance" => Ok(UnionStrategy::MinMaxDistance),
            other => Err(VantageError::configuration(format!(
                "invalid union strategy: {other:?}"
            ))),
        }
    }
}

impl fmt::Display for UnionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnionStrategy::First => "first",
            UnionStrategy::MinMaxDistance => "min_max_distance",
        };
        write!(f, "{name}")
    }
}

/// How `picksplit` chooses the two seed centers of an overflowing node.
///
/// The sampling strategies draw `TRIAL_COUNT` random seed pairs and keep the
/// pair whose full trial assignment scores best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickSplitStrategy {
    /// Two random distinct members.
    Random,
    /// Members 0 and 1, regardless of metric values.
    FirstTwo,
    /// Member 0 and the member farthest from it.
    MaxDistanceFromFirst,
    /// Exhaustive scan for the globally farthest pair.
    MaxDistancePair,
    /// Sampled pair minimizing the sum of the two covering radii.
    SamplingMinCoveringSum,
    /// Sampled pair minimizing the larger of the two covering radii.
    SamplingMinCoveringMax,
    /// Sampled pair minimizing the overlap area of the two result spheres.
    SamplingMinOverlapArea,
    /// Sampled pair minimizing the sum of the squared covering radii.
    SamplingMinAreaSum,
}

/// Number of random seed pairs drawn by the sampling strategies.
pub const TRIAL_COUNT: usize = 100;

impl Default for PickSplitStrategy {
    fn default() -> Self {
        PickSplitStrategy::SamplingMinOverlapArea
    }
}

impl FromStr for PickSplitStrategy {
    type Err = VantageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(PickSplitStrategy::Random),
            "first_two" => Ok(PickSplitStrategy::FirstTwo),
            "max_distance_from_first" => Ok(PickSplitStrategy::MaxDistanceFromFirst),
            "max_distance_pair" => Ok(PickSplitStrategy::MaxDistancePair),
            "sampling_min_covering_sum" => Ok(PickSplitStrategy::SamplingMinCoveringSum),
            "sampling_min_covering_max" => Ok(PickSplitStrategy::SamplingMinCoveringMax),
            "sampling_min_overlap_area" => Ok(PickSplitStrategy::SamplingMinOverlapArea),
            "sampling_min_area_sum" => Ok(PickSplitStrategy::SamplingMinAreaSum),
            other => Err(VantageError::configuration(format!(
                "invalid picksplit strategy: {other:?}"
            ))),
        }
    }
}

impl fmt::Display for PickSplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PickSplitStrategy::Random => "random",
            PickSplitStrategy::FirstTwo => "first_two",
            PickSplitStrategy::MaxDistanceFromFirst => "max_distance_from_first",
            PickSplitStrategy::MaxDistancePair => "max_distance_pair",
            PickSplitStrategy::SamplingMinCoveringSum => "sampling_min_covering_sum",
            PickSplitStrategy::SamplingMinCoveringMax => "sampling_min_covering_max",
            PickSplitStrategy::SamplingMinOverlapArea => "sampling_min_overlap_area",
            PickSplitStrategy::SamplingMinAreaSum => "sampling_min_area_sum",
        };
        write!(f, "{name}")
    }
}

/// Per-index ball tree options, threaded explicitly into every union and
/// picksplit call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallOptions {
    /// Union candidate selection.
    pub union_strategy: UnionStrategy,
    /// Picksplit seed selection.
    pub picksplit_strategy: PickSplitStrategy,
}

impl BallOptions {
    /// Parse options from textual strategy identifiers.
    pub fn parse(union_strategy: &str, picksplit_strategy: &str) -> Result<Self> {
        Ok(BallOptions {
            union_strategy: union_strategy.parse()?,
            picksplit_strategy: picksplit_strategy.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BallOptions::default();
        assert_eq!(options.union_strategy, UnionStrategy::MinMaxDistance);
        assert_eq!(
            options.picksplit_strategy,
            PickSplitStrategy::SamplingMinOverlapArea
        );
    }

    #[test]
    fn test_parse_round_trip() {
        for strategy in [
            PickSplitStrategy::Random,
            PickSplitStrategy::FirstTwo,
            PickSplitStrategy::MaxDistanceFromFirst,
            PickSplitStrategy::MaxDistancePair,
            PickSplitStrategy::SamplingMinCoveringSum,
            PickSplitStrategy::SamplingMinCoveringMax,
            PickSplitStrategy::SamplingMinOverlapArea,
            PickSplitStrategy::SamplingMinAreaSum,
        ] {
            let parsed: PickSplitStrategy = strategy.to_string().parse().unwrap();
            assert_eq!(parsed, strategy);
        }

        for strategy in [UnionStrategy::First, UnionStrategy::MinMaxDistance] {
            let parsed: UnionStrategy = strategy.to_string().parse().unwrap();
            assert_eq!(parsed, strategy);
        }
    }

    #[test]
    fn test_unrecognized_strategy_is_fatal() {
        assert!("middle_out".parse::<PickSplitStrategy>().is_err());
        assert!("best".parse::<UnionStrategy>().is_err());
        assert!(BallOptions::parse("first", "middle_out").is_err());
    }

    #[test]
    fn test_options_json_round_trip() {
        let options = BallOptions {
            union_strategy: UnionStrategy::First,
            picksplit_strategy: PickSplitStrategy::MaxDistancePair,
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: BallOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
