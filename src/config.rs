use std::time::Duration;

use crate::{Price, Probability, Reward};

/// Global configuration record for one engine run. Passed in at
/// construction; the engine reads no environment variables and keeps no
/// process-wide state.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// cap on templates retained per chemical node.
    pub template_max_count: usize,
    /// cumulative-probability cutoff applied to the same list.
    pub template_max_cum_prob: Probability,
    /// minimum forward-plausibility score required to accept an outcome.
    pub fast_filter_threshold: Probability,
    /// per-chemical reaction-child cap.
    pub max_branching: usize,
    /// depth bound for both expansion (`min_depth`) and path enumeration.
    pub max_depth: usize,
    /// UCB exploration weight `w`.
    pub exploration_weight: Reward,
    /// a chemical is terminal iff its price exists and is <= this.
    pub max_ppg: Price,
    /// wall-clock budget for the rollout loop.
    pub expansion_time: Duration,
    /// optional hard cap on total chemical nodes.
    pub max_chemicals: Option<usize>,
    /// optional hard cap on total reaction nodes.
    pub max_reactions: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_max_count: 100,
            template_max_cum_prob: 0.995,
            fast_filter_threshold: 0.75,
            max_branching: 10,
            max_depth: 3,
            exploration_weight: 1.0,
            max_ppg: 10.0,
            expansion_time: Duration::from_secs(20),
            max_chemicals: None,
            max_reactions: None,
        }
    }
}
