use crate::graph::{Chemical, Reaction};
use crate::Reward;

/// Extension point for back-update (§4.8, §9 open question, §11). The
/// engine never back-propagates a reward by default: `reward_tot` and
/// `reward_avg` are wired but unwritten unless a host supplies one of these.
pub trait RewardSource {
    /// Reward contribution for a chemical visited during back-update, or
    /// `None` to leave its reward fields untouched this update.
    fn reward_for_chemical(&self, _chemical: &Chemical) -> Option<Reward> {
        None
    }

    /// Reward contribution for the parent reaction of a visited chemical.
    fn reward_for_reaction(&self, _reaction: &Reaction) -> Option<Reward> {
        None
    }
}

/// Preserves the studied behavior exactly: no reward is ever propagated.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReward;

impl RewardSource for NullReward {}

/// Demonstrates the extension point without being wired in by default: a
/// terminal chemical's reward is an inverse function of its purchase price
/// (cheaper precursors score higher), all other nodes contribute nothing.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPriceReward {
    pub scale: Reward,
}

impl Default for TerminalPriceReward {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl RewardSource for TerminalPriceReward {
    fn reward_for_chemical(&self, chemical: &Chemical) -> Option<Reward> {
        if !chemical.terminal {
            return None;
        }
        chemical.purchase_price.map(|price| self.scale / (1.0 + price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn null_reward_never_contributes() {
        let chemical = Chemical::new("CC".into(), IndexMap::new(), Some(1.0), true);
        assert_eq!(NullReward.reward_for_chemical(&chemical), None);
    }

    #[test]
    fn terminal_price_reward_only_scores_terminals() {
        let terminal = Chemical::new("CC".into(), IndexMap::new(), Some(1.0), true);
        let nonterminal = Chemical::new("X".into(), IndexMap::new(), None, false);
        let source = TerminalPriceReward::default();
        assert!(source.reward_for_chemical(&terminal).is_some());
        assert!(source.reward_for_chemical(&nonterminal).is_none());
    }
}
