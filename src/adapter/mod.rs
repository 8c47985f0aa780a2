//! Chemistry adapter interface: the thin, synchronous contract the search
//! engine depends on for everything domain-specific. Implementations talk to
//! a template-relevance model, a reaction-template library, a fast-filter
//! classifier, and a price oracle; none of that lives here.

#[cfg(any(test, feature = "mock-adapter"))]
pub mod mock;
pub mod json;

use crate::{Price, Probability, RouteError, Smiles, TemplateIndex};

/// Chemistry-agnostic contract. All four methods are pure with respect to
/// engine state: the engine never retries a call and never assumes a
/// particular implementation holds locks, caches, or network connections.
pub trait ChemistryAdapter {
    /// Up to `max_count` (template-index, probability) pairs, sorted by
    /// probability descending, truncated once cumulative probability
    /// exceeds `max_cum_prob`. Errors propagate to the caller.
    fn predict_templates(
        &self,
        smiles: &str,
        max_count: usize,
        max_cum_prob: Probability,
    ) -> Result<(Vec<Probability>, Vec<TemplateIndex>), RouteError>;

    /// Every outcome a template application could produce, each an
    /// unordered multiset of reactant SMILES. Chemistry errors are the
    /// adapter's to report, but the engine treats any `Err` here as "no
    /// outcomes" rather than propagating it.
    fn apply_template(
        &self,
        smiles: &str,
        template_index: TemplateIndex,
    ) -> Result<Vec<Vec<Smiles>>, RouteError>;

    /// Plausibility score in `[0, 1]` for the forward reaction
    /// `reactants_joined -> product`. Errors propagate.
    fn fast_filter(&self, reactants_joined: &str, product: &str) -> Result<Probability, RouteError>;

    /// Non-negative purchase price, or `None` if not commercially
    /// available. Errors are absorbed by the engine as `None`.
    fn lookup_price(&self, smiles: &str) -> Result<Option<Price>, RouteError>;

    /// Policy hook for banned-molecule rejection. Inert by default: no
    /// molecule is banned unless an adapter overrides this.
    fn is_banned_molecule(&self, _smiles: &str) -> bool {
        false
    }

    /// Policy hook for banned-reaction rejection. Inert by default.
    fn is_banned_reaction(&self, _reactants_joined: &str, _product: &str) -> bool {
        false
    }
}
