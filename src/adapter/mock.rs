//! A literal-table chemistry adapter used by tests and the benchmark. Every
//! answer is looked up from a fixed map rather than computed, so scenarios
//! can be asserted against exact expected graphs.

use std::collections::BTreeMap;

use super::ChemistryAdapter;
use crate::{Price, Probability, RouteError, Smiles, TemplateIndex};

#[derive(Default, Clone)]
pub struct MockAdapter {
    templates: BTreeMap<Smiles, (Vec<Probability>, Vec<TemplateIndex>)>,
    outcomes: BTreeMap<(Smiles, TemplateIndex), Vec<Vec<Smiles>>>,
    filter_scores: BTreeMap<(Smiles, Smiles), Probability>,
    prices: BTreeMap<Smiles, Option<Price>>,
    banned_molecules: Vec<Smiles>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(
        mut self,
        smiles: impl Into<Smiles>,
        probs: Vec<Probability>,
        indices: Vec<TemplateIndex>,
    ) -> Self {
        self.templates.insert(smiles.into(), (probs, indices));
        self
    }

    pub fn with_outcomes(
        mut self,
        smiles: impl Into<Smiles>,
        template: TemplateIndex,
        outcomes: Vec<Vec<Smiles>>,
    ) -> Self {
        self.outcomes.insert((smiles.into(), template), outcomes);
        self
    }

    pub fn with_filter_score(
        mut self,
        reactants_joined: impl Into<Smiles>,
        product: impl Into<Smiles>,
        score: Probability,
    ) -> Self {
        self.filter_scores
            .insert((reactants_joined.into(), product.into()), score);
        self
    }

    pub fn with_price(mut self, smiles: impl Into<Smiles>, price: Option<Price>) -> Self {
        self.prices.insert(smiles.into(), price);
        self
    }

    pub fn with_banned_molecule(mut self, smiles: impl Into<Smiles>) -> Self {
        self.banned_molecules.push(smiles.into());
        self
    }
}

impl ChemistryAdapter for MockAdapter {
    fn predict_templates(
        &self,
        smiles: &str,
        max_count: usize,
        max_cum_prob: Probability,
    ) -> Result<(Vec<Probability>, Vec<TemplateIndex>), RouteError> {
        let (probs, indices) = self
            .templates
            .get(smiles)
            .cloned()
            .unwrap_or_else(|| (Vec::new(), Vec::new()));
        let mut cum = 0.0;
        let mut out_probs = Vec::new();
        let mut out_indices = Vec::new();
        for (p, i) in probs.into_iter().zip(indices.into_iter()).take(max_count) {
            // the top-ranked template is always included even if its
            // probability alone exceeds the cap; the cap only governs
            // whether subsequent templates get added.
            if !out_probs.is_empty() && cum + p > max_cum_prob {
                break;
            }
            cum += p;
            out_probs.push(p);
            out_indices.push(i);
        }
        Ok((out_probs, out_indices))
    }

    fn apply_template(
        &self,
        smiles: &str,
        template_index: TemplateIndex,
    ) -> Result<Vec<Vec<Smiles>>, RouteError> {
        Ok(self
            .outcomes
            .get(&(smiles.to_string(), template_index))
            .cloned()
            .unwrap_or_default())
    }

    fn fast_filter(&self, reactants_joined: &str, product: &str) -> Result<Probability, RouteError> {
        self.filter_scores
            .get(&(reactants_joined.to_string(), product.to_string()))
            .copied()
            .ok_or_else(|| {
                RouteError::Adapter(format!(
                    "no fast_filter fixture for {:?} -> {:?}",
                    reactants_joined, product
                ))
            })
    }

    fn lookup_price(&self, smiles: &str) -> Result<Option<Price>, RouteError> {
        Ok(self.prices.get(smiles).copied().flatten())
    }

    fn is_banned_molecule(&self, smiles: &str) -> bool {
        self.banned_molecules.iter().any(|b| b == smiles)
    }
}
