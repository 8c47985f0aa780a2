//! A file-backed chemistry adapter: loads the same literal tables as
//! [`super::mock::MockAdapter`] from a JSON fixture on disk. Exists so the
//! `route` binary has something concrete to drive without pulling in an
//! actual chemistry service, which is explicitly out of this crate's scope.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::ChemistryAdapter;
use crate::{Price, Probability, RouteError, Smiles, TemplateIndex};

#[derive(Debug, Deserialize)]
struct TemplateEntry {
    probability: Probability,
    index: TemplateIndex,
}

#[derive(Debug, Deserialize)]
struct OutcomeEntry {
    smiles: Smiles,
    template: TemplateIndex,
    precursors: Vec<Vec<Smiles>>,
}

#[derive(Debug, Deserialize)]
struct FilterEntry {
    reactants_joined: Smiles,
    product: Smiles,
    score: Probability,
}

#[derive(Debug, Deserialize)]
struct PriceEntry {
    smiles: Smiles,
    price: Option<Price>,
}

#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    templates: BTreeMap<Smiles, Vec<TemplateEntry>>,
    #[serde(default)]
    outcomes: Vec<OutcomeEntry>,
    #[serde(default)]
    filter_scores: Vec<FilterEntry>,
    #[serde(default)]
    prices: Vec<PriceEntry>,
    #[serde(default)]
    banned_molecules: Vec<Smiles>,
}

pub struct JsonAdapter {
    templates: BTreeMap<Smiles, (Vec<Probability>, Vec<TemplateIndex>)>,
    outcomes: BTreeMap<(Smiles, TemplateIndex), Vec<Vec<Smiles>>>,
    filter_scores: BTreeMap<(Smiles, Smiles), Probability>,
    prices: BTreeMap<Smiles, Option<Price>>,
    banned_molecules: Vec<Smiles>,
}

impl JsonAdapter {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let fixture: Fixture = serde_json::from_str(&raw)?;

        let templates = fixture
            .templates
            .into_iter()
            .map(|(smiles, entries)| {
                let probs = entries.iter().map(|e| e.probability).collect();
                let indices = entries.iter().map(|e| e.index).collect();
                (smiles, (probs, indices))
            })
            .collect();

        let outcomes = fixture
            .outcomes
            .into_iter()
            .map(|e| ((e.smiles, e.template), e.precursors))
            .collect();

        let filter_scores = fixture
            .filter_scores
            .into_iter()
            .map(|e| ((e.reactants_joined, e.product), e.score))
            .collect();

        let prices = fixture.prices.into_iter().map(|e| (e.smiles, e.price)).collect();

        Ok(Self {
            templates,
            outcomes,
            filter_scores,
            prices,
            banned_molecules: fixture.banned_molecules,
        })
    }
}

impl ChemistryAdapter for JsonAdapter {
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
