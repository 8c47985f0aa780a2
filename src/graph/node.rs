use indexmap::IndexMap;

use crate::{Price, Probability, Reward, Smiles, TemplateIndex};

/// A node of the AND/OR graph is either a chemical (OR node: alternatives
/// for making the molecule) or a reaction (AND node: a conjunction of
/// required precursors). Both carry a shared substrate of visit/reward
/// bookkeeping plus kind-specific attributes.
#[derive(Debug, Clone)]
pub enum NodeRecord {
    Chemical(Chemical),
    Reaction(Reaction),
}

impl NodeRecord {
    pub fn id(&self) -> &str {
        match self {
            Self::Chemical(c) => &c.smiles,
            Self::Reaction(r) => &r.id,
        }
    }

    pub fn visit_count(&self) -> usize {
        match self {
            Self::Chemical(c) => c.visit_count,
            Self::Reaction(r) => r.visit_count,
        }
    }

    pub fn reward_avg(&self) -> Reward {
        match self {
            Self::Chemical(c) => c.reward_avg,
            Self::Reaction(r) => r.reward_avg,
        }
    }

    pub fn as_chemical(&self) -> Option<&Chemical> {
        match self {
            Self::Chemical(c) => Some(c),
            Self::Reaction(_) => None,
        }
    }

    pub fn as_chemical_mut(&mut self) -> Option<&mut Chemical> {
        match self {
            Self::Chemical(c) => Some(c),
            Self::Reaction(_) => None,
        }
    }

    pub fn as_reaction(&self) -> Option<&Reaction> {
        match self {
            Self::Reaction(r) => Some(r),
            Self::Chemical(_) => None,
        }
    }

    pub fn as_reaction_mut(&mut self) -> Option<&mut Reaction> {
        match self {
            Self::Reaction(r) => Some(r),
            Self::Chemical(_) => None,
        }
    }

    pub fn is_chemical(&self) -> bool {
        matches!(self, Self::Chemical(_))
    }
}

/// OR node: a molecule and the alternative ways the search has considered
/// for making it.
#[derive(Debug, Clone)]
pub struct Chemical {
    pub smiles: Smiles,
    /// template-index -> relevance probability, insertion-ordered as
    /// returned by the adapter (descending probability).
    pub templates: IndexMap<TemplateIndex, Probability>,
    /// template-indices already applied here, in application order.
    pub explored: Vec<TemplateIndex>,
    pub min_depth: Option<usize>,
    pub visit_count: usize,
    pub reward_avg: Reward,
    pub reward_tot: Reward,
    pub purchase_price: Option<Price>,
    pub terminal: bool,
    pub done: bool,
}

impl Chemical {
    pub fn new(smiles: Smiles, templates: IndexMap<TemplateIndex, Probability>, purchase_price: Option<Price>, terminal: bool) -> Self {
        Self {
            smiles,
            templates,
            explored: Vec::new(),
            min_depth: None,
            visit_count: 0,
            reward_avg: 0.0,
            reward_tot: 0.0,
            purchase_price,
            terminal,
            done: false,
        }
    }
}

/// AND node: a specific retrosynthetic step. Its identifier is
/// `"<reactants>>>product"`, where `<reactants>` is the dot-joined
/// precursor SMILES in adapter order.
#[derive(Debug, Clone)]
pub struct Reaction {
    pub id: Smiles,
    /// every template-index that has produced this reaction so far.
    pub templates: Vec<TemplateIndex>,
    /// max relevance probability, w.r.t. the product chemical, across
    /// `templates`.
    pub template_score: Probability,
    pub fast_filter_score: Probability,
    pub reward_avg: Reward,
    pub reward_tot: Reward,
    pub visit_count: usize,
}

impl Reaction {
    pub fn new(id: Smiles, template: TemplateIndex, template_score: Probability, fast_filter_score: Probability) -> Self {
        Self {
            id,
            templates: vec![template],
            template_score,
            fast_filter_score,
            reward_avg: 0.0,
            reward_tot: 0.0,
            visit_count: 0,
        }
    }
}
