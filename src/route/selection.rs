use log::trace;
use petgraph::graph::NodeIndex;

use crate::config::Config;
use crate::error::{Result, RouteError};
use crate::graph::Graph;
use crate::{Reward, TemplateIndex, UNTRIED_TEMPLATE_PENALTY};

use super::done::reaction_done;

/// One scored candidate at a chemical node: either descend into an existing
/// reaction child, or apply a template never tried at this node before.
#[derive(Debug, Clone, Copy)]
pub enum Pick {
    Reaction(NodeIndex),
    Template(TemplateIndex),
}

struct Scored {
    option: Pick,
    score: Reward,
}

fn reaction_options(graph: &Graph, config: &Config, chem: NodeIndex, path: &[NodeIndex]) -> Vec<Scored> {
    let chemical = graph.chemical(chem);
    graph
        .successors(chem)
        .filter(|&rxn| !reaction_done(graph, rxn))
        .filter(|&rxn| !graph.successors(rxn).any(|child| path.contains(&child)))
        .map(|rxn| {
            let reaction = graph.reaction(rxn);
            let q_sa = -reaction.reward_avg;
            let p: f64 = reaction
                .templates
                .iter()
                .filter_map(|t| chemical.templates.get(t))
                .sum();
            let u_sa = p * chemical.visit_count as f64 / (1.0 + reaction.visit_count as f64);
            let score = q_sa + config.exploration_weight * u_sa;
            trace!("option reaction {:?}: q={q_sa:.4} u={u_sa:.4} score={score:.4}", reaction.id);
            Scored { option: Pick::Reaction(rxn), score }
        })
        .collect()
}

fn template_options(graph: &Graph, config: &Config, chem: NodeIndex) -> Vec<Scored> {
    let chemical = graph.chemical(chem);
    let best_child_reward = graph
        .successors(chem)
        .map(|rxn| graph.reaction(rxn).reward_avg)
        .fold(0.0_f64, f64::max);
    chemical
        .templates
        .keys()
        .filter(|t| !chemical.explored.contains(t))
        .map(|&t| {
            let q_sa = -(best_child_reward + UNTRIED_TEMPLATE_PENALTY);
            let prob = chemical.templates[&t];
            let u_sa = prob * (1.0 + (chemical.visit_count as f64).sqrt());
            let score = q_sa + config.exploration_weight * u_sa;
            trace!("option template {t}: q={q_sa:.4} u={u_sa:.4} score={score:.4}");
            Scored { option: Pick::Template(t), score }
        })
        .collect()
}

/// Scores the reaction-descend and new-template options for `chem`, per
/// §4.4. Both lists are sorted descending by score; templates are included
/// only when `out_degree(chem) < max_branching`.
fn candidates(graph: &Graph, config: &Config, chem: NodeIndex, path: &[NodeIndex]) -> Vec<Scored> {
    let mut options = reaction_options(graph, config, chem, path);
    if graph.out_degree(chem) < config.max_branching {
        options.extend(template_options(graph, config, chem));
    }
    options.sort_by(|a, b| b.score.partial_cmp(&a.score).expect("scores are never NaN"));
    options
}

/// Walks from `root` down to the frontier: a chemical leaf and a template
/// index never applied there before, per §4.5.
pub fn select(
    graph: &Graph,
    config: &Config,
    root: NodeIndex,
) -> Result<(Vec<NodeIndex>, Vec<NodeIndex>, TemplateIndex)> {
    let mut chem_path = vec![root];
    let mut rxn_path = Vec::new();
    let mut leaf = root;

    loop {
        let options = candidates(graph, config, leaf, &chem_path);
        let best = options.first().ok_or_else(|| RouteError::EmptyOptions {
            chemical: graph.chemical(leaf).smiles.clone(),
        })?;

        match best.option {
            Pick::Template(t) => return Ok((chem_path, rxn_path, t)),
            Pick::Reaction(rxn) => {
                rxn_path.push(rxn);
                let next = graph
                    .successors(rxn)
                    .filter(|&c| !graph.chemical(c).done)
                    .min_by_key(|&c| graph.chemical(c).visit_count)
                    .ok_or_else(|| RouteError::EmptyOptions {
                        chemical: graph.reaction(rxn).id.clone(),
                    })?;
                chem_path.push(next);
                leaf = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Chemical, Reaction};
    use indexmap::IndexMap;

    #[test]
    fn selects_only_new_template_when_no_children() {
        let mut graph = Graph::new();
        let config = Config::default();
        let mut templates = IndexMap::new();
        templates.insert(3u32, 0.8);
        let root = graph
            .add_chemical(Chemical::new("X".into(), templates, None, false))
            .unwrap();
        let (chem_path, rxn_path, t) = select(&graph, &config, root).unwrap();
        assert_eq!(chem_path, vec![root]);
        assert!(rxn_path.is_empty());
        assert_eq!(t, 3);
    }

    #[test]
    fn descends_into_lowest_visit_precursor() {
        let mut graph = Graph::new();
        let config = Config::default();
        let mut templates = IndexMap::new();
        templates.insert(0u32, 0.9);
        let root = graph
            .add_chemical(Chemical::new("X".into(), templates.clone(), None, false))
            .unwrap();
        graph.chemical_mut(root).explored.push(0);
        let rxn = graph
            .add_reaction(Reaction::new("A>>X".into(), 0, 0.9, 0.9))
            .unwrap();
        graph.add_edge(root, rxn);
        let mut leaf_templates = IndexMap::new();
        leaf_templates.insert(5u32, 0.5);
        let a = graph
            .add_chemical(Chemical::new("A".into(), leaf_templates, None, false))
            .unwrap();
        graph.add_edge(rxn, a);

        let (chem_path, rxn_path, t) = select(&graph, &config, root).unwrap();
        assert_eq!(chem_path, vec![root, a]);
        assert_eq!(rxn_path, vec![rxn]);
        assert_eq!(t, 5);
    }

    #[test]
    fn empty_options_is_hard_failure() {
        let mut graph = Graph::new();
        let config = Config::default();
        let root = graph
            .add_chemical(Chemical::new("X".into(), IndexMap::new(), None, false))
            .unwrap();
        let err = select(&graph, &config, root).unwrap_err();
        assert!(matches!(err, RouteError::EmptyOptions { .. }));
    }
}
