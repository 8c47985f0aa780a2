use log::{debug, warn};
use petgraph::graph::NodeIndex;

use crate::adapter::ChemistryAdapter;
use crate::config::Config;
use crate::error::Result;
use crate::graph::{Graph, Reaction};
use crate::TemplateIndex;

use super::factory::create_chemical_node;

/// Applies `template` at `chem_path`'s last chemical, registering any new
/// reaction/chemical nodes and edges, per §4.6. All-or-nothing per outcome:
/// a cycle on any reactant discards the whole outcome.
pub fn expand(
    graph: &mut Graph,
    adapter: &dyn ChemistryAdapter,
    config: &Config,
    chem_path: &[NodeIndex],
    template: TemplateIndex,
) -> Result<()> {
    let leaf = *chem_path.last().expect("chem_path always has at least the root");
    if graph.chemical(leaf).explored.contains(&template) {
        return Ok(());
    }
    graph.chemical_mut(leaf).explored.push(template);

    let leaf_smiles = graph.chemical(leaf).smiles.clone();
    let template_prob = graph.chemical(leaf).templates[&template];
    let path_smiles: Vec<String> = chem_path
        .iter()
        .map(|&idx| graph.chemical(idx).smiles.clone())
        .collect();

    let outcomes = adapter.apply_template(&leaf_smiles, template).unwrap_or_else(|err| {
        warn!("apply_template({leaf_smiles:?}, {template}) failed, treating as no outcomes: {err}");
        Vec::new()
    });

    for outcome in outcomes {
        let joined = outcome.join(".");

        let score = adapter.fast_filter(&joined, &leaf_smiles)?;
        if score < config.fast_filter_threshold {
            debug!("outcome {joined:?} rejected by fast filter ({score:.3} < {:.3})", config.fast_filter_threshold);
            continue;
        }
        if adapter.is_banned_reaction(&joined, &leaf_smiles) {
            continue;
        }

        let mut abandoned = false;
        for reactant in &outcome {
            if path_smiles.iter().any(|s| s == reactant) {
                debug!("outcome {joined:?} abandoned: {reactant:?} would close a cycle");
                abandoned = true;
                break;
            }
            if adapter.is_banned_molecule(reactant) {
                abandoned = true;
                break;
            }
        }
        if abandoned {
            continue;
        }

        let mut reactant_indices = Vec::with_capacity(outcome.len());
        for reactant in &outcome {
            reactant_indices.push(create_chemical_node(graph, adapter, config, reactant)?);
        }

        let rxn_id = format!("{joined}>>{leaf_smiles}");
        let rxn_idx = match graph.index_of(&rxn_id) {
            Some(idx) => {
                let reaction = graph.reaction_mut(idx);
                reaction.templates.push(template);
                reaction.template_score = reaction.template_score.max(template_prob);
                idx
            }
            None => {
                debug!("creating reaction node {rxn_id:?}");
                graph
                    .add_reaction(Reaction::new(rxn_id, template, template_prob, score))?
            }
        };

        graph.add_edge(leaf, rxn_idx);
        for idx in reactant_indices {
            graph.add_edge(rxn_idx, idx);
        }
    }

    Ok(())
}
