use log::info;
use petgraph::graph::NodeIndex;

use crate::adapter::ChemistryAdapter;
use crate::config::Config;
use crate::error::Result;
use crate::graph::Graph;

use super::done::update_chemical_done;
use super::expansion::expand;
use super::reward::RewardSource;
use super::selection::select;

/// One MCTS iteration: select → expand → back-update, in strict order
/// (§5). `reward` is consulted during back-update but contributes nothing
/// under the default [`crate::route::NullReward`].
pub fn rollout(
    graph: &mut Graph,
    adapter: &dyn ChemistryAdapter,
    config: &Config,
    reward: &dyn RewardSource,
    root: NodeIndex,
) -> Result<()> {
    let (chem_path, rxn_path, template) = select(graph, config, root)?;
    expand(graph, adapter, config, &chem_path, template)?;
    update(graph, config, reward, &chem_path, &rxn_path);
    Ok(())
}

/// Back-update per §4.8: walk `chem_path` in reverse, pairing each chemical
/// with its parent reaction (`chem_path[i]` pairs with `rxn_path[i - 1]`;
/// the root has no parent).
fn update(
    graph: &mut Graph,
    config: &Config,
    reward: &dyn RewardSource,
    chem_path: &[NodeIndex],
    rxn_path: &[NodeIndex],
) {
    for i in (0..chem_path.len()).rev() {
        let chem = chem_path[i];
        {
            let chemical = graph.chemical_mut(chem);
            chemical.visit_count += 1;
            chemical.min_depth = Some(chemical.min_depth.map_or(i, |d| d.min(i)));
            if let Some(r) = reward.reward_for_chemical(chemical) {
                chemical.reward_tot += r;
                chemical.reward_avg = chemical.reward_tot / chemical.visit_count as f64;
            }
        }
        update_chemical_done(graph, chem, config);

        if i > 0 {
            let rxn = rxn_path[i - 1];
            let reaction = graph.reaction_mut(rxn);
            reaction.visit_count += 1;
            if let Some(r) = reward.reward_for_reaction(reaction) {
                reaction.reward_tot += r;
                reaction.reward_avg = reaction.reward_tot / reaction.visit_count as f64;
            }
        }
    }
    info!("rollout updated {} chemicals, {} reactions", chem_path.len(), rxn_path.len());
}
