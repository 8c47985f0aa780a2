use petgraph::graph::NodeIndex;

use crate::config::Config;
use crate::graph::Graph;

/// `reaction_done` is deliberately never cached: a reaction's children are
/// shared chemicals that may be driven `done` by an update path through a
/// *different* parent reaction, so any cached flag here would risk staleness.
pub fn reaction_done(graph: &Graph, reaction: NodeIndex) -> bool {
    graph.out_degree(reaction) > 0
        && graph
            .successors(reaction)
            .all(|child| graph.chemical(child).done)
}

/// Recomputes and caches `chemical.done`, returning the new value. Called at
/// node creation and once per chemical touched during back-update.
pub fn update_chemical_done(graph: &mut Graph, chemical: NodeIndex, config: &Config) -> bool {
    let done = {
        let chem = graph.chemical(chemical);
        if chem.terminal {
            true
        } else if chem.templates.is_empty() {
            true
        } else if chem
            .min_depth
            .map(|d| d >= config.max_depth)
            .unwrap_or(false)
        {
            true
        } else {
            let exhausted =
                graph.out_degree(chemical) >= config.max_branching || chem.explored.len() == chem.templates.len();
            exhausted
                && graph
                    .successors(chemical)
                    .all(|rxn| reaction_done(graph, rxn))
        }
    };
    graph.chemical_mut(chemical).done = done;
    done
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Chemical, Reaction};
    use indexmap::IndexMap;

    #[test]
    fn terminal_is_done() {
        let mut graph = Graph::new();
        let config = Config::default();
        let idx = graph
            .add_chemical(Chemical::new("CC".into(), IndexMap::new(), Some(1.0), true))
            .unwrap();
        assert!(update_chemical_done(&mut graph, idx, &config));
    }

    #[test]
    fn empty_templates_is_done() {
        let mut graph = Graph::new();
        let config = Config::default();
        let idx = graph
            .add_chemical(Chemical::new("X".into(), IndexMap::new(), None, false))
            .unwrap();
        assert!(update_chemical_done(&mut graph, idx, &config));
    }

    #[test]
    fn min_depth_past_max_depth_is_done() {
        let mut graph = Graph::new();
        let mut config = Config::default();
        config.max_depth = 1;
        let mut templates = IndexMap::new();
        templates.insert(0, 1.0);
        let idx = graph
            .add_chemical(Chemical::new("X".into(), templates, None, false))
            .unwrap();
        graph.chemical_mut(idx).min_depth = Some(1);
        assert!(update_chemical_done(&mut graph, idx, &config));
    }

    #[test]
    fn reaction_done_false_without_children() {
        let mut graph = Graph::new();
        let idx = graph
            .add_reaction(Reaction::new("A>>B".into(), 0, 0.5, 0.9))
            .unwrap();
        assert!(!reaction_done(&graph, idx));
    }

    #[test]
    fn reaction_done_true_when_all_children_done() {
        let mut graph = Graph::new();
        let config = Config::default();
        let rxn = graph
            .add_reaction(Reaction::new("A>>B".into(), 0, 0.5, 0.9))
            .unwrap();
        let child = graph
            .add_chemical(Chemical::new("A".into(), IndexMap::new(), Some(1.0), true))
            .unwrap();
        graph.add_edge(rxn, child);
        update_chemical_done(&mut graph, child, &config);
        assert!(reaction_done(&graph, rxn));
    }

    #[test]
    fn idempotent_recompute() {
        let mut graph = Graph::new();
        let config = Config::default();
        let idx = graph
            .add_chemical(Chemical::new("CC".into(), IndexMap::new(), Some(1.0), true))
            .unwrap();
        let first = update_chemical_done(&mut graph, idx, &config);
        let second = update_chemical_done(&mut graph, idx, &config);
        assert_eq!(first, second);
    }
}
