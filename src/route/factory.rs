use indexmap::IndexMap;
use log::debug;
use petgraph::graph::NodeIndex;

use crate::adapter::ChemistryAdapter;
use crate::config::Config;
use crate::error::Result;
use crate::graph::{Chemical, Graph};

use super::done::update_chemical_done;

/// Creates a chemical node for `smiles` if it does not already exist and
/// returns its index either way, so callers never need to branch on
/// pre-existence themselves.
pub fn create_chemical_node(
    graph: &mut Graph,
    adapter: &dyn ChemistryAdapter,
    config: &Config,
    smiles: &str,
) -> Result<NodeIndex> {
    if let Some(idx) = graph.index_of(smiles) {
        return Ok(idx);
    }

    let (probs, indices) = adapter.predict_templates(
        smiles,
        config.template_max_count,
        config.template_max_cum_prob,
    )?;
    let templates: IndexMap<_, _> = indices.into_iter().zip(probs).collect();

    let price = adapter.lookup_price(smiles).unwrap_or_else(|err| {
        log::warn!("lookup_price({smiles:?}) failed, treating as unpurchasable: {err}");
        None
    });
    let terminal = price.map(|p| p <= config.max_ppg).unwrap_or(false);

    debug!(
        "creating chemical node {smiles:?}: {} templates, price={:?}, terminal={terminal}",
        templates.len(),
        price
    );

    let chemical = Chemical::new(smiles.to_string(), templates, price, terminal);
    let idx = graph.add_chemical(chemical)?;
    update_chemical_done(graph, idx, config);
    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::mock::MockAdapter;

    #[test]
    fn terminal_chemical_is_done_at_creation() {
        let mut graph = Graph::new();
        let config = Config::default();
        let adapter = MockAdapter::new().with_price("CC", Some(1.0));
        let idx = create_chemical_node(&mut graph, &adapter, &config, "CC").unwrap();
        assert!(graph.chemical(idx).terminal);
        assert!(graph.chemical(idx).done);
    }

    #[test]
    fn chemical_with_no_templates_is_done() {
        let mut graph = Graph::new();
        let config = Config::default();
        let adapter = MockAdapter::new();
        let idx = create_chemical_node(&mut graph, &adapter, &config, "X").unwrap();
        assert!(graph.chemical(idx).templates.is_empty());
        assert!(graph.chemical(idx).done);
    }

    #[test]
    fn reuses_existing_node() {
        let mut graph = Graph::new();
        let config = Config::default();
        let adapter = MockAdapter::new();
        let a = create_chemical_node(&mut graph, &adapter, &config, "X").unwrap();
        let b = create_chemical_node(&mut graph, &adapter, &config, "X").unwrap();
        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
    }
}
