use std::collections::BTreeMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use super::edge::Link;
use super::node::{Chemical, NodeRecord, Reaction};
use crate::error::RouteError;

/// The AND/OR DAG. Owns every node and edge; other components address
/// nodes by their domain identifier (a SMILES string or a reaction id) or,
/// once looked up, by `NodeIndex`. No concurrency: the graph is exclusively
/// owned by the engine for the duration of a run.
#[derive(Default)]
pub struct Graph {
    inner: DiGraph<NodeRecord, Link>,
    index: BTreeMap<String, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
        self.index.clear();
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn chemical_count(&self) -> usize {
        self.inner
            .node_weights()
            .filter(|n| n.is_chemical())
            .count()
    }

    pub fn reaction_count(&self) -> usize {
        self.node_count() - self.chemical_count()
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, idx: NodeIndex) -> &NodeRecord {
        self.inner
            .node_weight(idx)
            .expect("NodeIndex handed out by this Graph is always valid")
    }

    fn get_mut(&mut self, idx: NodeIndex) -> &mut NodeRecord {
        self.inner
            .node_weight_mut(idx)
            .expect("NodeIndex handed out by this Graph is always valid")
    }

    pub fn chemical(&self, idx: NodeIndex) -> &Chemical {
        self.get(idx)
            .as_chemical()
            .expect("caller knows this index names a chemical")
    }

    pub fn chemical_mut(&mut self, idx: NodeIndex) -> &mut Chemical {
        self.get_mut(idx)
            .as_chemical_mut()
            .expect("caller knows this index names a chemical")
    }

    pub fn reaction(&self, idx: NodeIndex) -> &Reaction {
        self.get(idx)
            .as_reaction()
            .expect("caller knows this index names a reaction")
    }

    pub fn reaction_mut(&mut self, idx: NodeIndex) -> &mut Reaction {
        self.get_mut(idx)
            .as_reaction_mut()
            .expect("caller knows this index names a reaction")
    }

    pub fn add_chemical(&mut self, chemical: Chemical) -> Result<NodeIndex, RouteError> {
        if self.contains(&chemical.smiles) {
            return Err(RouteError::DuplicateNode(chemical.smiles));
        }
        let id = chemical.smiles.clone();
        let idx = self.inner.add_node(NodeRecord::Chemical(chemical));
        self.index.insert(id, idx);
        Ok(idx)
    }

    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<NodeIndex, RouteError> {
        if self.contains(&reaction.id) {
            return Err(RouteError::DuplicateNode(reaction.id));
        }
        let id = reaction.id.clone();
        let idx = self.inner.add_node(NodeRecord::Reaction(reaction));
        self.index.insert(id, idx);
        Ok(idx)
    }

    /// Idempotent: re-adding an edge that already exists is a no-op, per
    /// the expansion step's duplicate-edge semantics.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.inner.contains_edge(from, to) {
            self.inner.add_edge(from, to, Link);
        }
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.inner.node_indices()
    }

    pub fn is_acyclic(&self) -> bool {
        !petgraph::algo::is_cyclic_directed(&self.inner)
    }

    pub fn successors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.inner.neighbors_directed(idx, Direction::Outgoing)
    }

    pub fn predecessors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.inner.neighbors_directed(idx, Direction::Incoming)
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.inner.neighbors_directed(idx, Direction::Outgoing).count()
    }

    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.inner.neighbors_directed(idx, Direction::Incoming).count()
    }

    pub fn mean_in_degree(&self) -> f64 {
        if self.node_count() == 0 {
            return 0.0;
        }
        self.inner
            .node_indices()
            .map(|i| self.in_degree(i))
            .sum::<usize>() as f64
            / self.node_count() as f64
    }

    pub fn mean_out_degree(&self) -> f64 {
        if self.node_count() == 0 {
            return 0.0;
        }
        self.inner
            .node_indices()
            .map(|i| self.out_degree(i))
            .sum::<usize>() as f64
            / self.node_count() as f64
    }
}
