use itertools::Itertools;
use petgraph::graph::NodeIndex;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::RouteError;
use crate::graph::Graph;
use crate::Smiles;

/// `get_buyable_paths`'s emission format (§4.10, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFormat {
    Json,
    Graph,
}

impl std::str::FromStr for PathFormat {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "graph" => Ok(Self::Graph),
            other => Err(RouteError::BadFormat(other.to_string())),
        }
    }
}

/// A single node of an extracted synthesis tree. `reaction` is `None` at a
/// terminal leaf; otherwise it names the chosen reaction and its precursors
/// (AND semantics: every precursor is required).
#[derive(Debug, Clone, Serialize)]
pub struct PathTree {
    pub source: Smiles,
    pub reaction: Option<ReactionStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionStep {
    pub id: String,
    pub precursors: Vec<PathTree>,
}

/// Enumerates every buyable synthesis tree rooted at `root`, depth-bounded
/// by `max_depth` (§4.10). A chemical branches by picking one reaction
/// child (OR); a reaction branches by requiring all chemical children
/// (AND), combined via cartesian product. Pruned entirely if it cannot
/// bottom out at a terminal leaf within the depth bound.
pub fn extract_paths(graph: &Graph, root: NodeIndex, max_depth: usize) -> Vec<PathTree> {
    chemical_trees(graph, root, 0, max_depth)
}

fn chemical_trees(graph: &Graph, chem: NodeIndex, depth: usize, max_depth: usize) -> Vec<PathTree> {
    let chemical = graph.chemical(chem);
    let mut out = Vec::new();

    if chemical.terminal {
        out.push(PathTree { source: chemical.smiles.clone(), reaction: None });
    }

    if depth < max_depth {
        for rxn in graph.successors(chem) {
            for step in reaction_trees(graph, rxn, depth, max_depth) {
                out.push(PathTree { source: chemical.smiles.clone(), reaction: Some(step) });
            }
        }
    }

    out
}

fn reaction_trees(graph: &Graph, rxn: NodeIndex, depth: usize, max_depth: usize) -> Vec<ReactionStep> {
    let children: Vec<NodeIndex> = graph.successors(rxn).collect();
    if children.is_empty() {
        return Vec::new();
    }
    let per_child: Vec<Vec<PathTree>> = children
        .iter()
        .map(|&c| chemical_trees(graph, c, depth + 1, max_depth))
        .collect();
    if per_child.iter().any(Vec::is_empty) {
        return Vec::new();
    }
    let id = graph.reaction(rxn).id.clone();
    per_child
        .into_iter()
        .multi_cartesian_product()
        .map(|precursors| ReactionStep { id: id.clone(), precursors })
        .collect()
}

impl PathTree {
    fn to_graph_value(&self, nodes: &mut Vec<Value>, edges: &mut Vec<Value>) -> usize {
        let my_id = nodes.len();
        nodes.push(json!({ "kind": "chemical", "source": self.source }));
        if let Some(step) = &self.reaction {
            let rxn_id = nodes.len();
            nodes.push(json!({ "kind": "reaction", "id": step.id }));
            edges.push(json!([my_id, rxn_id]));
            for precursor in &step.precursors {
                let child_id = precursor.to_graph_value(nodes, edges);
                edges.push(json!([rxn_id, child_id]));
            }
        }
        my_id
    }
}

/// Renders a batch of extracted trees per `format`: `json` nests each tree
/// directly; `graph` flattens each tree into an explicit node/edge list.
pub fn render(paths: &[PathTree], format: PathFormat) -> Value {
    match format {
        PathFormat::Json => json!(paths),
        PathFormat::Graph => {
            let trees = paths
                .iter()
                .map(|tree| {
                    let mut nodes = Vec::new();
                    let mut edges = Vec::new();
                    tree.to_graph_value(&mut nodes, &mut edges);
                    json!({ "nodes": nodes, "edges": edges })
                })
                .collect::<Vec<_>>();
            json!(trees)
        }
    }
}
