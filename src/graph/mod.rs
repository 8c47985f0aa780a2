mod edge;
mod node;
mod store;

pub use edge::Link;
pub use node::{Chemical, NodeRecord, Reaction};
pub use store::Graph;
