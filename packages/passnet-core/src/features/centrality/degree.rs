//! Weighted degree: incoming plus outgoing transitions per player.
//!
//! Unnormalized. A self-loop of weight w adds w to both sides, and the sum
//! over all players is twice the graph's total weight.

use petgraph::visit::EdgeRef;

use crate::features::graph_builder::PassGraph;

/// Weighted degree per node, indexed like the graph's node indices
pub fn weighted_degree(graph: &PassGraph) -> Vec<f64> {
    let g = graph.inner();
    let mut degree = vec![0.0; g.node_count()];

    for edge in g.edge_references() {
        let weight = f64::from(*edge.weight());
        degree[edge.source().index()] += weight;
        degree[edge.target().index()] += weight;
    }

    degree
}
