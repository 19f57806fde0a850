//! Whole-graph descriptors: density and weighted average clustering.
//!
//! Clustering works on the undirected view of the pass graph. Reciprocal
//! edges u → v and v → u collapse into one link carrying the weight of the
//! edge leaving the later-added player, and link weights are scaled by the
//! heaviest link before the geometric mean:
//!
//! ```text
//! c(u) = 1 / (deg(u) (deg(u) - 1)) * Σ (ŵ_uv ŵ_uw ŵ_vw)^(1/3)
//!                                    v,w
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use petgraph::visit::EdgeRef;

use crate::features::graph_builder::PassGraph;

/// Density and clustering of one pass graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub density: f64,
    pub average_clustering: f64,
}

impl GraphMetrics {
    /// `None` for graphs with fewer than two players
    pub fn compute(graph: &PassGraph) -> Option<Self> {
        let n = graph.node_count();
        if n < 2 {
            return None;
        }

        Some(Self {
            density: density(graph),
            average_clustering: average_clustering(graph),
        })
    }
}

/// Directed density m / (n (n - 1)); every distinct edge counts, self-loops included.
fn density(graph: &PassGraph) -> f64 {
    let n = graph.node_count() as f64;
    graph.edge_count() as f64 / (n * (n - 1.0))
}

fn average_clustering(graph: &PassGraph) -> f64 {
    let g = graph.inner();
    let n = g.node_count();

    // Undirected links keyed by (min, max) index. Node indices follow
    // insertion order, so the edge from the higher index wins a reciprocal pair.
    let mut links: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for edge in g.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        let key = (a.min(b), a.max(b));
        let weight = f64::from(*edge.weight());
        if a > b {
            links.insert(key, weight);
        } else {
            links.entry(key).or_insert(weight);
        }
    }

    let max_weight = links.values().copied().fold(0.0, f64::max);
    if max_weight == 0.0 {
        return 0.0;
    }

    let mut neighbours: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];
    for (&(a, b), &weight) in &links {
        if a == b {
            continue;
        }
        let scaled = weight / max_weight;
        neighbours[a].insert(b, scaled);
        neighbours[b].insert(a, scaled);
    }

    let total: f64 = neighbours
        .iter()
        .map(|adjacent| local_clustering(adjacent, &neighbours))
        .sum();
    total / n as f64
}

fn local_clustering(adjacent: &BTreeMap<usize, f64>, neighbours: &[BTreeMap<usize, f64>]) -> f64 {
    let degree = adjacent.len();
    if degree < 2 {
        return 0.0;
    }

    let members: Vec<(usize, f64)> = adjacent.iter().map(|(&v, &w)| (v, w)).collect();
    let mut triangles = 0.0;
    for (i, &(v, w_uv)) in members.iter().enumerate() {
        for &(w, w_uw) in &members[i + 1..] {
            if let Some(&w_vw) = neighbours[v].get(&w) {
                triangles += (w_uv * w_uw * w_vw).cbrt();
            }
        }
    }

    2.0 * triangles / (degree * (degree - 1)) as f64
}
