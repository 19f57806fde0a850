//! Weighted betweenness centrality (Brandes, 2001)
//!
//! Edge cost is the reciprocal of the pass count, so frequent combinations are
//! short links. Shortest paths come from Dijkstra per source; dependencies are
//! accumulated in reverse settle order.
//!
//! ```text
//! BC(v) = Σ σ_st(v) / σ_st        (s ≠ v ≠ t)
//!        s,t
//! normalized: BC(v) / ((n-1)(n-2))
//! ```

use petgraph::visit::EdgeRef;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::features::graph_builder::PassGraph;

/// Path lengths closer than this (relative) are the same length.
const PATH_EPSILON: f64 = 1e-9;

/// Betweenness per node, indexed like the graph's node indices
pub fn weighted_betweenness(graph: &PassGraph, normalized: bool) -> Vec<f64> {
    let g = graph.inner();
    let n = g.node_count();
    let mut centrality = vec![0.0; n];

    // Outgoing (target, cost) lists, self-loops dropped: they never shorten a path.
    let adjacency: Vec<Vec<(usize, f64)>> = g
        .node_indices()
        .map(|idx| {
            g.edges(idx)
                .filter(|edge| edge.target() != idx)
                .map(|edge| (edge.target().index(), 1.0 / f64::from(*edge.weight())))
                .collect()
        })
        .collect();

    for source in 0..n {
        accumulate_from(source, &adjacency, &mut centrality);
    }

    if normalized && n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for value in &mut centrality {
            *value *= scale;
        }
    }

    centrality
}

/// One Brandes iteration: shortest paths from `source`, then back-propagate
/// pair dependencies.
fn accumulate_from(source: usize, adjacency: &[Vec<(usize, f64)>], centrality: &mut [f64]) {
    let n = adjacency.len();
    let mut settled_order: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut distance: Vec<Option<f64>> = vec![None; n];
    let mut settled = vec![false; n];

    sigma[source] = 1.0;
    distance[source] = Some(0.0);

    let mut queue = BinaryHeap::new();
    let mut counter = 0_u64;
    queue.push(QueueEntry {
        distance: 0.0,
        order: counter,
        node: source,
    });

    while let Some(QueueEntry { distance: dist, node: v, .. }) = queue.pop() {
        if settled[v] {
            continue;
        }
        settled[v] = true;
        settled_order.push(v);

        for &(w, cost) in &adjacency[v] {
            if settled[w] {
                continue;
            }
            let candidate = dist + cost;
            match distance[w] {
                Some(current) if same_length(candidate, current) => {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
                Some(current) if candidate > current => {}
                _ => {
                    distance[w] = Some(candidate);
                    sigma[w] = sigma[v];
                    predecessors[w].clear();
                    predecessors[w].push(v);
                    counter += 1;
                    queue.push(QueueEntry {
                        distance: candidate,
                        order: counter,
                        node: w,
                    });
                }
            }
        }
    }

    let mut delta = vec![0.0_f64; n];
    while let Some(w) = settled_order.pop() {
        let coefficient = (1.0 + delta[w]) / sigma[w];
        for &v in &predecessors[w] {
            delta[v] += sigma[v] * coefficient;
        }
        if w != source {
            centrality[w] += delta[w];
        }
    }
}

fn same_length(a: f64, b: f64) -> bool {
    (a - b).abs() <= PATH_EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Min-heap entry: smallest distance first, then insertion order.
struct QueueEntry {
    distance: f64,
    order: u64,
    node: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.order.cmp(&self.order))
    }
}
