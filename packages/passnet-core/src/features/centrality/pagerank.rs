//! Weighted PageRank
//!
//! ```text
//! PR(v) = (1-d)/N + d * ( Σ PR(u) * w(u,v) / out_weight(u)  +  Σ PR(z) / N )
//!                        u→v                                  z dangling
//!
//! where:
//!   d = damping factor (0.85)
//!   N = number of players in the graph
//! ```
//!
//! Power iteration from the uniform vector. Converged when the L1 change
//! between two iterations drops below `N * tolerance`. Scores sum to 1.
//!
//! # Performance
//! - **Complexity**: O(E * iterations)
//! - **Memory**: O(N + E)

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CentralityConfig;
use crate::errors::{PassnetError, Result};
use crate::features::graph_builder::PassGraph;
use petgraph::visit::EdgeRef;

/// PageRank configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankSettings {
    /// Damping factor (typically 0.85)
    pub damping: f64,

    /// Iterations before giving up
    pub max_iterations: usize,

    /// Per-node convergence tolerance
    pub tolerance: f64,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl From<&CentralityConfig> for PageRankSettings {
    fn from(config: &CentralityConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }
}

/// PageRank engine
///
/// # Example
/// ```ignore
/// let engine = PageRankEngine::new(&PageRankSettings::default());
/// let scores = engine.compute(&graph)?;
/// ```
pub struct PageRankEngine {
    settings: PageRankSettings,
}

impl PageRankEngine {
    pub fn new(settings: &PageRankSettings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    /// Scores indexed like the graph's node indices
    ///
    /// Returns `Convergence` when `max_iterations` pass without meeting the
    /// tolerance. An empty graph yields an empty vector.
    pub fn compute(&self, graph: &PassGraph) -> Result<Vec<f64>> {
        let g = graph.inner();
        let n = g.node_count();
        if n == 0 {
            return Ok(Vec::new());
        }

        let damping = self.settings.damping;
        let uniform = 1.0 / n as f64;
        let (incoming, dangling) = Self::build_transitions(graph);

        let mut scores = vec![uniform; n];

        for iteration in 0..self.settings.max_iterations {
            let dangling_mass: f64 = dangling.iter().map(|&z| scores[z]).sum();
            let base = (1.0 - damping) * uniform + damping * dangling_mass * uniform;

            let next: Vec<f64> = incoming
                .iter()
                .map(|sources| {
                    let inflow: f64 = sources.iter().map(|&(u, p)| scores[u] * p).sum();
                    base + damping * inflow
                })
                .collect();

            let change: f64 = next
                .iter()
                .zip(&scores)
                .map(|(new, old)| (new - old).abs())
                .sum();
            scores = next;

            if change < n as f64 * self.settings.tolerance {
                debug!(
                    "PageRank converged after {} iterations (delta: {:e})",
                    iteration + 1,
                    change
                );
                return Ok(scores);
            }
        }

        Err(PassnetError::Convergence {
            iterations: self.settings.max_iterations,
        })
    }

    /// Incoming (source, transition probability) lists plus dangling nodes
    ///
    /// Transition probability of u → v is w(u,v) / out_weight(u), so each
    /// non-dangling row sums to 1. Self-loops are ordinary transitions.
    fn build_transitions(graph: &PassGraph) -> (Vec<Vec<(usize, f64)>>, Vec<usize>) {
        let g = graph.inner();
        let n = g.node_count();

        let out_weights: Vec<f64> = g
            .node_indices()
            .map(|idx| g.edges(idx).map(|edge| f64::from(*edge.weight())).sum())
            .collect();

        let mut incoming: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for edge in g.edge_references() {
            let source = edge.source().index();
            let probability = f64::from(*edge.weight()) / out_weights[source];
            incoming[edge.target().index()].push((source, probability));
        }

        let dangling = (0..n).filter(|&i| out_weights[i] == 0.0).collect();
        (incoming, dangling)
    }
}
