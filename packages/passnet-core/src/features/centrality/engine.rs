//! Centrality engine: the three per-player scores of one pass graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::betweenness::weighted_betweenness;
use super::degree::weighted_degree;
use super::pagerank::{PageRankEngine, PageRankSettings};
use crate::config::CentralityConfig;
use crate::errors::{PassnetError, Result};
use crate::features::graph_builder::PassGraph;
use crate::shared::models::PlayerId;
use passnet_storage::CentralityScores;

/// Scores for every player of one graph, ordered by player id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralityResult {
    scores: BTreeMap<PlayerId, CentralityScores>,
}

impl CentralityResult {
    pub fn get(&self, player: PlayerId) -> Option<&CentralityScores> {
        self.scores.get(&player)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.scores.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &CentralityScores)> + '_ {
        self.scores.iter().map(|(&player, scores)| (player, scores))
    }

    /// Sum of PageRank over all players (1.0 up to tolerance)
    pub fn pagerank_total(&self) -> f64 {
        self.scores.values().map(|s| s.pagerank).sum()
    }
}

impl IntoIterator for CentralityResult {
    type Item = (PlayerId, CentralityScores);
    type IntoIter = std::collections::btree_map::IntoIter<PlayerId, CentralityScores>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.into_iter()
    }
}

/// Computes betweenness, PageRank and weighted degree
#[derive(Debug, Clone)]
pub struct CentralityEngine {
    pagerank: PageRankSettings,
    normalized_betweenness: bool,
}

impl Default for CentralityEngine {
    fn default() -> Self {
        Self::new(&CentralityConfig::default())
    }
}

impl CentralityEngine {
    pub fn new(config: &CentralityConfig) -> Self {
        Self {
            pagerank: PageRankSettings::from(config),
            normalized_betweenness: config.normalized_betweenness,
        }
    }

    /// Score every player in `graph`
    ///
    /// Fails with `InsufficientGraphData` below two players and with
    /// `Convergence` when PageRank does not settle.
    pub fn compute(&self, graph: &PassGraph) -> Result<CentralityResult> {
        let nodes = graph.node_count();
        if nodes < 2 {
            return Err(PassnetError::InsufficientGraphData { nodes });
        }

        let betweenness = weighted_betweenness(graph, self.normalized_betweenness);
        let pagerank = PageRankEngine::new(&self.pagerank).compute(graph)?;
        let degree = weighted_degree(graph);

        let scores = graph
            .players()
            .into_iter()
            .enumerate()
            .map(|(i, player)| {
                (
                    player,
                    CentralityScores::new(betweenness[i], pagerank[i], degree[i]),
                )
            })
            .collect();

        debug!(
            "Computed centrality for {} players ({} edges)",
            nodes,
            graph.edge_count()
        );
        Ok(CentralityResult { scores })
    }
}
