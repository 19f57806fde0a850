//! Pass graph with petgraph
//!
//! Directed graph where:
//! - Nodes are players (passer or receiver of at least one transition)
//! - Edge u → v carries the number of consecutive-pass transitions from u to v
//!
//! Parallel transitions collapse into one edge; self-loops are kept.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use crate::shared::models::PlayerId;

/// Weighted passing network for one team in one match
#[derive(Debug, Clone, Default)]
pub struct PassGraph {
    /// Directed graph: player → receiving player, weight = transitions
    graph: DiGraph<PlayerId, u32>,

    /// Player → node index mapping
    player_to_node: HashMap<PlayerId, NodeIndex>,
}

impl PassGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one passer → receiver transition
    pub fn add_transition(&mut self, passer: PlayerId, receiver: PlayerId) {
        let from = self.ensure_node(passer);
        let to = self.ensure_node(receiver);

        match self.graph.find_edge(from, to) {
            Some(edge) => self.graph[edge] += 1,
            None => {
                self.graph.add_edge(from, to, 1);
            }
        }
    }

    fn ensure_node(&mut self, player: PlayerId) -> NodeIndex {
        if let Some(&idx) = self.player_to_node.get(&player) {
            return idx;
        }
        let idx = self.graph.add_node(player);
        self.player_to_node.insert(player, idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.player_to_node.contains_key(&player)
    }

    /// Players in first-appearance order
    pub fn players(&self) -> Vec<PlayerId> {
        self.graph.node_indices().map(|idx| self.graph[idx]).collect()
    }

    /// Weight of u → v, `None` if the edge does not exist
    pub fn edge_weight(&self, from: PlayerId, to: PlayerId) -> Option<u32> {
        let from = *self.player_to_node.get(&from)?;
        let to = *self.player_to_node.get(&to)?;
        self.graph
            .find_edge(from, to)
            .map(|edge| self.graph[edge])
    }

    /// All edges as (passer, receiver, weight)
    pub fn edges(&self) -> Vec<(PlayerId, PlayerId, u32)> {
        self.graph
            .edge_references()
            .map(|edge| (self.graph[edge.source()], self.graph[edge.target()], *edge.weight()))
            .collect()
    }

    /// Sum of incoming edge weights
    pub fn in_weight(&self, player: PlayerId) -> u32 {
        self.directed_weight(player, Direction::Incoming)
    }

    /// Sum of outgoing edge weights
    pub fn out_weight(&self, player: PlayerId) -> u32 {
        self.directed_weight(player, Direction::Outgoing)
    }

    /// Total transitions recorded in the graph
    pub fn total_weight(&self) -> u64 {
        self.graph.edge_weights().map(|&w| u64::from(w)).sum()
    }

    fn directed_weight(&self, player: PlayerId, direction: Direction) -> u32 {
        match self.player_to_node.get(&player) {
            Some(&idx) => self
                .graph
                .edges_directed(idx, direction)
                .map(|edge| *edge.weight())
                .sum(),
            None => 0,
        }
    }

    /// Underlying petgraph graph, for the centrality algorithms
    pub(crate) fn inner(&self) -> &DiGraph<PlayerId, u32> {
        &self.graph
    }
}
