//! Graph builder
//!
//! Turns one team's ordered event stream into a [`PassGraph`].
//!
//! # Adjacency rule
//!
//! Events are filtered to the requested (match, team) and ordered by
//! `ordinal`. Within that order, every adjacent pair of **Pass** events is a
//! passer → receiver transition, even when non-pass events (duels, fouls)
//! sat between them. This is deliberately not a possession chain.

use tracing::debug;

use super::pass_graph::PassGraph;
use crate::shared::models::{Event, MatchId, TeamId};

pub struct GraphBuilder;

impl GraphBuilder {
    /// Build the passing network of `team_id` in `match_id`
    ///
    /// Zero or one pass yields an empty graph; a single self-transition
    /// yields a one-node graph. Callers treat both as non-analyzable.
    pub fn build(events: &[Event], match_id: MatchId, team_id: TeamId) -> PassGraph {
        let mut team_events: Vec<&Event> = events
            .iter()
            .filter(|e| e.match_id == match_id && e.team_id == team_id)
            .collect();
        // Stable: equal ordinals keep input order.
        team_events.sort_by_key(|e| e.ordinal);

        let passes: Vec<&Event> = team_events.into_iter().filter(|e| e.is_pass()).collect();

        let mut graph = PassGraph::new();
        for pair in passes.windows(2) {
            graph.add_transition(pair[0].player_id, pair[1].player_id);
        }

        debug!(
            "Built pass graph for match {} team {}: {} passes, {} players, {} edges",
            match_id,
            team_id,
            passes.len(),
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}
