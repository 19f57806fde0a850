//! Property-based tests for graph building and centrality
//!
//! Invariants that hold for every pass sequence:
//! - Transitions: total edge weight = passes - 1
//! - Degree: weighted degree = in-weight + out-weight
//! - PageRank: sums to 1
//! - Keys: one score per graph node

mod common;

use common::*;
use proptest::prelude::*;

use passnet_core::{CentralityEngine, GraphBuilder, GraphMetrics, MatchId, PassnetError, TeamId};

fn pass_players() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..=11, 0..80)
}

proptest! {
    #[test]
    fn prop_transitions_equal_adjacent_passes(players in pass_players()) {
        let events = pass_sequence(1, 1, &players);
        let graph = GraphBuilder::build(&events, MatchId(1), TeamId(1));

        prop_assert_eq!(graph.total_weight(), players.len().saturating_sub(1) as u64);
    }

    #[test]
    fn prop_centrality_invariants(players in pass_players()) {
        let events = pass_sequence(1, 1, &players);
        let graph = GraphBuilder::build(&events, MatchId(1), TeamId(1));

        match CentralityEngine::default().compute(&graph) {
            Ok(result) => {
                prop_assert!(graph.node_count() >= 2);
                prop_assert_eq!(result.len(), graph.node_count());
                prop_assert!((result.pagerank_total() - 1.0).abs() < 1e-6);

                for (player, scores) in result.iter() {
                    prop_assert!(graph.contains(player));
                    let expected = f64::from(graph.in_weight(player) + graph.out_weight(player));
                    prop_assert_eq!(scores.degree, expected);
                    prop_assert!(scores.betweenness >= 0.0);
                    prop_assert!(scores.pagerank > 0.0);
                }
            }
            Err(PassnetError::InsufficientGraphData { nodes }) => {
                prop_assert!(nodes < 2);
                prop_assert_eq!(nodes, graph.node_count());
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn prop_graph_metrics_in_unit_range(players in pass_players()) {
        let events = pass_sequence(1, 1, &players);
        let graph = GraphBuilder::build(&events, MatchId(1), TeamId(1));

        if let Some(metrics) = GraphMetrics::compute(&graph) {
            prop_assert!(metrics.density > 0.0);
            // self-loops may push a tiny graph's density past 1
            prop_assert!(metrics.density <= 1.0 + 1.0 / (graph.node_count() as f64 - 1.0));
            prop_assert!((0.0..=1.0 + 1e-12).contains(&metrics.average_clustering));
        } else {
            prop_assert!(graph.node_count() < 2);
        }
    }
}
