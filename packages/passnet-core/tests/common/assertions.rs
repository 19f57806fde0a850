//! Custom assertions

use passnet_core::CentralityResult;
use passnet_storage::{AggregateStore, PlayerAggregate, PlayerId};

const EPSILON: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= EPSILON * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

/// Fetch a record that must exist
pub fn record<S: AggregateStore + ?Sized>(store: &S, player: u64) -> PlayerAggregate {
    store
        .get(PlayerId(player))
        .expect("store read failed")
        .unwrap_or_else(|| panic!("no record for player {player}"))
}

/// Record equals `games` copies of the single-match scores
pub fn assert_record_is_multiple(record: &PlayerAggregate, scores: &CentralityResult, games: u32) {
    let single = scores
        .get(record.player_id)
        .unwrap_or_else(|| panic!("player {} not in result", record.player_id));
    let factor = f64::from(games);

    assert_eq!(record.games, games, "games for player {}", record.player_id);
    assert_close(record.cumulative_betweenness, single.betweenness * factor);
    assert_close(record.cumulative_pagerank, single.pagerank * factor);
    assert_close(record.cumulative_degree, single.degree * factor);
}
