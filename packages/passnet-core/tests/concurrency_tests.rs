//! Concurrent pipelines sharing one store never lose an update.

mod common;

use common::*;
use std::sync::Arc;
use std::thread;

use passnet_core::config::CentralityConfig;
use passnet_core::{BatchRunner, MatchId, MatchTeam, PassnetConfig, StatsPipeline, TeamId};
use passnet_storage::{AggregateStore, InMemoryAggregateStore};

const THREADS: u32 = 8;

fn run_same_match_concurrently<S: AggregateStore + 'static>(store: Arc<S>) {
    let events = Arc::new(pass_sequence(7, 70, &[1, 2, 3, 1, 4, 2, 3]));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = Arc::clone(&store);
            let events = Arc::clone(&events);
            thread::spawn(move || {
                let pipeline = StatsPipeline::new(store.as_ref(), &CentralityConfig::default());
                let outcome = pipeline.run(&events, MatchId(7), TeamId(70)).unwrap();
                assert!(outcome.is_persisted(), "{}", outcome);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let single = StatsPipeline::new(store.as_ref(), &CentralityConfig::default())
        .analyze(&events, MatchId(7), TeamId(70))
        .unwrap();
    for player in 1..=4 {
        assert_record_is_multiple(&record(store.as_ref(), player), &single, THREADS);
    }
}

#[test]
fn test_concurrent_pipelines_in_memory() {
    run_same_match_concurrently(Arc::new(InMemoryAggregateStore::new()));
}

#[cfg(feature = "sqlite")]
#[test]
fn test_concurrent_pipelines_sqlite_file() {
    use passnet_storage::{SqliteAggregateStore, SqliteStoreOptions};

    let dir = tempfile::tempdir().unwrap();
    let store = SqliteAggregateStore::open(
        dir.path().join("graph_results.db"),
        SqliteStoreOptions::default(),
    )
    .unwrap();
    run_same_match_concurrently(Arc::new(store));
}

#[test]
fn test_batch_runner_parallel_matches_share_players() {
    // Players 1..=3 play every match; 10 + m only plays match m.
    let matches: Vec<u64> = (1..=20).collect();
    let events: Vec<_> = matches
        .iter()
        .flat_map(|&m| pass_sequence(m, 5, &[1, 2, 3, 10 + m, 1]))
        .collect();
    let pairs: Vec<MatchTeam> = matches
        .iter()
        .map(|&m| MatchTeam::new(MatchId(m), TeamId(5)))
        .collect();

    let store = InMemoryAggregateStore::new();
    let mut config = PassnetConfig::default();
    config.parallel.num_threads = 4;

    let report = BatchRunner::new(&store, &config).unwrap().run(&events, &pairs);

    assert_eq!(report.persisted_matches(), 20);
    for shared in 1..=3 {
        assert_eq!(record(&store, shared).games, 20);
    }
    for m in &matches {
        assert_eq!(record(&store, 10 + m).games, 1);
    }
    assert_eq!(store.len().unwrap(), 23);
}
