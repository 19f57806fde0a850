//! Batch runner: many (match, team) pairs against one store
//!
//! Events are grouped by pair once, duplicate pairs are dropped so each pair
//! reaches the store at most once per batch, and the pairs run in parallel on
//! a dedicated rayon pool.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::outcome::Outcome;
use super::stats_pipeline::StatsPipeline;
use crate::config::PassnetConfig;
use crate::errors::Result;
use crate::shared::models::{Event, MatchTeam};
use passnet_storage::AggregateStore;

/// Every (match, team) present in `events`, in first-appearance order
pub fn discover_pairs(events: &[Event]) -> Vec<MatchTeam> {
    let mut seen = HashSet::new();
    events
        .iter()
        .map(|e| MatchTeam::new(e.match_id, e.team_id))
        .filter(|pair| seen.insert(*pair))
        .collect()
}

/// Result of one pair
#[derive(Debug)]
pub struct PairReport {
    pub pair: MatchTeam,
    pub result: Result<Outcome>,
}

/// Per-pair results plus totals
#[derive(Debug, Default)]
pub struct BatchReport {
    pub pairs: Vec<PairReport>,
    /// Requested pairs dropped as repeats
    pub duplicates: usize,
    pub duration: Duration,
}

/// Printable totals of a [`BatchReport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub pairs: usize,
    pub persisted_matches: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: usize,
    pub duplicates: usize,
    pub players_persisted: usize,
}

impl BatchReport {
    fn count(&self, predicate: impl Fn(&PairReport) -> bool) -> usize {
        self.pairs.iter().filter(|report| predicate(report)).count()
    }

    /// Pairs whose every player was persisted
    pub fn persisted_matches(&self) -> usize {
        self.count(|r| matches!(&r.result, Ok(outcome) if outcome.is_persisted()))
    }

    pub fn skipped(&self) -> usize {
        self.count(|r| matches!(&r.result, Ok(outcome) if outcome.is_skipped()))
    }

    /// Pairs with at least one failed upsert
    pub fn failed(&self) -> usize {
        self.count(|r| matches!(&r.result, Ok(outcome) if outcome.is_failed()))
    }

    /// Pairs aborted before any upsert
    pub fn errors(&self) -> usize {
        self.count(|r| r.result.is_err())
    }

    pub fn players_persisted(&self) -> usize {
        self.pairs
            .iter()
            .filter_map(|r| r.result.as_ref().ok())
            .map(Outcome::persisted_players)
            .sum()
    }

    pub fn get(&self, pair: MatchTeam) -> Option<&PairReport> {
        self.pairs.iter().find(|report| report.pair == pair)
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            pairs: self.pairs.len(),
            persisted_matches: self.persisted_matches(),
            skipped: self.skipped(),
            failed: self.failed(),
            errors: self.errors(),
            duplicates: self.duplicates,
            players_persisted: self.players_persisted(),
        }
    }
}

pub struct BatchRunner<'a, S: AggregateStore + ?Sized> {
    pipeline: StatsPipeline<'a, S>,
    pool: rayon::ThreadPool,
}

impl<'a, S: AggregateStore + ?Sized> BatchRunner<'a, S> {
    pub fn new(store: &'a S, config: &PassnetConfig) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel.resolved_threads())
            .thread_name(|i| format!("passnet-worker-{}", i))
            .build()?;

        Ok(Self {
            pipeline: StatsPipeline::new(store, &config.centrality),
            pool,
        })
    }

    /// Run every requested pair once
    ///
    /// Reports come back in request order, duplicates removed.
    pub fn run(&self, events: &[Event], pairs: &[MatchTeam]) -> BatchReport {
        let start = Instant::now();

        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(pairs.len());
        for pair in pairs {
            if seen.insert(*pair) {
                unique.push(*pair);
            } else {
                warn!("Duplicate pair {} in batch, processing it once", pair);
            }
        }
        let duplicates = pairs.len() - unique.len();

        let mut grouped: HashMap<MatchTeam, Vec<Event>> = HashMap::new();
        for event in events {
            let pair = MatchTeam::new(event.match_id, event.team_id);
            if seen.contains(&pair) {
                grouped.entry(pair).or_default().push(event.clone());
            }
        }

        let reports: Vec<PairReport> = self.pool.install(|| {
            unique
                .par_iter()
                .map(|pair| {
                    let pair_events = grouped.get(pair).map(Vec::as_slice).unwrap_or(&[]);
                    let result = self.pipeline.run(pair_events, pair.match_id, pair.team_id);
                    if let Err(e) = &result {
                        warn!("Pipeline aborted for {}: {}", pair, e);
                    }
                    PairReport {
                        pair: *pair,
                        result,
                    }
                })
                .collect()
        });

        let report = BatchReport {
            pairs: reports,
            duplicates,
            duration: start.elapsed(),
        };

        let summary = report.summary();
        info!(
            "Batch finished in {:?}: {} pairs, {} persisted, {} skipped, {} failed, {} errors",
            report.duration,
            summary.pairs,
            summary.persisted_matches,
            summary.skipped,
            summary.failed,
            summary.errors
        );
        report
    }

    /// Discover every pair in `events` and run them all
    pub fn run_all(&self, events: &[Event]) -> BatchReport {
        let pairs = discover_pairs(events);
        self.run(events, &pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{EventKind, MatchId, PlayerId, TeamId};
    use passnet_storage::InMemoryAggregateStore;

    fn pass(match_id: u64, team_id: u64, player: u64, ordinal: u64) -> Event {
        Event::new(
            MatchId(match_id),
            TeamId(team_id),
            PlayerId(player),
            EventKind::Pass,
            ordinal,
        )
    }

    fn single_thread() -> PassnetConfig {
        let mut config = PassnetConfig::default();
        config.parallel.num_threads = 1;
        config
    }

    #[test]
    fn test_discover_pairs_first_appearance() {
        let events = vec![
            pass(2, 20, 1, 0),
            pass(1, 10, 1, 0),
            pass(2, 20, 2, 1),
            pass(2, 21, 3, 0),
        ];

        let pairs = discover_pairs(&events);
        assert_eq!(
            pairs,
            vec![
                MatchTeam::new(MatchId(2), TeamId(20)),
                MatchTeam::new(MatchId(1), TeamId(10)),
                MatchTeam::new(MatchId(2), TeamId(21)),
            ]
        );
    }

    #[test]
    fn test_duplicate_pair_runs_once() {
        let store = InMemoryAggregateStore::new();
        let runner = BatchRunner::new(&store, &single_thread()).unwrap();

        let events = vec![pass(1, 10, 1, 0), pass(1, 10, 2, 1), pass(1, 10, 1, 2)];
        let pair = MatchTeam::new(MatchId(1), TeamId(10));

        let report = runner.run(&events, &[pair, pair, pair]);

        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.duplicates, 2);
        assert_eq!(store.get(PlayerId(1)).unwrap().unwrap().games, 1);
    }

    #[test]
    fn test_totals() {
        let store = InMemoryAggregateStore::new();
        let runner = BatchRunner::new(&store, &single_thread()).unwrap();

        let events = vec![
            pass(1, 10, 1, 0),
            pass(1, 10, 2, 1),
            // lone pass: skipped
            pass(1, 11, 5, 0),
            pass(2, 10, 1, 0),
            pass(2, 10, 3, 1),
        ];

        let report = runner.run_all(&events);
        let summary = report.summary();

        assert_eq!(summary.pairs, 3);
        assert_eq!(summary.persisted_matches, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.errors, 0);
        assert_eq!(summary.players_persisted, 4);
        assert_eq!(store.get(PlayerId(1)).unwrap().unwrap().games, 2);
        assert!(report
            .get(MatchTeam::new(MatchId(1), TeamId(11)))
            .is_some_and(|r| matches!(&r.result, Ok(o) if o.is_skipped())));
    }

    #[test]
    fn test_requested_pair_without_events_is_skipped() {
        let store = InMemoryAggregateStore::new();
        let runner = BatchRunner::new(&store, &single_thread()).unwrap();

        let report = runner.run(&[], &[MatchTeam::new(MatchId(9), TeamId(9))]);
        assert_eq!(report.skipped(), 1);
        assert!(store.is_empty().unwrap());
    }
}
