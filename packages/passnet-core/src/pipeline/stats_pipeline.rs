//! StatsPipeline: one (match, team) from events to persisted aggregates
//!
//! ```text
//! events ──► GraphBuilder ──► CentralityEngine ──► AggregateStore::upsert (per player)
//!                                  │
//!                                  └─ < 2 players ──► Outcome::Skipped
//! ```
//!
//! The store handle is borrowed from the caller, so one store can back many
//! pipelines (and threads) at once.

use rayon::prelude::*;
use tracing::{debug, warn};

use super::outcome::{Outcome, SkipReason, UpsertFailure};
use crate::config::CentralityConfig;
use crate::errors::{PassnetError, Result};
use crate::features::centrality::{CentralityEngine, CentralityResult};
use crate::features::graph_builder::GraphBuilder;
use crate::features::ingest;
use crate::shared::models::{Event, MatchId, TeamId};
use passnet_storage::AggregateStore;

pub struct StatsPipeline<'a, S: AggregateStore + ?Sized> {
    store: &'a S,
    engine: CentralityEngine,
}

impl<'a, S: AggregateStore + ?Sized> StatsPipeline<'a, S> {
    pub fn new(store: &'a S, config: &CentralityConfig) -> Self {
        Self {
            store,
            engine: CentralityEngine::new(config),
        }
    }

    /// Build, score and persist one team's passing network
    ///
    /// Each player is upserted independently; one failed upsert does not stop
    /// the others. `Err` means nothing was written (`Convergence`).
    ///
    /// Running the same (match, team) twice counts it twice.
    pub fn run(&self, events: &[Event], match_id: MatchId, team_id: TeamId) -> Result<Outcome> {
        let scores = match self.analyze(events, match_id, team_id) {
            Ok(scores) => scores,
            Err(PassnetError::InsufficientGraphData { nodes }) => {
                debug!(
                    "Skipping match {} team {}: {} node(s) in pass graph",
                    match_id, team_id, nodes
                );
                return Ok(Outcome::Skipped(SkipReason::InsufficientGraphData { nodes }));
            }
            Err(e) => return Err(e),
        };

        let entries: Vec<_> = scores.into_iter().collect();
        let total = entries.len();

        let failures: Vec<UpsertFailure> = entries
            .par_iter()
            .filter_map(|(player_id, player_scores)| {
                self.store
                    .upsert(*player_id, player_scores)
                    .err()
                    .map(|error| {
                        warn!(
                            "Upsert failed for player {} (match {} team {}): {}",
                            player_id, match_id, team_id, error
                        );
                        UpsertFailure {
                            player_id: *player_id,
                            error,
                        }
                    })
            })
            .collect();

        if failures.is_empty() {
            debug!(
                "Persisted {} players for match {} team {}",
                total, match_id, team_id
            );
            Ok(Outcome::Persisted { players: total })
        } else {
            Ok(Outcome::Failed {
                persisted: total - failures.len(),
                failures,
            })
        }
    }

    /// Decode raw event JSON, then [`run`](Self::run)
    ///
    /// A malformed record aborts before anything is computed or written.
    pub fn run_json(&self, json: &str, match_id: MatchId, team_id: TeamId) -> Result<Outcome> {
        let events = ingest::decode_events(json)?;
        self.run(&events, match_id, team_id)
    }

    /// Scores without touching the store
    pub fn analyze(
        &self,
        events: &[Event],
        match_id: MatchId,
        team_id: TeamId,
    ) -> Result<CentralityResult> {
        let graph = GraphBuilder::build(events, match_id, team_id);
        self.engine.compute(&graph)
    }
}
