//! Domain layer for the per-player aggregate store
//!
//! # Core Principles
//!
//! 1. **One record per player**: `player_id` is the only key
//! 2. **Sum, don't average**: records hold running totals plus a games counter;
//!    per-game normalization belongs to the reader
//! 3. **Atomic upsert**: existence check and create-or-merge are one step
//!
//! # Domain Models
//!
//! - `PlayerId`: canonical player identifier
//! - `CentralityScores`: one match's (betweenness, pagerank, degree) triple
//! - `PlayerAggregate`: the persistent running record
//!
//! # Port Trait
//!
//! - `AggregateStore`: primary storage abstraction
//!
//! # Examples
//!
//! ```rust
//! use passnet_storage::{AggregateStore, CentralityScores, InMemoryAggregateStore, PlayerId};
//!
//! let store = InMemoryAggregateStore::new();
//! store.upsert(PlayerId(7), &CentralityScores::new(0.1, 0.2, 3.0)).unwrap();
//! store.upsert(PlayerId(7), &CentralityScores::new(0.3, 0.1, 1.0)).unwrap();
//!
//! let record = store.get(PlayerId(7)).unwrap().unwrap();
//! assert_eq!(record.games, 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Result, StorageError};

// ═══════════════════════════════════════════════════════════════════════════
// Domain Models
// ═══════════════════════════════════════════════════════════════════════════

/// Canonical player identifier
///
/// Raw sources disagree on whether ids are strings or integers; everything
/// past the ingest boundary uses this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(value: u64) -> Self {
        PlayerId(value)
    }
}

/// Centrality triple for one player in one (match, team) graph
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CentralityScores {
    /// Weighted shortest-path betweenness (normalized)
    pub betweenness: f64,
    /// Weighted PageRank
    pub pagerank: f64,
    /// Sum of incoming and outgoing edge weights
    pub degree: f64,
}

impl CentralityScores {
    pub fn new(betweenness: f64, pagerank: f64, degree: f64) -> Self {
        Self {
            betweenness,
            pagerank,
            degree,
        }
    }

    /// Reject values that would break the non-decreasing totals invariant.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("betweenness", self.betweenness),
            ("pagerank", self.pagerank),
            ("degree", self.degree),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(StorageError::invalid_record(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Persistent per-player record
///
/// Created on the first upsert for a player and merged into by every later
/// one. `games >= 1` whenever a record exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAggregate {
    pub player_id: PlayerId,
    /// Number of (match, team) graphs folded into this record
    pub games: u32,
    pub cumulative_betweenness: f64,
    pub cumulative_pagerank: f64,
    pub cumulative_degree: f64,
}

impl PlayerAggregate {
    /// First appearance of a player
    pub fn first(player_id: PlayerId, scores: &CentralityScores) -> Self {
        Self {
            player_id,
            games: 1,
            cumulative_betweenness: scores.betweenness,
            cumulative_pagerank: scores.pagerank,
            cumulative_degree: scores.degree,
        }
    }

    /// Fold one more match into the running totals
    pub fn merge(&mut self, scores: &CentralityScores) {
        self.games += 1;
        self.cumulative_betweenness += scores.betweenness;
        self.cumulative_pagerank += scores.pagerank;
        self.cumulative_degree += scores.degree;
    }

    /// Totals divided by games played
    pub fn per_game(&self) -> PerGameAverages {
        let games = f64::from(self.games.max(1));
        PerGameAverages {
            player_id: self.player_id,
            games: self.games,
            avg_betweenness: self.cumulative_betweenness / games,
            avg_pagerank: self.cumulative_pagerank / games,
            avg_degree: self.cumulative_degree / games,
        }
    }
}

/// Per-game view of a [`PlayerAggregate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerGameAverages {
    pub player_id: PlayerId,
    pub games: u32,
    pub avg_betweenness: f64,
    pub avg_pagerank: f64,
    pub avg_degree: f64,
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait: AggregateStore
// ═══════════════════════════════════════════════════════════════════════════

/// Durable keyed accumulator of per-player centrality totals
///
/// # Contract
///
/// - `upsert` is the only mutator. For an unknown player it creates a record
///   with `games = 1`; for a known player it adds one game and the supplied
///   scores. Both branches are a single atomic step per `player_id`.
/// - Upserts for the same player never lose an update under contention;
///   upserts for different players may run in parallel.
/// - A failed upsert leaves the previous record untouched.
/// - The store does not deduplicate by match. Feeding the same match twice
///   counts it twice.
///
/// # Implementations
///
/// - `InMemoryAggregateStore`: DashMap, for tests and dry runs
/// - `SqliteAggregateStore`: durable `node_data` table
pub trait AggregateStore: Send + Sync {
    /// Create-or-merge one match's scores into the player's record
    ///
    /// # Errors
    ///
    /// - `InvalidRecord` if any score is negative or not finite
    /// - `Timeout` if the bounded wait for the key expires
    /// - `Database` / `Transaction` if the backend rejects the write
    fn upsert(&self, player_id: PlayerId, scores: &CentralityScores) -> Result<()>;

    /// Get a player's record, `None` if the player was never upserted
    fn get(&self, player_id: PlayerId) -> Result<Option<PlayerAggregate>>;

    /// All records ordered by player id
    fn list(&self) -> Result<Vec<PlayerAggregate>>;

    /// Number of players with a record
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
