//! Pipeline outcome types

use serde::Serialize;
use std::fmt;

use crate::shared::models::PlayerId;
use passnet_storage::StorageError;

/// Why a (match, team) produced no scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// Fewer than two players in the pass graph
    InsufficientGraphData { nodes: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InsufficientGraphData { nodes } => {
                write!(f, "insufficient graph data ({} node(s))", nodes)
            }
        }
    }
}

/// One player whose upsert did not apply
#[derive(Debug)]
pub struct UpsertFailure {
    pub player_id: PlayerId,
    pub error: StorageError,
}

impl fmt::Display for UpsertFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}: {}", self.player_id, self.error)
    }
}

/// Result of running one (match, team) through the pipeline
#[derive(Debug)]
pub enum Outcome {
    /// Every player's scores were folded into the store
    Persisted { players: usize },

    /// Nothing computed, store untouched
    Skipped(SkipReason),

    /// Some upserts failed; the rest were persisted. Failures are ordered by
    /// player id.
    Failed {
        persisted: usize,
        failures: Vec<UpsertFailure>,
    },
}

impl Outcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Outcome::Persisted { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    /// Players whose upsert applied
    pub fn persisted_players(&self) -> usize {
        match self {
            Outcome::Persisted { players } => *players,
            Outcome::Skipped(_) => 0,
            Outcome::Failed { persisted, .. } => *persisted,
        }
    }

    pub fn failures(&self) -> &[UpsertFailure] {
        match self {
            Outcome::Failed { failures, .. } => failures,
            _ => &[],
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Persisted { players } => write!(f, "persisted {} players", players),
            Outcome::Skipped(reason) => write!(f, "skipped: {}", reason),
            Outcome::Failed {
                persisted,
                failures,
            } => write!(
                f,
                "failed: {} persisted, {} failed",
                persisted,
                failures.len()
            ),
        }
    }
}
