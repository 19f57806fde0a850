//! Player ranking over per-game centrality averages
//!
//! Reads aggregates (never writes), divides by games played, drops players
//! below a minimum number of games and keeps the top `k`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::errors::PassnetError;
use passnet_storage::{PerGameAverages, PlayerAggregate};

/// Ranking key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Betweenness,
    PageRank,
    Degree,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Betweenness => "betweenness",
            Metric::PageRank => "pagerank",
            Metric::Degree => "degree",
        }
    }

    /// Per-game value of this metric
    pub fn value(&self, averages: &PerGameAverages) -> f64 {
        match self {
            Metric::Betweenness => averages.avg_betweenness,
            Metric::PageRank => averages.avg_pagerank,
            Metric::Degree => averages.avg_degree,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = PassnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "betweenness" => Ok(Metric::Betweenness),
            "pagerank" => Ok(Metric::PageRank),
            "degree" => Ok(Metric::Degree),
            other => Err(PassnetError::malformed(format!(
                "unknown metric '{}' (expected betweenness, pagerank or degree)",
                other
            ))),
        }
    }
}

/// Top `limit` players by per-game `metric`, among those with `games >= min_games`
///
/// Highest value first; equal values keep player id order.
pub fn rank(
    aggregates: &[PlayerAggregate],
    metric: Metric,
    min_games: u32,
    limit: usize,
) -> Vec<PerGameAverages> {
    let mut eligible: Vec<PerGameAverages> = aggregates
        .iter()
        .filter(|record| record.games >= min_games)
        .map(PlayerAggregate::per_game)
        .collect();

    eligible.sort_by(|a, b| {
        metric
            .value(b)
            .partial_cmp(&metric.value(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    eligible.truncate(limit);
    eligible
}
