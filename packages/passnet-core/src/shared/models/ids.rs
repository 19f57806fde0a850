//! Canonical identifiers
//!
//! Every id is an unsigned integer newtype. Conversion from raw JSON happens
//! once, in `features::ingest`.

use serde::{Deserialize, Serialize};
use std::fmt;

pub use passnet_storage::PlayerId;

/// Match identifier (Wyscout `matchId` / `wyId`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

/// Team identifier (Wyscout `teamId`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit of pipeline work: a team's events in one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchTeam {
    pub match_id: MatchId,
    pub team_id: TeamId,
}

impl MatchTeam {
    pub fn new(match_id: MatchId, team_id: TeamId) -> Self {
        Self { match_id, team_id }
    }
}

impl fmt::Display for MatchTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "match {} / team {}", self.match_id, self.team_id)
    }
}
