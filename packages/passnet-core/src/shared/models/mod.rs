//! Shared models used by every feature

pub mod event;
pub mod ids;

pub use event::{tags, Event, EventKind};
pub use ids::{MatchId, MatchTeam, PlayerId, TeamId};
