//! Event model
//!
//! One recorded on-ball action. Events are immutable and owned by the loader;
//! graph building only reads them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::ids::{MatchId, PlayerId, TeamId};

/// Wyscout tag codes consumed by the enrichment step
pub mod tags {
    pub const GOAL: u32 = 101;
    pub const ASSIST: u32 = 301;
    pub const RED_CARD: u32 = 1701;
    pub const YELLOW_CARD: u32 = 1702;
    pub const SECOND_YELLOW_CARD: u32 = 1703;
    pub const ACCURATE: u32 = 1801;
}

/// Event type (Wyscout `eventName`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Pass,
    Shot,
    Foul,
    Duel,
    FreeKick,
    Offside,
    OthersOnTheBall,
    Interruption,
    GoalkeeperLeavingLine,
    SaveAttempt,
    Other(String),
}

impl EventKind {
    /// Map a raw event name; unknown names are kept verbatim
    pub fn from_name(name: &str) -> Self {
        match name {
            "Pass" => EventKind::Pass,
            "Shot" => EventKind::Shot,
            "Foul" => EventKind::Foul,
            "Duel" => EventKind::Duel,
            "Free Kick" => EventKind::FreeKick,
            "Offside" => EventKind::Offside,
            "Others on the ball" => EventKind::OthersOnTheBall,
            "Interruption" => EventKind::Interruption,
            "Goalkeeper leaving line" => EventKind::GoalkeeperLeavingLine,
            "Save attempt" => EventKind::SaveAttempt,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Pass => "Pass",
            EventKind::Shot => "Shot",
            EventKind::Foul => "Foul",
            EventKind::Duel => "Duel",
            EventKind::FreeKick => "Free Kick",
            EventKind::Offside => "Offside",
            EventKind::OthersOnTheBall => "Others on the ball",
            EventKind::Interruption => "Interruption",
            EventKind::GoalkeeperLeavingLine => "Goalkeeper leaving line",
            EventKind::SaveAttempt => "Save attempt",
            EventKind::Other(name) => name,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub match_id: MatchId,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub kind: EventKind,
    /// Position within the match stream; only the relative order matters
    pub ordinal: u64,
    pub tags: BTreeSet<u32>,
}

impl Event {
    pub fn new(
        match_id: MatchId,
        team_id: TeamId,
        player_id: PlayerId,
        kind: EventKind,
        ordinal: u64,
    ) -> Self {
        Self {
            match_id,
            team_id,
            player_id,
            kind,
            ordinal,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = u32>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub fn is_pass(&self) -> bool {
        self.kind == EventKind::Pass
    }

    pub fn has_tag(&self, code: u32) -> bool {
        self.tags.contains(&code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::from_name("Pass"), EventKind::Pass);
        assert_eq!(EventKind::from_name("Free Kick"), EventKind::FreeKick);
        assert_eq!(
            EventKind::from_name("Penalty"),
            EventKind::Other("Penalty".to_string())
        );
        assert_eq!(EventKind::from_name("Save attempt").as_str(), "Save attempt");
    }

    #[test]
    fn test_event_tags() {
        let event = Event::new(MatchId(1), TeamId(2), PlayerId(3), EventKind::Pass, 0)
            .with_tags([tags::ACCURATE, tags::ASSIST]);

        assert!(event.is_pass());
        assert!(event.has_tag(1801));
        assert!(event.has_tag(301));
        assert!(!event.has_tag(tags::GOAL));
    }
}
