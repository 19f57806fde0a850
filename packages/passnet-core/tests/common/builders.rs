//! Test data builders

use passnet_core::shared::models::{Event, EventKind, MatchId, PlayerId, TeamId};

/// Builder for one match's event stream
///
/// Ordinals are assigned in call order across teams, like a real feed.
#[derive(Debug)]
pub struct EventStreamBuilder {
    match_id: MatchId,
    team_id: TeamId,
    next_ordinal: u64,
    events: Vec<Event>,
}

impl EventStreamBuilder {
    pub fn new(match_id: u64, team_id: u64) -> Self {
        Self {
            match_id: MatchId(match_id),
            team_id: TeamId(team_id),
            next_ordinal: 0,
            events: Vec::new(),
        }
    }

    /// Subsequent events belong to `team_id`
    pub fn team(mut self, team_id: u64) -> Self {
        self.team_id = TeamId(team_id);
        self
    }

    /// Add an event of any kind
    pub fn event(mut self, player: u64, kind: EventKind, tags: &[u32]) -> Self {
        let event = Event::new(
            self.match_id,
            self.team_id,
            PlayerId(player),
            kind,
            self.next_ordinal,
        )
        .with_tags(tags.iter().copied());
        self.next_ordinal += 1;
        self.events.push(event);
        self
    }

    /// Add one untagged pass
    pub fn pass(self, player: u64) -> Self {
        self.event(player, EventKind::Pass, &[])
    }

    /// Add a pass per player, in order
    pub fn passes(self, players: &[u64]) -> Self {
        players.iter().fold(self, |builder, &p| builder.pass(p))
    }

    pub fn build(self) -> Vec<Event> {
        self.events
    }
}

/// Passes only, one team, ordinals 0..
pub fn pass_sequence(match_id: u64, team_id: u64, players: &[u64]) -> Vec<Event> {
    EventStreamBuilder::new(match_id, team_id)
        .passes(players)
        .build()
}
