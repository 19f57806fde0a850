//! Event enrichment
//!
//! Per-player counting stats derived from event tags. These do not touch the
//! aggregate store; reports join them with the centrality averages.
//!
//! | Event     | Tag        | Counter            |
//! |-----------|------------|--------------------|
//! | Pass      | any        | `total_passes`     |
//! | Pass      | 1801       | `completed_passes` |
//! | Pass      | 301        | `assists`          |
//! | Shot      | 101        | `goals`            |
//! | Foul      | any        | `fouls_committed`  |
//! | any       | 1702       | `yellow_cards`     |
//! | any       | 1701, 1703 | `red_cards`        |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::models::{tags, Event, EventKind, PlayerId};

/// Counting stats for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEventStats {
    pub total_passes: u32,
    pub completed_passes: u32,
    pub assists: u32,
    pub goals: u32,
    pub fouls_committed: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

impl PlayerEventStats {
    /// Fold one event into the counters
    pub fn record(&mut self, event: &Event) {
        match event.kind {
            EventKind::Pass => {
                self.total_passes += 1;
                if event.has_tag(tags::ACCURATE) {
                    self.completed_passes += 1;
                }
                if event.has_tag(tags::ASSIST) {
                    self.assists += 1;
                }
            }
            EventKind::Shot if event.has_tag(tags::GOAL) => self.goals += 1,
            EventKind::Foul => self.fouls_committed += 1,
            _ => {}
        }

        if event.has_tag(tags::YELLOW_CARD) {
            self.yellow_cards += 1;
        }
        if event.has_tag(tags::RED_CARD) || event.has_tag(tags::SECOND_YELLOW_CARD) {
            self.red_cards += 1;
        }
    }

    /// Completed / total, `None` without passes
    pub fn pass_accuracy(&self) -> Option<f64> {
        (self.total_passes > 0)
            .then(|| f64::from(self.completed_passes) / f64::from(self.total_passes))
    }
}

/// Counting stats for every player appearing in `events`
pub fn collect_player_stats(events: &[Event]) -> BTreeMap<PlayerId, PlayerEventStats> {
    let mut stats: BTreeMap<PlayerId, PlayerEventStats> = BTreeMap::new();
    for event in events {
        stats.entry(event.player_id).or_default().record(event);
    }
    stats
}
