//! In-Memory Aggregate Store
//!
//! DashMap-backed implementation for tests and dry runs.
//! Nothing survives the process.
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{AggregateStore, CentralityScores, PlayerAggregate, PlayerId};
use crate::Result;

#[derive(Default)]
pub struct InMemoryAggregateStore {
    records: DashMap<PlayerId, PlayerAggregate>,
}

impl InMemoryAggregateStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

impl AggregateStore for InMemoryAggregateStore {
    fn upsert(&self, player_id: PlayerId, scores: &CentralityScores) -> Result<()> {
        scores.validate()?;

        // The entry holds the shard write lock for the whole check-and-merge.
        match self.records.entry(player_id) {
            Entry::Occupied(mut occupied) => occupied.get_mut().merge(scores),
            Entry::Vacant(vacant) => {
                vacant.insert(PlayerAggregate::first(player_id, scores));
            }
        }
        Ok(())
    }

    fn get(&self, player_id: PlayerId) -> Result<Option<PlayerAggregate>> {
        Ok(self.records.get(&player_id).map(|r| r.value().clone()))
    }

    fn list(&self) -> Result<Vec<PlayerAggregate>> {
        let mut records: Vec<PlayerAggregate> =
            self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.player_id);
        Ok(records)
    }

    fn len(&self) -> Result<usize> {
        Ok(self.records.len())
    }
}
