//! Store fixtures

use std::collections::HashSet;

use passnet_storage::{
    AggregateStore, CentralityScores, InMemoryAggregateStore, PlayerAggregate, PlayerId, Result,
    StorageError,
};

/// In-memory store that rejects upserts for chosen players
#[derive(Default)]
pub struct FailingStore {
    inner: InMemoryAggregateStore,
    failing: HashSet<PlayerId>,
}

impl FailingStore {
    pub fn failing_for(players: &[u64]) -> Self {
        Self {
            inner: InMemoryAggregateStore::new(),
            failing: players.iter().copied().map(PlayerId).collect(),
        }
    }
}

impl AggregateStore for FailingStore {
    fn upsert(&self, player_id: PlayerId, scores: &CentralityScores) -> Result<()> {
        if self.failing.contains(&player_id) {
            return Err(StorageError::database(format!(
                "simulated write failure for player {}",
                player_id
            )));
        }
        self.inner.upsert(player_id, scores)
    }

    fn get(&self, player_id: PlayerId) -> Result<Option<PlayerAggregate>> {
        self.inner.get(player_id)
    }

    fn list(&self) -> Result<Vec<PlayerAggregate>> {
        self.inner.list()
    }

    fn len(&self) -> Result<usize> {
        self.inner.len()
    }
}
