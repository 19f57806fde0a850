//! passnet-storage - Durable per-player centrality aggregates
//!
//! > "Sum every match once, normalize when reading."
//!
//! ## Core Principles
//!
//! 1. **Single record per player**: keyed by `PlayerId`, never deleted here
//! 2. **Atomic upsert**: create-or-merge is one step per key, no lost updates
//! 3. **No partial state**: a failed upsert leaves the previous record as it was
//!
//! ## Usage
//!
//! ```rust,ignore
//! use passnet_storage::{AggregateStore, CentralityScores, PlayerId, SqliteAggregateStore};
//!
//! let store = SqliteAggregateStore::open("data/graph_results.db", Default::default())?;
//! store.upsert(PlayerId(25413), &CentralityScores::new(0.08, 0.11, 57.0))?;
//!
//! let record = store.get(PlayerId(25413))?.expect("just written");
//! println!("{} games, {:.3} avg pagerank", record.games, record.per_game().avg_pagerank);
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{AggregateStore, CentralityScores, PerGameAverages, PlayerAggregate, PlayerId};

pub use infrastructure::InMemoryAggregateStore;
#[cfg(feature = "sqlite")]
pub use infrastructure::{SqliteAggregateStore, SqliteStoreOptions};
