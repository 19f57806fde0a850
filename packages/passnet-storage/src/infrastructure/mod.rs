//! Infrastructure layer - Storage adapters
//!
//! - In-memory adapter (DashMap)
//! - SQLite adapter (durable)

pub mod memory_store;
pub use memory_store::InMemoryAggregateStore;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteAggregateStore, SqliteStoreOptions};
