//! SQLite adapter for AggregateStore
//!
//! - Table `node_data`, one row per player, with the column names the
//!   downstream analytics read
//! - Upsert is a single `INSERT ... ON CONFLICT DO UPDATE` inside an
//!   IMMEDIATE transaction; a dropped transaction rolls back
//! - Small connection pool; a player id always maps to the same connection

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::{AggregateStore, CentralityScores, PlayerAggregate, PlayerId};
use crate::{Result, StorageError};

const UPSERT_SQL: &str = "INSERT INTO node_data
        (player_id, games, score_betweenness, score_pagerank, score_degree)
     VALUES (?1, 1, ?2, ?3, ?4)
     ON CONFLICT(player_id) DO UPDATE SET
        games = games + 1,
        score_betweenness = score_betweenness + excluded.score_betweenness,
        score_pagerank = score_pagerank + excluded.score_pagerank,
        score_degree = score_degree + excluded.score_degree";

const SELECT_COLUMNS: &str =
    "SELECT player_id, games, score_betweenness, score_pagerank, score_degree FROM node_data";

/// Connection settings for [`SqliteAggregateStore`]
#[derive(Debug, Clone)]
pub struct SqliteStoreOptions {
    /// SQLite busy handler timeout (waiting for another writer)
    pub busy_timeout: Duration,
    /// Maximum wait for an in-process connection slot
    pub lock_timeout: Duration,
    /// Number of pooled connections (file databases only)
    pub pool_size: usize,
}

impl Default for SqliteStoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(5),
            lock_timeout: Duration::from_secs(5),
            pool_size: 4,
        }
    }
}

/// SQLite-based AggregateStore implementation
pub struct SqliteAggregateStore {
    connections: Vec<Mutex<Connection>>,
    options: SqliteStoreOptions,
}

impl SqliteAggregateStore {
    /// Open (or create) the store at the given path
    pub fn open(db_path: impl AsRef<Path>, options: SqliteStoreOptions) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pool_size = options.pool_size.max(1);
        let mut connections = Vec::with_capacity(pool_size);
        for slot in 0..pool_size {
            let conn = Connection::open(db_path)?;
            conn.busy_timeout(options.busy_timeout)?;
            if slot == 0 {
                let mode: String =
                    conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
                debug!("SQLite journal mode: {}", mode);
                Self::init_schema(&conn)?;
            }
            connections.push(Mutex::new(conn));
        }

        info!(
            "Opened aggregate store at {} ({} connections)",
            db_path.display(),
            pool_size
        );
        Ok(Self {
            connections,
            options,
        })
    }

    /// Create an in-memory SQLite store (for testing)
    ///
    /// In-memory databases are private to their connection, so the pool is
    /// always a single connection.
    pub fn in_memory() -> Result<Self> {
        let options = SqliteStoreOptions {
            pool_size: 1,
            ..Default::default()
        };
        let conn = Connection::open_in_memory()?;
        conn.busy_timeout(options.busy_timeout)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            connections: vec![Mutex::new(conn)],
            options,
        })
    }

    /// Initialize database schema
    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS node_data (
                player_id INTEGER PRIMARY KEY,
                games INTEGER NOT NULL CHECK (games >= 1),
                score_betweenness REAL NOT NULL,
                score_pagerank REAL NOT NULL,
                score_degree REAL NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn slot(&self, player_id: PlayerId) -> usize {
        (player_id.0 % self.connections.len() as u64) as usize
    }

    fn acquire(&self, slot: usize) -> Result<parking_lot::MutexGuard<'_, Connection>> {
        self.connections[slot]
            .try_lock_for(self.options.lock_timeout)
            .ok_or_else(|| {
                StorageError::timeout(format!(
                    "connection slot {} not available within {:?}",
                    slot, self.options.lock_timeout
                ))
            })
    }

    fn row_to_aggregate(row: &rusqlite::Row<'_>) -> rusqlite::Result<PlayerAggregate> {
        let player_id: i64 = row.get(0)?;
        Ok(PlayerAggregate {
            player_id: PlayerId(player_id as u64),
            games: row.get(1)?,
            cumulative_betweenness: row.get(2)?,
            cumulative_pagerank: row.get(3)?,
            cumulative_degree: row.get(4)?,
        })
    }
}

fn sql_key(player_id: PlayerId) -> Result<i64> {
    i64::try_from(player_id.0).map_err(|_| {
        StorageError::invalid_record(format!(
            "player id {} does not fit an SQLite integer key",
            player_id
        ))
    })
}

impl AggregateStore for SqliteAggregateStore {
    fn upsert(&self, player_id: PlayerId, scores: &CentralityScores) -> Result<()> {
        scores.validate()?;
        let key = sql_key(player_id)?;

        let mut conn = self.acquire(self.slot(player_id))?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            UPSERT_SQL,
            params![key, scores.betweenness, scores.pagerank, scores.degree],
        )?;
        tx.commit().map_err(|e| {
            StorageError::transaction(format!("commit failed for player {}: {}", player_id, e))
                .with_source(e)
        })?;
        Ok(())
    }

    fn get(&self, player_id: PlayerId) -> Result<Option<PlayerAggregate>> {
        let key = sql_key(player_id)?;
        let conn = self.acquire(self.slot(player_id))?;
        let result = conn
            .query_row(
                &format!("{} WHERE player_id = ?1", SELECT_COLUMNS),
                params![key],
                Self::row_to_aggregate,
            )
            .optional()?;
        Ok(result)
    }

    fn list(&self) -> Result<Vec<PlayerAggregate>> {
        let conn = self.acquire(0)?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY player_id", SELECT_COLUMNS))?;
        let records = stmt
            .query_map([], Self::row_to_aggregate)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn len(&self) -> Result<usize> {
        let conn = self.acquire(0)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM node_data", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rayon::prelude::*;
    use tempfile::TempDir;

    fn file_store(dir: &TempDir) -> (SqliteAggregateStore, std::path::PathBuf) {
        let path = dir.path().join("graph_results.db");
        let store = SqliteAggregateStore::open(&path, SqliteStoreOptions::default()).unwrap();
        (store, path)
    }

    #[test]
    fn test_upsert_new_then_returning() {
        let store = SqliteAggregateStore::in_memory().unwrap();
        store
            .upsert(PlayerId(8), &CentralityScores::new(0.1, 0.2, 3.0))
            .unwrap();
        store
            .upsert(PlayerId(8), &CentralityScores::new(0.3, 0.1, 1.0))
            .unwrap();

        let record = store.get(PlayerId(8)).unwrap().unwrap();
        assert_eq!(record.games, 2);
        assert!((record.cumulative_betweenness - 0.4).abs() < 1e-9);
        assert!((record.cumulative_pagerank - 0.3).abs() < 1e-9);
        assert!((record.cumulative_degree - 4.0).abs() < 1e-9);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_get_missing() {
        let store = SqliteAggregateStore::in_memory().unwrap();
        assert!(store.get(PlayerId(1)).unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let (store, path) = file_store(&dir);
        store
            .upsert(PlayerId(3344), &CentralityScores::new(0.05, 0.12, 41.0))
            .unwrap();
        drop(store);

        let reopened = SqliteAggregateStore::open(&path, SqliteStoreOptions::default()).unwrap();
        let record = reopened.get(PlayerId(3344)).unwrap().unwrap();
        assert_eq!(record.games, 1);
        assert_eq!(record.cumulative_degree, 41.0);
    }

    #[test]
    fn test_failed_update_rolls_back() {
        let dir = TempDir::new().unwrap();
        let (store, path) = file_store(&dir);
        store
            .upsert(PlayerId(7), &CentralityScores::new(0.1, 0.2, 3.0))
            .unwrap();

        // Abort after the row was rewritten: the statement and its transaction
        // must both be undone.
        let saboteur = Connection::open(&path).unwrap();
        saboteur
            .execute_batch(
                "CREATE TRIGGER fail_player_7 AFTER UPDATE ON node_data
                 WHEN NEW.player_id = 7
                 BEGIN SELECT RAISE(ABORT, 'simulated disk failure'); END;",
            )
            .unwrap();
        drop(saboteur);

        let err = store
            .upsert(PlayerId(7), &CentralityScores::new(0.3, 0.1, 1.0))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(err.message.contains("simulated disk failure"));

        let record = store.get(PlayerId(7)).unwrap().unwrap();
        assert_eq!(record.games, 1);
        assert_eq!(record.cumulative_betweenness, 0.1);
        assert_eq!(record.cumulative_pagerank, 0.2);
        assert_eq!(record.cumulative_degree, 3.0);

        // Other keys are unaffected by the failing trigger.
        store
            .upsert(PlayerId(8), &CentralityScores::new(0.3, 0.1, 1.0))
            .unwrap();
        assert_eq!(store.get(PlayerId(8)).unwrap().unwrap().games, 1);
    }

    #[test]
    fn test_failed_insert_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let (store, path) = file_store(&dir);

        let saboteur = Connection::open(&path).unwrap();
        saboteur
            .execute_batch(
                "CREATE TRIGGER fail_insert AFTER INSERT ON node_data
                 BEGIN SELECT RAISE(ABORT, 'insert refused'); END;",
            )
            .unwrap();
        drop(saboteur);

        assert!(store
            .upsert(PlayerId(1), &CentralityScores::new(0.0, 0.5, 2.0))
            .is_err());
        assert!(store.get(PlayerId(1)).unwrap().is_none());
    }

    #[test]
    fn test_invalid_scores_rejected() {
        let store = SqliteAggregateStore::in_memory().unwrap();
        let err = store
            .upsert(PlayerId(1), &CentralityScores::new(0.0, f64::NAN, 1.0))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRecord);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_oversized_player_id_rejected() {
        let store = SqliteAggregateStore::in_memory().unwrap();
        let err = store
            .upsert(PlayerId(u64::MAX), &CentralityScores::default())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRecord);
    }

    #[test]
    fn test_busy_slot_times_out() {
        let mut store = SqliteAggregateStore::in_memory().unwrap();
        store.options.lock_timeout = Duration::from_millis(20);

        let _held = store.connections[0].lock();
        let err = store
            .upsert(PlayerId(1), &CentralityScores::default())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
    }

    #[test]
    fn test_foreign_writer_busy_is_timeout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("graph_results.db");
        let options = SqliteStoreOptions {
            busy_timeout: Duration::from_millis(50),
            pool_size: 1,
            ..Default::default()
        };
        let store = SqliteAggregateStore::open(&path, options).unwrap();

        let mut other = Connection::open(&path).unwrap();
        let writer = other
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .unwrap();

        let err = store
            .upsert(PlayerId(1), &CentralityScores::new(0.1, 0.2, 3.0))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
        assert!(err.is_retryable());

        writer.rollback().unwrap();
        store
            .upsert(PlayerId(1), &CentralityScores::new(0.1, 0.2, 3.0))
            .unwrap();
        assert_eq!(store.get(PlayerId(1)).unwrap().unwrap().games, 1);
    }

    #[test]
    fn test_concurrent_upserts_same_player() {
        let dir = TempDir::new().unwrap();
        let (store, _path) = file_store(&dir);

        (0..200u64).into_par_iter().for_each(|i| {
            store
                .upsert(PlayerId(i % 3), &CentralityScores::new(0.01, 0.01, 1.0))
                .unwrap();
        });

        let games: Vec<u32> = store.list().unwrap().iter().map(|r| r.games).collect();
        assert_eq!(games, vec![67, 67, 66]);
        let total_degree: f64 = store
            .list()
            .unwrap()
            .iter()
            .map(|r| r.cumulative_degree)
            .sum();
        assert!((total_degree - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_list_ordered_by_player() {
        let store = SqliteAggregateStore::in_memory().unwrap();
        for id in [42, 7, 19] {
            store
                .upsert(PlayerId(id), &CentralityScores::new(0.0, 0.1, 1.0))
                .unwrap();
        }
        let ids: Vec<u64> = store.list().unwrap().iter().map(|r| r.player_id.0).collect();
        assert_eq!(ids, vec![7, 19, 42]);
    }
}
