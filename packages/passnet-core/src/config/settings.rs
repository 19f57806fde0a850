//! Section configs
//!
//! Each section validates its own ranges; `PassnetConfig::validate` runs all
//! of them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::{ConfigError, ConfigResult};

/// Centrality engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CentralityConfig {
    /// PageRank damping factor
    pub damping: f64,

    /// PageRank iteration cap
    pub max_iterations: usize,

    /// PageRank per-node convergence tolerance
    pub tolerance: f64,

    /// Divide betweenness by (n-1)(n-2)
    pub normalized_betweenness: bool,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
            normalized_betweenness: true,
        }
    }
}

impl CentralityConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::out_of_range(
                "centrality.damping",
                self.damping,
                "0 (exclusive)",
                "1 (exclusive)",
                "0.85 is the usual passing-network choice",
            ));
        }
        if self.max_iterations == 0 || self.max_iterations > 10_000 {
            return Err(ConfigError::out_of_range(
                "centrality.max_iterations",
                self.max_iterations,
                1,
                10_000,
                "PageRank gives up after this many sweeps",
            ));
        }
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(ConfigError::out_of_range(
                "centrality.tolerance",
                self.tolerance,
                "0 (exclusive)",
                "1 (exclusive)",
                "1e-6 converges well within 100 sweeps",
            ));
        }
        Ok(())
    }
}

/// Aggregate store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// SQLite busy handler timeout
    pub busy_timeout_ms: u64,

    /// Wait for an in-process connection slot
    pub lock_timeout_ms: u64,

    /// Pooled connections
    pub pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/graph_results.db"),
            busy_timeout_ms: 5_000,
            lock_timeout_ms: 5_000,
            pool_size: 4,
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("storage.busy_timeout_ms", self.busy_timeout_ms),
            ("storage.lock_timeout_ms", self.lock_timeout_ms),
        ] {
            if value == 0 || value > 600_000 {
                return Err(ConfigError::out_of_range(
                    field,
                    value,
                    1,
                    600_000,
                    "upserts give up after this wait",
                ));
            }
        }
        if self.pool_size == 0 || self.pool_size > 64 {
            return Err(ConfigError::out_of_range(
                "storage.pool_size",
                self.pool_size,
                1,
                64,
                "one SQLite connection per slot",
            ));
        }
        Ok(())
    }

    #[cfg(feature = "sqlite")]
    pub fn store_options(&self) -> passnet_storage::SqliteStoreOptions {
        passnet_storage::SqliteStoreOptions {
            busy_timeout: std::time::Duration::from_millis(self.busy_timeout_ms),
            lock_timeout: std::time::Duration::from_millis(self.lock_timeout_ms),
            pool_size: self.pool_size,
        }
    }
}

/// Parallel execution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Worker threads for the batch runner (0 = number of CPUs)
    pub num_threads: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self { num_threads: 0 }
    }
}

impl ParallelConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_threads > 1024 {
            return Err(ConfigError::out_of_range(
                "parallel.num_threads",
                self.num_threads,
                0,
                1024,
                "0 means one worker per CPU",
            ));
        }
        Ok(())
    }

    pub fn resolved_threads(&self) -> usize {
        if self.num_threads == 0 {
            num_cpus::get()
        } else {
            self.num_threads
        }
    }
}
