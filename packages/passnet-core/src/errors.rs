//! Error types for passnet-core
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

use crate::config::ConfigError;
use passnet_storage::StorageError;

/// Main error type for passnet operations
#[derive(Debug, Error)]
pub enum PassnetError {
    /// Graph too small to rank players (fewer than two distinct participants)
    #[error("Insufficient graph data: {nodes} node(s), at least 2 required")]
    InsufficientGraphData { nodes: usize },

    /// Input record has a field of the wrong type or shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// PageRank power iteration did not settle
    #[error("PageRank did not converge within {iterations} iterations")]
    Convergence { iterations: usize },

    /// Aggregate store could not apply an operation
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StorageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PassnetError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        PassnetError::MalformedInput(msg.into())
    }

    /// Expected outcome for tiny graphs, not an operator-facing failure
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, PassnetError::InsufficientGraphData { .. })
    }
}

/// Result type alias for passnet operations
pub type Result<T> = std::result::Result<T, PassnetError>;
