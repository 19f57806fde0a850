//! Configuration I/O (YAML loading)
//!
//! Defines the YAML schema. Every section is optional; missing sections fall
//! back to their defaults.

use serde::{Deserialize, Serialize};

use super::settings::{CentralityConfig, ParallelConfig, StorageConfig};

/// Versions this build can read
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1). Optional here so a missing version
    /// can be reported precisely.
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centrality: Option<CentralityConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,
}
