//! Configuration system
//!
//! Two layers:
//! - Defaults (`PassnetConfig::default()`), good enough for a single season
//! - YAML file (`version: 1`), any section may be omitted
//!
//! CLI flags override both (see `bin/passnet.rs`).
//!
//! # Examples
//!
//! ```rust,ignore
//! use passnet_core::config::PassnetConfig;
//!
//! let config = PassnetConfig::from_yaml("passnet.yaml")?;
//! assert_eq!(config.centrality.damping, 0.85);
//! ```

pub mod error;
pub mod io;
pub mod settings;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, SUPPORTED_VERSIONS};
pub use settings::{CentralityConfig, ParallelConfig, StorageConfig};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassnetConfig {
    pub centrality: CentralityConfig,
    pub storage: StorageConfig,
    pub parallel: ParallelConfig,
}

impl PassnetConfig {
    /// Load and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            centrality: file.centrality.unwrap_or_default(),
            storage: file.storage.unwrap_or_default(),
            parallel: file.parallel.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Export as YAML v1
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            centrality: Some(self.centrality.clone()),
            storage: Some(self.storage.clone()),
            parallel: Some(self.parallel.clone()),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.centrality.validate()?;
        self.storage.validate()?;
        self.parallel.validate()?;
        Ok(())
    }
}
