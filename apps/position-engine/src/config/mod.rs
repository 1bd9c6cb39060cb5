//! Engine configuration.
//!
//! Loaded from YAML with serde field defaults; every default chooses the
//! safest behavior (broken structures block their close instructions).
//!
//! # Usage
//!
//! ```rust,ignore
//! use position_engine::config::{EngineConfig, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),
}

/// What to do with a group's close instructions when its structure is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokenStructureAction {
    /// Withhold close instructions; require operator confirmation.
    Block,
    /// Emit close instructions but flag the group.
    Warn,
}

impl Default for BrokenStructureAction {
    fn default() -> Self {
        // Safest option: a partial-structure close can leave undefined risk
        Self::Block
    }
}

/// Reconciliation pass configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Action for groups whose structure health is broken.
    #[serde(default)]
    pub on_broken_structure: BrokenStructureAction,
    /// Report positions claimed by no group.
    #[serde(default = "default_include_orphans")]
    pub include_orphans: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            on_broken_structure: BrokenStructureAction::default(),
            include_orphans: default_include_orphans(),
        }
    }
}

const fn default_include_orphans() -> bool {
    true
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Reconciliation pass configuration.
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

/// Load configuration from a YAML file.
///
/// Defaults to `config.yaml` in the working directory when no path is given.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, ConfigError> {
    let path = path.unwrap_or("config.yaml");
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_string(),
        source,
    })?;
    Ok(serde_yaml_bw::from_str(&content)?)
}
