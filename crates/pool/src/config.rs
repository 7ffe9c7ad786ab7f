//! Pool configuration loaded from TOML

use std::path::Path;

use bracket_core::PointsTable;
use serde::{Deserialize, Serialize};

use crate::error::PoolError;

/// Service-wide settings
///
/// ```toml
/// log_level = "debug"
/// points_by_round = [1, 2, 4, 8, 16, 32]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Default points per round for pools that do not set their own
    pub points_by_round: Option<Vec<u32>>,
    /// Filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            points_by_round: None,
            log_level: "info".to_string(),
        }
    }
}

impl PoolConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, PoolError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, PoolError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PoolError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load config, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, PoolError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Points for a bracket of `rounds` rounds: pool override, then this
    /// config, then 1 point doubling each round.
    pub fn points_table(&self, pool_override: Option<&[u32]>, rounds: u32) -> PointsTable {
        match pool_override.or(self.points_by_round.as_deref()) {
            Some(points) => PointsTable::new(points.to_vec()),
            None => PointsTable::doubling(rounds),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
