//! Error types for configuration loading and player management
//!
//! The frame step itself never fails; these cover the edges around it.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::PlayerId;

/// Failure to load or validate a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Rejected change to the set of simulated players
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("player {0} already has a ship")]
    PlayerExists(PlayerId),
    #[error("player limit reached ({max})")]
    TooManyPlayers { max: usize },
}
