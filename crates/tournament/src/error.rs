//! Errors for loading and running an event

use std::path::PathBuf;

use bracket_core::{BracketError, ConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse event config {}: {}", .path.display(), .source)]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("column `{0}` not found in header row")]
    MissingColumn(String),

    #[error("transition #{index}: {reason}")]
    InvalidTransition { index: usize, reason: String },

    #[error("schedule entry `{0}` does not name a heat")]
    InvalidSchedule(String),

    #[error("no results supplied for round {0}")]
    MissingRound(u8),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bracket(#[from] BracketError),
}

impl EventError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EventError::Io {
            path: path.into(),
            source,
        }
    }
}
