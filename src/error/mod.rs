//! Error types for telemetry-replay
//!
//! Setup failures (configuration, input file) are fatal and reported to the
//! user before anything else happens. Broker flakiness during a run is not
//! an error at this level; it is absorbed by the connection gate.

use std::path::PathBuf;

use thiserror::Error;

mod domain;
mod hints;

pub use domain::{ConfigError, TransportError};
pub use hints::ErrorHint;

/// Result type alias for replay operations
pub type Result<T> = std::result::Result<T, ReplayError>;

/// Main error type for telemetry-replay
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Log file {path:?} does not exist or is not readable: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Replay error: {0}")]
    Replay(String),
}

impl ReplayError {
    /// Create an input error for an unreadable log file
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReplayError::Input {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error for a missing required option
    pub fn missing_option(option: &str) -> Self {
        ReplayError::Config(ConfigError::missing(option))
    }

    /// Create a configuration error for an invalid setting
    pub fn invalid_setting(setting: &str, reason: impl Into<String>) -> Self {
        ReplayError::Config(ConfigError::invalid_setting(setting, reason))
    }

    /// Whether this error happened before any side effect (usage should be shown)
    pub fn is_config(&self) -> bool {
        matches!(self, ReplayError::Config(_))
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            ReplayError::Config(_) => 2,
            _ => 1,
        }
    }
}
