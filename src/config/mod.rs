//! Configuration module for telemetry-replay
//!
//! This module is organized into submodules:
//! - `defaults` - Default constants and values
//! - `args` - CLI argument definitions
//! - `file` - TOML configuration file
//! - `merge` - Layering of file values under CLI values
//! - `broker` - Broker address parsing and connection settings

mod args;
mod broker;
mod defaults;
pub mod file;
mod merge;

// Re-export submodule types
pub use args::ReplayArgs;
pub use broker::{generate_client_id, BrokerAddress, BrokerConfig};
pub use defaults::*;
pub use file::ConfigFile;
pub use merge::merge_config_with_args;

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ReplayError, Result};

/// Complete configuration for one replay run.
///
/// Built from [`ReplayArgs`] after the config file has been merged in, so
/// every required option is either present here or the run never starts.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Broker connection settings
    pub broker: BrokerConfig,

    /// Log file to replay
    pub log_file: PathBuf,

    /// Debug-level logging
    pub verbose: bool,

    /// Speed multiplier applied to every inter-event gap
    pub speed: f64,

    /// Interval at which a stalled publish re-checks the connection
    pub connection_poll: Duration,
}

impl ReplayConfig {
    /// Create configuration from parsed (and merged) CLI arguments
    pub fn from_args(args: ReplayArgs) -> Result<Self> {
        let broker_url = args
            .mqtt_broker
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ReplayError::missing_option("--mqttbroker"))?;
        let log_file = args
            .log_file
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| ReplayError::missing_option("--logfile"))?;

        let address: BrokerAddress = broker_url.parse()?;

        if !args.speed.is_finite() || args.speed <= 0.0 {
            return Err(ReplayError::invalid_setting(
                "speed",
                format!("must be a positive number, got {}", args.speed),
            ));
        }

        let mut broker = BrokerConfig::new(address);
        if let Some(client_id) = args.client_id {
            broker.client_id = client_id;
        }
        broker.username = args.username;
        broker.password = args.password;
        broker.keep_alive = Duration::from_secs(args.keep_alive_secs);
        broker.reconnect_period = Duration::from_millis(args.reconnect_period_ms);
        broker.connect_timeout = Duration::from_millis(args.connect_timeout_ms);

        Ok(Self {
            broker,
            log_file,
            verbose: args.verbose,
            speed: args.speed.max(MIN_SPEED),
            connection_poll: Duration::from_millis(args.connection_poll_ms),
        })
    }

    /// Validate the resolved configuration
    pub fn validate(&self) -> Result<()> {
        if self.broker.client_id.trim().is_empty() {
            return Err(ReplayError::invalid_setting(
                "client_id",
                "must not be empty",
            ));
        }

        if self.connection_poll.is_zero() {
            return Err(ReplayError::invalid_setting(
                "connection_poll_ms",
                "must be greater than 0",
            ));
        }

        if self.broker.reconnect_period.is_zero() {
            return Err(ReplayError::invalid_setting(
                "reconnect_period_ms",
                "must be greater than 0",
            ));
        }

        if self.broker.connect_timeout.is_zero() {
            return Err(ReplayError::invalid_setting(
                "connect_timeout_ms",
                "must be greater than 0",
            ));
        }

        if self.broker.keep_alive < Duration::from_secs(5) {
            return Err(ReplayError::invalid_setting(
                "keep_alive_secs",
                "must be at least 5 seconds",
            ));
        }

        Ok(())
    }
}
