//! Configuration file support for telemetry-replay
//!
//! This module provides TOML configuration file parsing and merging with CLI arguments.
//!
//! ## Priority Order
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values
//!
//! ## Example Configuration
//!
//! ```toml
//! # telemetry-replay.toml
//!
//! [broker]
//! url = "mqtt://localhost:1883"
//! username = "iot"
//! password = "welcome1"
//! reconnect_period_ms = 1000
//! connect_timeout_ms = 30000
//!
//! [replay]
//! logfile = "/var/log/devices/line-1.log"
//! speed = 1.0
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::defaults::DEFAULT_CONFIG_FILE_NAME;
use crate::error::{ConfigError, Result};

/// Root configuration structure for TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Broker connection configuration
    pub broker: BrokerSection,

    /// Replay configuration
    pub replay: ReplaySection,
}

/// Broker section configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrokerSection {
    /// Broker address
    pub url: Option<String>,

    /// Username
    pub username: Option<String>,

    /// Password
    pub password: Option<String>,

    /// MQTT client identifier
    pub client_id: Option<String>,

    /// Keep-alive in seconds
    pub keep_alive_secs: Option<u64>,

    /// Delay between reconnect attempts (ms)
    pub reconnect_period_ms: Option<u64>,

    /// Upper bound for one connection attempt (ms)
    pub connect_timeout_ms: Option<u64>,
}

/// Replay section configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReplaySection {
    /// Log file to replay
    pub logfile: Option<PathBuf>,

    /// Speed multiplier
    pub speed: Option<f64>,

    /// Connection re-check interval (ms)
    pub connection_poll_ms: Option<u64>,

    /// Verbose logging
    pub verbose: Option<bool>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::from(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Ok(toml::from_str(&contents).map_err(|e| {
            ConfigError::from(format!("Failed to parse config file {:?}: {}", path, e))
        })?)
    }

    /// Try to load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./telemetry-replay.toml
    /// 2. ~/.config/telemetry-replay/telemetry-replay.toml
    pub fn load_default() -> Option<Self> {
        let default_paths = [
            PathBuf::from(DEFAULT_CONFIG_FILE_NAME),
            dirs::config_dir()
                .map(|p| p.join("telemetry-replay").join(DEFAULT_CONFIG_FILE_NAME))
                .unwrap_or_default(),
        ];

        for path in default_paths.iter().filter(|p| !p.as_os_str().is_empty()) {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {:?}", path);
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        None
    }

    /// Generate an example configuration file
    pub fn generate_example() -> String {
        r#"# telemetry-replay configuration file
# Copy to telemetry-replay.toml and customize as needed
#
# Configuration priority (highest to lowest):
# 1. Command-line arguments
# 2. Environment variables
# 3. This configuration file
# 4. Default values

[broker]
# Broker address: host, host:port, mqtt://host:port or tcp://host:port
url = "mqtt://localhost:1883"

# Credentials
username = "iot"
password = "welcome1"

# MQTT client identifier (generated when omitted)
# client_id = "line-1-simulator"

# Keep-alive in seconds
keep_alive_secs = 30

# Delay between reconnect attempts in milliseconds
reconnect_period_ms = 1000

# Upper bound for a single connection attempt in milliseconds
connect_timeout_ms = 30000

[replay]
# Log file to replay
# logfile = "./device.log"

# Speed multiplier (1.0 = original timing)
speed = 1.0

# Interval at which a stalled publish re-checks the connection in milliseconds
connection_poll_ms = 1000

# One log line per published event
verbose = false
"#
        .to_string()
    }
}
