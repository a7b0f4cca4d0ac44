//! Command-line arguments for telemetry-replay
//!
//! This module defines the CLI arguments structure using clap.

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use super::defaults::*;

/// Command-line arguments for telemetry-replay
#[derive(Parser, Debug, Clone)]
#[command(name = "telemetry-replay")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Device simulator: replays recorded MQTT telemetry at its original timing")]
pub struct ReplayArgs {
    /// MQTT broker address and port (host, host:port or mqtt://host:port)
    #[arg(
        short = 'm',
        long = "mqttbroker",
        env = "REPLAY_MQTT_BROKER",
        value_name = "ADDRESS:PORT"
    )]
    pub mqtt_broker: Option<String>,

    /// Log file used for simulation
    #[arg(short = 'f', long = "logfile", env = "REPLAY_LOGFILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (one line per published event)
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (TOML format)
    /// If not specified, looks for telemetry-replay.toml in the current
    /// directory and in the user config directory
    #[arg(short, long, env = "REPLAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Generate example configuration file and exit
    #[arg(long)]
    pub generate_config: bool,

    /// Replay speed multiplier (2.0 halves every gap, 0.5 doubles it)
    #[arg(long, env = "REPLAY_SPEED", default_value_t = DEFAULT_SPEED)]
    pub speed: f64,

    /// Broker username
    #[arg(long, env = "REPLAY_MQTT_USERNAME", default_value = DEFAULT_MQTT_USERNAME)]
    pub username: String,

    /// Broker password
    #[arg(
        long,
        env = "REPLAY_MQTT_PASSWORD",
        default_value = DEFAULT_MQTT_PASSWORD,
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// MQTT client identifier (generated when not set)
    #[arg(long, env = "REPLAY_MQTT_CLIENT_ID")]
    pub client_id: Option<String>,

    /// MQTT keep-alive interval in seconds
    #[arg(long, env = "REPLAY_KEEP_ALIVE_SECS", default_value_t = DEFAULT_KEEP_ALIVE_SECS)]
    pub keep_alive_secs: u64,

    /// Delay between reconnect attempts in milliseconds
    #[arg(long, env = "REPLAY_RECONNECT_PERIOD_MS", default_value_t = DEFAULT_RECONNECT_PERIOD_MS)]
    pub reconnect_period_ms: u64,

    /// Upper bound for a single connection attempt in milliseconds
    #[arg(long, env = "REPLAY_CONNECT_TIMEOUT_MS", default_value_t = DEFAULT_CONNECT_TIMEOUT_MS)]
    pub connect_timeout_ms: u64,

    /// Interval at which a stalled publish re-checks the connection, in milliseconds
    #[arg(long, env = "REPLAY_CONNECTION_POLL_MS", default_value_t = DEFAULT_CONNECTION_POLL_MS)]
    pub connection_poll_ms: u64,
}

impl ReplayArgs {
    /// Rendered usage text, as printed for `--help`
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }
}
