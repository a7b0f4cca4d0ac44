//! Default constants for telemetry-replay configuration
//!
//! These constants define the default values used throughout the configuration
//! system when no explicit value is provided.

/// Default MQTT broker port when the address does not carry one
pub const DEFAULT_MQTT_PORT: u16 = 1883;

/// Default broker username
pub const DEFAULT_MQTT_USERNAME: &str = "iot";

/// Default broker password
pub const DEFAULT_MQTT_PASSWORD: &str = "welcome1";

/// Prefix for generated MQTT client identifiers
pub const DEFAULT_CLIENT_ID_PREFIX: &str = "telemetry-replay";

/// Default MQTT keep-alive in seconds
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 30;

/// Delay between reconnect attempts after the connection drops (ms)
pub const DEFAULT_RECONNECT_PERIOD_MS: u64 = 1000;

/// Upper bound for a single connection attempt (ms)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 30_000;

/// Interval at which a stalled publish re-checks the connection (ms)
pub const DEFAULT_CONNECTION_POLL_MS: u64 = 1000;

/// Capacity of the client's outgoing request queue
pub const DEFAULT_REQUEST_CAPACITY: usize = 1000;

/// Default replay speed multiplier (1.0 = original timing)
pub const DEFAULT_SPEED: f64 = 1.0;

/// Smallest accepted replay speed multiplier
pub const MIN_SPEED: f64 = 0.01;

/// Config file name searched in default locations
pub const DEFAULT_CONFIG_FILE_NAME: &str = "telemetry-replay.toml";
