//! Broker address and connection settings

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::defaults::*;
use crate::error::ConfigError;

/// Broker host and port parsed from `--mqttbroker`
///
/// Accepted forms are `host`, `host:port`, `mqtt://host:port` and
/// `tcp://host:port`. TLS schemes are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerAddress {
    pub host: String,
    pub port: u16,
}

impl FromStr for BrokerAddress {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let rest = match trimmed.split_once("://") {
            Some(("mqtt" | "tcp", rest)) => rest,
            Some(("mqtts" | "ssl" | "tls" | "wss" | "ws", _)) => {
                return Err(ConfigError::invalid_broker_url(
                    raw,
                    "TLS and websocket transports are not supported",
                ))
            }
            Some((scheme, _)) => {
                return Err(ConfigError::invalid_broker_url(
                    raw,
                    format!("unsupported scheme '{}'", scheme),
                ))
            }
            None => trimmed,
        };
        let rest = rest.trim_end_matches('/');

        let (host, port) = match rest.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| {
                    ConfigError::invalid_broker_url(raw, format!("invalid port '{}'", port))
                })?;
                (host, port)
            }
            None => (rest, DEFAULT_MQTT_PORT),
        };

        if host.is_empty() {
            return Err(ConfigError::invalid_broker_url(raw, "missing host"));
        }
        if port == 0 {
            return Err(ConfigError::invalid_broker_url(
                raw,
                "port must be between 1 and 65535",
            ));
        }

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for BrokerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mqtt://{}:{}", self.host, self.port)
    }
}

/// Everything the MQTT transport needs to open and keep a connection
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub address: BrokerAddress,
    pub client_id: String,
    pub username: String,
    pub password: String,
    pub keep_alive: Duration,
    pub reconnect_period: Duration,
    pub connect_timeout: Duration,
    pub request_capacity: usize,
}

impl BrokerConfig {
    /// Config with default credentials and timings for the given address
    pub fn new(address: BrokerAddress) -> Self {
        Self {
            address,
            client_id: generate_client_id(),
            username: DEFAULT_MQTT_USERNAME.to_string(),
            password: DEFAULT_MQTT_PASSWORD.to_string(),
            keep_alive: Duration::from_secs(DEFAULT_KEEP_ALIVE_SECS),
            reconnect_period: Duration::from_millis(DEFAULT_RECONNECT_PERIOD_MS),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            request_capacity: DEFAULT_REQUEST_CAPACITY,
        }
    }
}

/// Random client id so several simulators can share one broker
pub fn generate_client_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", DEFAULT_CLIENT_ID_PREFIX, &id[..8])
}
