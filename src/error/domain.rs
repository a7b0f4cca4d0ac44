//! Domain-specific error types for telemetry-replay

use thiserror::Error;

/// Structured configuration error domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{setting}: {reason}")]
    InvalidSetting { setting: String, reason: String },
    #[error("missing required option {0}")]
    Missing(String),
    #[error("invalid broker URL '{url}': {reason}")]
    InvalidBrokerUrl { url: String, reason: String },
    #[error("{0}")]
    Message(String),
}

impl ConfigError {
    pub fn invalid_setting(setting: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting: setting.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(setting: impl Into<String>) -> Self {
        Self::Missing(setting.into())
    }

    pub fn invalid_broker_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBrokerUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl From<String> for ConfigError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

/// Structured transport error domain
///
/// Broker connectivity problems are not reported through this type; they
/// surface as lifecycle events on the connection gate. These errors mean
/// the handoff to the client itself failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("publish to '{topic}' failed: {detail}")]
    Send { topic: String, detail: String },
    #[error("disconnect failed: {0}")]
    Disconnect(String),
}

impl TransportError {
    pub fn send(topic: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Send {
            topic: topic.into(),
            detail: detail.into(),
        }
    }

    pub fn disconnect(detail: impl Into<String>) -> Self {
        Self::Disconnect(detail.into())
    }
}
