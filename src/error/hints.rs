//! Error hints for actionable error messages

use super::{ConfigError, ReplayError, TransportError};

/// Extension trait for adding hints to errors
pub trait ErrorHint {
    /// Get a helpful hint for resolving this error
    fn hint(&self) -> Option<String>;

    /// Format the error with hint for display
    fn with_hint(&self) -> String;
}

impl ErrorHint for ReplayError {
    fn hint(&self) -> Option<String> {
        match self {
            ReplayError::Config(ConfigError::Missing(option)) => Some(format!(
                "Pass {} on the command line, set it in the environment, or add it to telemetry-replay.toml",
                option
            )),
            ReplayError::Config(ConfigError::InvalidBrokerUrl { .. }) => Some(
                "Use host, host:port, mqtt://host:port or tcp://host:port (default port 1883)"
                    .to_string(),
            ),
            ReplayError::Config(ConfigError::InvalidSetting { setting, .. }) => Some(format!(
                "Check the value of '{}'. Run with --generate-config to see an annotated example",
                setting
            )),
            ReplayError::Input { path, .. } => Some(format!(
                "Check that {} exists and that the current user can read it",
                path.display()
            )),
            ReplayError::Transport(TransportError::Send { .. }) => Some(
                "The MQTT client event loop stopped; the replay cannot continue".to_string(),
            ),
            _ => None,
        }
    }

    fn with_hint(&self) -> String {
        match self.hint() {
            Some(hint) => format!("{}\n  hint: {}", self, hint),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_option_hint_names_option() {
        let err = ReplayError::missing_option("--mqttbroker");
        let hint = err.hint().unwrap();
        assert!(hint.contains("--mqttbroker"));
        assert!(err.with_hint().contains("hint:"));
    }

    #[test]
    fn test_replay_error_has_no_hint() {
        let err = ReplayError::Replay("already ran".into());
        assert!(err.hint().is_none());
        assert_eq!(err.with_hint(), err.to_string());
    }
}
