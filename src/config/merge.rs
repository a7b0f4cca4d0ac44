//! Configuration merging utilities
//!
//! This module provides functions to merge configuration from files
//! with command-line arguments, where CLI arguments take precedence.

use super::args::ReplayArgs;
use super::defaults::*;
use super::file::ConfigFile;

/// Merge configuration file values with CLI arguments.
/// CLI arguments take precedence over config file values.
/// Only applies config file values where CLI uses defaults.
pub fn merge_config_with_args(mut args: ReplayArgs, config: &ConfigFile) -> ReplayArgs {
    // Helper macro to apply config value if CLI is at default
    macro_rules! apply_if_default {
        ($field:ident, $config_val:expr, $default:expr) => {
            if let Some(val) = $config_val {
                if args.$field == $default {
                    args.$field = val;
                }
            }
        };
    }

    macro_rules! apply_if_default_string {
        ($field:ident, $config_val:expr, $default:expr) => {
            if let Some(ref val) = $config_val {
                if args.$field == $default {
                    args.$field = val.clone();
                }
            }
        };
    }

    macro_rules! apply_option {
        ($field:ident, $config_val:expr) => {
            if args.$field.is_none() {
                if let Some(val) = $config_val.clone() {
                    args.$field = Some(val);
                }
            }
        };
    }

    // Broker section
    apply_option!(mqtt_broker, config.broker.url);
    apply_option!(client_id, config.broker.client_id);
    apply_if_default_string!(username, config.broker.username, DEFAULT_MQTT_USERNAME);
    apply_if_default_string!(password, config.broker.password, DEFAULT_MQTT_PASSWORD);
    apply_if_default!(
        keep_alive_secs,
        config.broker.keep_alive_secs,
        DEFAULT_KEEP_ALIVE_SECS
    );
    apply_if_default!(
        reconnect_period_ms,
        config.broker.reconnect_period_ms,
        DEFAULT_RECONNECT_PERIOD_MS
    );
    apply_if_default!(
        connect_timeout_ms,
        config.broker.connect_timeout_ms,
        DEFAULT_CONNECT_TIMEOUT_MS
    );

    // Replay section
    apply_option!(log_file, config.replay.logfile);
    apply_if_default!(speed, config.replay.speed, DEFAULT_SPEED);
    apply_if_default!(
        connection_poll_ms,
        config.replay.connection_poll_ms,
        DEFAULT_CONNECTION_POLL_MS
    );
    if !args.verbose && config.replay.verbose == Some(true) {
        args.verbose = true;
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn config_from(toml: &str) -> ConfigFile {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_config_fills_missing_options() {
        let args = ReplayArgs::try_parse_from(["telemetry-replay"]).unwrap();
        let config = config_from(
            r#"
            [broker]
            url = "broker.local:1884"
            password = "secret"

            [replay]
            logfile = "line-1.log"
            speed = 3.0
            verbose = true
        "#,
        );

        let merged = merge_config_with_args(args, &config);
        assert_eq!(merged.mqtt_broker.as_deref(), Some("broker.local:1884"));
        assert_eq!(merged.log_file, Some(PathBuf::from("line-1.log")));
        assert_eq!(merged.password, "secret");
        assert_eq!(merged.username, DEFAULT_MQTT_USERNAME);
        assert_eq!(merged.speed, 3.0);
        assert!(merged.verbose);
    }

    #[test]
    fn test_cli_takes_precedence() {
        let args = ReplayArgs::try_parse_from([
            "telemetry-replay",
            "-m",
            "cli-host",
            "-f",
            "cli.log",
            "--reconnect-period-ms",
            "50",
        ])
        .unwrap();
        let config = config_from(
            r#"
            [broker]
            url = "file-host"
            reconnect_period_ms = 5000

            [replay]
            logfile = "file.log"
        "#,
        );

        let merged = merge_config_with_args(args, &config);
        assert_eq!(merged.mqtt_broker.as_deref(), Some("cli-host"));
        assert_eq!(merged.log_file, Some(PathBuf::from("cli.log")));
        assert_eq!(merged.reconnect_period_ms, 50);
    }

    #[test]
    fn test_keep_alive_from_config() {
        let args = ReplayArgs::try_parse_from(["telemetry-replay"]).unwrap();
        let config = config_from("[broker]\nkeep_alive_secs = 90");

        let merged = merge_config_with_args(args, &config);
        assert_eq!(merged.keep_alive_secs, 90);

        let args =
            ReplayArgs::try_parse_from(["telemetry-replay", "--keep-alive-secs", "15"]).unwrap();
        let merged = merge_config_with_args(args, &config);
        assert_eq!(merged.keep_alive_secs, 15);
    }
}
