#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

//! # telemetry-replay
//!
//! Replays recorded device telemetry onto an MQTT broker at the relative
//! timing it originally occurred, for demos and simulations.
//!
//! The input is a recorder log. Every line of the form
//!
//! ```text
//! 2020-01-01 10:00:00.000 verb MQTT Message received with topic 'a/b' and data: {"x":1}
//! ```
//!
//! becomes one publish; every other line is ignored. The gap between two
//! publishes is the gap between their recorded times.
//!
//! ## Quick Start
//!
//! ```bash
//! $ telemetry-replay --mqttbroker localhost:1883 --logfile device.log
//!
//! # one line per published event
//! $ telemetry-replay -m mqtt://broker:1883 -f device.log -v
//! ```
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use telemetry_replay::connection::ConnectionGate;
//! use telemetry_replay::replay::Publisher;
//! use telemetry_replay::driver::replay_contents;
//!
//! let gate = ConnectionGate::new(Duration::from_secs(1));
//! let publisher = Publisher::new(gate, my_transport);
//! let stats = replay_contents(&contents, &publisher, 1.0).await?;
//! ```
//!
//! ## Modules
//!
//! - [`config`] - CLI arguments, TOML config file, defaults
//! - [`connection`] - connection gate and lifecycle events
//! - [`transport`] - broker transport trait and the MQTT implementation
//! - [`replay`] - line parser, publisher and timed scheduler
//! - [`driver`] - wires everything into a run

pub mod config;
pub mod connection;
pub mod driver;
pub mod error;
pub mod replay;
pub mod transport;

pub use config::{ReplayArgs, ReplayConfig};
pub use connection::{ConnectionGate, ConnectionState, LifecycleEvent};
pub use error::{ReplayError, Result};
pub use replay::{LineParser, LogEvent, Publisher, ReplayScheduler, ReplayStats};
pub use transport::{BrokerTransport, MqttTransport};
