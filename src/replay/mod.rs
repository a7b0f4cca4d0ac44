//! Timed replay of recorded telemetry
//!
//! This module turns a recorder log back into broker traffic:
//! - `parser` extracts events from "message received" log lines
//! - `publisher` sends each event once the connection gate is open
//! - `scheduler` sleeps out the recorded gaps between events
//!
//! # Usage
//!
//! ```rust,ignore
//! use telemetry_replay::connection::ConnectionGate;
//! use telemetry_replay::replay::{Publisher, ReplayScheduler};
//!
//! let publisher = Publisher::new(gate, transport);
//! let mut scheduler = ReplayScheduler::new(&publisher)?.with_speed(1.0);
//! let stats = scheduler.run(contents.split('\n')).await?;
//! ```

pub mod parser;
pub mod publisher;
pub mod scheduler;

pub use parser::{LineParser, LogEvent};
pub use publisher::Publisher;
pub use scheduler::{wait_between, ReplayScheduler, ReplayState, ReplayStats, SchedulerState};
