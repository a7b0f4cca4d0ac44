//! Log line parsing
//!
//! Only "message received" entries are replay candidates:
//!
//! ```text
//! 2020-01-01 10:00:00.000 verb MQTT Message received with topic 'a/b' and data: {"x":1}
//! ```
//!
//! Everything else, including near-misses, is skipped without error.

use chrono::NaiveTime;
use regex::Regex;

use crate::error::{ReplayError, Result};

/// Date, time, topic and payload, anchored to the whole line
const LINE_PATTERN: &str = r"^(\d{4}-\d{2}-\d{2}) (\d{2}:\d{2}:\d{2}\.\d{3}) verb MQTT Message received with topic '(.*)' and data: (.*)$";

/// Format of the time capture
const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// One recorded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Calendar date as written in the log. Not used for timing.
    pub date: String,
    /// Time of day, millisecond precision
    pub time: NaiveTime,
    /// Destination topic
    pub topic: String,
    /// Message body, verbatim
    pub payload: String,
}

/// Compiled line matcher
#[derive(Debug, Clone)]
pub struct LineParser {
    regex: Regex,
}

impl LineParser {
    /// Create a parser for the recorder's "message received" lines
    pub fn new() -> Result<Self> {
        let regex = Regex::new(LINE_PATTERN)
            .map_err(|e| ReplayError::Replay(format!("Invalid line pattern: {}", e)))?;
        Ok(Self { regex })
    }

    /// Parse one line; `None` for anything that is not a complete event
    pub fn parse(&self, line: &str) -> Option<LogEvent> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let caps = self.regex.captures(line)?;

        let date = caps.get(1)?.as_str();
        let time = caps.get(2)?.as_str();
        let topic = caps.get(3)?.as_str();
        let payload = caps.get(4)?.as_str();

        if topic.is_empty() || payload.is_empty() {
            return None;
        }

        let time = NaiveTime::parse_from_str(time, TIME_FORMAT).ok()?;

        Some(LogEvent {
            date: date.to_string(),
            time,
            topic: topic.to_string(),
            payload: payload.to_string(),
        })
    }
}
