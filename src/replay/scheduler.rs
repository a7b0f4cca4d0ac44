//! Timed replay scheduler
//!
//! Walks the log line by line and publishes every parsed event after
//! sleeping for the gap between its timestamp and the previous event's.
//! Events are strictly sequential: the next line is not looked at until the
//! current publish has been handed to the transport.

use std::time::Duration;

use chrono::NaiveTime;
use tokio::time::Instant;
use tracing::{debug, info};

use super::parser::{LineParser, LogEvent};
use super::publisher::Publisher;
use crate::config::{DEFAULT_SPEED, MIN_SPEED};
use crate::error::{ReplayError, Result};
use crate::transport::BrokerTransport;

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchedulerState {
    /// Created, not started
    #[default]
    Idle,
    /// Replaying lines
    Running,
    /// All lines consumed
    Completed,
}

/// Per-run replay state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayState {
    /// Time of the last published event
    pub previous_time: Option<NaiveTime>,
}

/// Statistics about a replay run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Lines looked at
    pub lines_read: u64,
    /// Events handed to the transport
    pub events_published: u64,
    /// Lines that were not events
    pub lines_skipped: u64,
    /// Sum of all inter-event sleeps in milliseconds
    pub scheduled_wait_ms: u64,
    /// Wall time of the run in milliseconds
    pub elapsed_ms: u64,
}

/// Delay between two events.
///
/// Only the time of day counts; both times are taken to be on the same day.
/// A negative gap (out-of-order log, or a replay crossing midnight) is zero.
pub fn wait_between(previous: NaiveTime, current: NaiveTime, speed: f64) -> Duration {
    let gap = current
        .signed_duration_since(previous)
        .to_std()
        .unwrap_or(Duration::ZERO);

    if (speed - DEFAULT_SPEED).abs() < f64::EPSILON {
        gap
    } else {
        gap.div_f64(speed.max(MIN_SPEED))
    }
}

/// Replays one log through a publisher
pub struct ReplayScheduler<'a, T> {
    parser: LineParser,
    publisher: &'a Publisher<T>,
    speed: f64,
    state: SchedulerState,
    replay: ReplayState,
    stats: ReplayStats,
}

impl<'a, T: BrokerTransport> ReplayScheduler<'a, T> {
    /// Create an idle scheduler at original speed
    pub fn new(publisher: &'a Publisher<T>) -> Result<Self> {
        Ok(Self {
            parser: LineParser::new()?,
            publisher,
            speed: DEFAULT_SPEED,
            state: SchedulerState::Idle,
            replay: ReplayState::default(),
            stats: ReplayStats::default(),
        })
    }

    /// Set replay speed
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed.max(MIN_SPEED);
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn replay_state(&self) -> ReplayState {
        self.replay
    }

    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }

    /// Replay every line, in order, then complete.
    pub async fn run<I, S>(&mut self, lines: I) -> Result<ReplayStats>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.state != SchedulerState::Idle {
            return Err(ReplayError::Replay(format!(
                "scheduler can only run once (state: {:?})",
                self.state
            )));
        }

        let started = Instant::now();
        self.state = SchedulerState::Running;

        for line in lines {
            self.stats.lines_read += 1;
            match self.parser.parse(line.as_ref()) {
                Some(event) => self.replay_event(event).await?,
                None => self.stats.lines_skipped += 1,
            }
        }

        self.state = SchedulerState::Completed;
        self.stats.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            published = self.stats.events_published,
            skipped = self.stats.lines_skipped,
            elapsed_ms = self.stats.elapsed_ms,
            "Processing completed"
        );

        Ok(self.stats.clone())
    }

    async fn replay_event(&mut self, event: LogEvent) -> Result<()> {
        if let Some(previous) = self.replay.previous_time {
            let wait = wait_between(previous, event.time, self.speed);
            debug!(
                topic = %event.topic,
                time = %event.time,
                wait_ms = wait.as_millis() as u64,
                "Next event scheduled"
            );
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
                self.stats.scheduled_wait_ms += wait.as_millis() as u64;
            }
        }

        self.publisher.publish(&event.topic, &event.payload).await?;

        self.replay.previous_time = Some(event.time);
        self.stats.events_published += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32, ms: u32) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(h, m, s, ms).unwrap()
    }

    #[test]
    fn test_wait_between_ordered() {
        assert_eq!(
            wait_between(t(10, 0, 0, 0), t(10, 0, 2, 500), 1.0),
            Duration::from_millis(2500)
        );
        assert_eq!(
            wait_between(t(9, 59, 59, 900), t(10, 0, 0, 100), 1.0),
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_wait_between_out_of_order_is_zero() {
        assert_eq!(
            wait_between(t(10, 0, 5, 0), t(10, 0, 1, 0), 1.0),
            Duration::ZERO
        );
    }

    #[test]
    fn test_wait_between_midnight_is_zero() {
        assert_eq!(
            wait_between(t(23, 59, 59, 0), t(0, 0, 1, 0), 1.0),
            Duration::ZERO
        );
    }

    #[test]
    fn test_wait_between_equal_times() {
        assert_eq!(
            wait_between(t(12, 0, 0, 0), t(12, 0, 0, 0), 1.0),
            Duration::ZERO
        );
    }

    #[test]
    fn test_wait_between_scaled_by_speed() {
        assert_eq!(
            wait_between(t(10, 0, 0, 0), t(10, 0, 2, 500), 2.0),
            Duration::from_millis(1250)
        );
        assert_eq!(
            wait_between(t(10, 0, 0, 0), t(10, 0, 1, 0), 0.5),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_scheduler_state_default() {
        assert_eq!(SchedulerState::default(), SchedulerState::Idle);
        assert_eq!(ReplayState::default().previous_time, None);
    }
}
