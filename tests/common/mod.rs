//! Shared test fixtures for telemetry-replay integration tests
//!
//! # Usage
//!
//! In your test file, add:
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Features
//!
//! - `RecordingTransport`: in-memory transport that timestamps every send
//! - Log line builders for the recorder format

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use telemetry_replay::error::{Result, TransportError};
use telemetry_replay::BrokerTransport;
use tokio::time::Instant;

// ============================================================================
// Transport
// ============================================================================

/// One message handed to the transport
#[derive(Debug, Clone)]
pub struct Sent {
    pub topic: String,
    pub payload: String,
    pub at: Instant,
}

/// Transport that records sends instead of talking to a broker
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    closed: AtomicBool,
    fail_sends: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    pub fn topics(&self) -> Vec<String> {
        self.sent.lock().iter().map(|s| s.topic.clone()).collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Make every following send fail like a dead client would
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl BrokerTransport for RecordingTransport {
    async fn send(&self, topic: &str, payload: &str) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::send(topic, "request channel closed").into());
        }
        self.sent.lock().push(Sent {
            topic: topic.to_string(),
            payload: payload.to_string(),
            at: Instant::now(),
        });
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Log fixtures
// ============================================================================

/// A "message received" line as the recorder writes it
pub fn message_line(date: &str, time: &str, topic: &str, payload: &str) -> String {
    format!(
        "{} {} verb MQTT Message received with topic '{}' and data: {}",
        date, time, topic, payload
    )
}

/// Recorder noise that must never be replayed
pub fn noise_lines() -> Vec<String> {
    vec![
        "2020-01-01 09:59:59.000 info PROCESS Line controller starting".to_string(),
        "2020-01-01 09:59:59.100 info MQTT Successfully connected to MQTT broker".to_string(),
        String::new(),
        "garbage".to_string(),
    ]
}
