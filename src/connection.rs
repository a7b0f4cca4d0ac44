//! Connection gate
//!
//! Tracks whether the broker connection is currently usable and lets the
//! replay task suspend until it is. The transport pushes [`LifecycleEvent`]s
//! into the gate; the publisher only ever reads from it.
//!
//! The gate is a cheap `Clone` handle. The driver creates one and hands
//! clones to the transport and to the publisher.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Connectivity notification emitted by the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Connect acknowledged by the broker
    Connected,
    /// Connection or protocol error
    Error(String),
    /// A new connection attempt is about to start
    Reconnecting,
    /// An established connection was lost
    Offline,
    /// Connection closed on purpose (by us or by the broker)
    Closed,
}

/// Snapshot of the gate's state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionState {
    /// True only between a connect event and the next offline/closed event
    pub connected: bool,
    /// Number of successful connects so far
    pub connects: u64,
}

impl ConnectionState {
    fn apply(&mut self, event: &LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::Connected => {
                self.connected = true;
                self.connects += 1;
                true
            }
            LifecycleEvent::Offline | LifecycleEvent::Closed => {
                let changed = self.connected;
                self.connected = false;
                changed
            }
            LifecycleEvent::Error(_) | LifecycleEvent::Reconnecting => false,
        }
    }
}

/// Shared connection-readiness gate
#[derive(Debug, Clone)]
pub struct ConnectionGate {
    state: Arc<watch::Sender<ConnectionState>>,
    poll_interval: Duration,
}

impl ConnectionGate {
    /// Create a disconnected gate that re-checks every `poll_interval` while waiting
    pub fn new(poll_interval: Duration) -> Self {
        let (tx, _) = watch::channel(ConnectionState::default());
        Self {
            state: Arc::new(tx),
            poll_interval,
        }
    }

    /// Whether the transport is currently usable for sending
    pub fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }

    /// Current state snapshot
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Interval between readiness re-checks
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Apply a lifecycle event from the transport
    pub fn apply(&self, event: LifecycleEvent) {
        match &event {
            LifecycleEvent::Connected => {
                let reconnect = self.state.borrow().connects > 0;
                if reconnect {
                    info!("Reconnected to MQTT broker");
                } else {
                    info!("Successfully connected to MQTT broker");
                }
            }
            LifecycleEvent::Error(detail) => error!(error = %detail, "MQTT error"),
            LifecycleEvent::Reconnecting => debug!("Client trying to reconnect..."),
            LifecycleEvent::Offline => warn!("Client went offline!"),
            LifecycleEvent::Closed => info!("Client ended"),
        }

        self.state.send_if_modified(|state| state.apply(&event));
    }

    /// Suspend until the connection is usable.
    ///
    /// Returns immediately when already connected. Otherwise wakes on every
    /// state change and at least once per poll interval, logging a waiting
    /// notice each time the interval elapses. There is no timeout.
    pub async fn await_connected(&self) {
        let mut rx = self.state.subscribe();
        loop {
            if rx.borrow_and_update().connected {
                return;
            }
            if tokio::time::timeout(self.poll_interval, rx.changed())
                .await
                .is_err()
            {
                debug!("Waiting for MQTT connection established...");
            }
        }
    }
}
