//! Gated publishing

use tracing::debug;

use crate::connection::ConnectionGate;
use crate::error::Result;
use crate::transport::BrokerTransport;

/// Hands messages to the transport once the connection gate is open
pub struct Publisher<T> {
    gate: ConnectionGate,
    transport: T,
}

impl<T: BrokerTransport> Publisher<T> {
    pub fn new(gate: ConnectionGate, transport: T) -> Self {
        Self { gate, transport }
    }

    /// Wait for the connection, then hand the message to the transport.
    ///
    /// Fire and forget: resolves as soon as the transport has queued it.
    pub async fn publish(&self, topic: &str, payload: &str) -> Result<()> {
        self.gate.await_connected().await;
        debug!(topic = %topic, payload = %payload, "Publishing");
        self.transport.send(topic, payload).await
    }

    pub fn gate(&self) -> &ConnectionGate {
        &self.gate
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::LifecycleEvent;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(String, String, Instant)>>,
    }

    #[async_trait]
    impl BrokerTransport for Recorder {
        async fn send(&self, topic: &str, payload: &str) -> Result<()> {
            self.sent
                .lock()
                .push((topic.to_string(), payload.to_string(), Instant::now()));
            Ok(())
        }

        async fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_when_connected() {
        let gate = ConnectionGate::new(Duration::from_secs(1));
        gate.apply(LifecycleEvent::Connected);
        let publisher = Publisher::new(gate, Recorder::default());

        publisher.publish("a/b", "1").await.unwrap();

        let sent = publisher.transport().sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "a/b");
        assert_eq!(sent[0].1, "1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_holds_until_connected() {
        let gate = ConnectionGate::new(Duration::from_secs(1));
        let writer = gate.clone();
        let publisher = Publisher::new(gate, Recorder::default());

        let start = Instant::now();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            writer.apply(LifecycleEvent::Connected);
        });

        publisher.publish("a/b", "1").await.unwrap();

        let sent = publisher.transport().sent.lock();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].2 - start >= Duration::from_secs(5));
    }
}
