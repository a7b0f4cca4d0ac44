//! Transport layer abstraction
//!
//! The replay engine only needs a capability-level view of the broker: hand
//! off a (topic, payload) pair, and close when done. Connection state is not
//! part of this trait; transports report it through the
//! [`ConnectionGate`](crate::connection::ConnectionGate).

pub mod mqtt;

use crate::error::Result;
use async_trait::async_trait;

pub use mqtt::MqttTransport;

/// Broker-facing send capability
#[async_trait]
pub trait BrokerTransport: Send + Sync {
    /// Hand a message to the transport.
    ///
    /// Resolves once the message is queued for sending; no broker
    /// acknowledgement is awaited.
    async fn send(&self, topic: &str, payload: &str) -> Result<()>;

    /// Close the connection gracefully
    async fn close(&self) -> Result<()>;
}

#[async_trait]
impl<T: BrokerTransport + ?Sized> BrokerTransport for std::sync::Arc<T> {
    async fn send(&self, topic: &str, payload: &str) -> Result<()> {
        (**self).send(topic, payload).await
    }

    async fn close(&self) -> Result<()> {
        (**self).close().await
    }
}
