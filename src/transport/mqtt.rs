//! MQTT transport over `rumqttc`
//!
//! The client's event loop runs in its own task. It is the only writer of
//! the connection gate: every connect, error, drop and reconnect attempt
//! becomes a [`LifecycleEvent`]. Reconnecting is simply polling the event
//! loop again after the reconnect period.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::BrokerTransport;
use crate::config::{BrokerAddress, BrokerConfig};
use crate::connection::{ConnectionGate, LifecycleEvent};
use crate::error::{Result, TransportError};

/// How long `close` waits for the DISCONNECT packet to be flushed
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// MQTT 3.1.1 transport
pub struct MqttTransport {
    client: AsyncClient,
    gate: ConnectionGate,
    address: BrokerAddress,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl MqttTransport {
    /// Start connecting to the broker in the background.
    ///
    /// Returns immediately; connection progress is reported through `gate`.
    /// Must be called from within a Tokio runtime.
    pub fn connect(config: &BrokerConfig, gate: ConnectionGate) -> Self {
        info!(broker = %config.address, client_id = %config.client_id, "Connecting to MQTT broker");

        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.address.host.clone(),
            config.address.port,
        );
        options.set_keep_alive(config.keep_alive);
        options.set_clean_session(true);
        options.set_credentials(config.username.clone(), config.password.clone());

        let (client, mut eventloop) = AsyncClient::new(options, config.request_capacity);
        eventloop
            .network_options
            .set_connection_timeout(connection_timeout_secs(config.connect_timeout));
        let driver = tokio::spawn(drive_event_loop(
            eventloop,
            gate.clone(),
            config.reconnect_period,
            config.connect_timeout,
        ));

        Self {
            client,
            gate,
            address: config.address.clone(),
            driver: Mutex::new(Some(driver)),
        }
    }

    /// Broker this transport talks to
    pub fn address(&self) -> &BrokerAddress {
        &self.address
    }
}

#[async_trait]
impl BrokerTransport for MqttTransport {
    async fn send(&self, topic: &str, payload: &str) -> Result<()> {
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload.as_bytes().to_vec())
            .await
            .map_err(|e| TransportError::send(topic, e.to_string()))?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let driver = self.driver.lock().take();
        let Some(mut driver) = driver else {
            return Ok(());
        };

        if self.gate.is_connected() {
            self.client
                .disconnect()
                .await
                .map_err(|e| TransportError::disconnect(e.to_string()))?;
            if tokio::time::timeout(CLOSE_GRACE, &mut driver).await.is_err() {
                debug!(broker = %self.address, "Event loop did not finish after DISCONNECT");
            }
        }

        driver.abort();
        Ok(())
    }
}

/// Whole seconds for the client's own connect timeout, rounded up.
///
/// The client only takes seconds; the exact bound is applied around each
/// poll in [`drive_event_loop`].
fn connection_timeout_secs(timeout: Duration) -> u64 {
    let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
    secs.max(1)
}

/// Poll the event loop forever, translating its output into lifecycle events.
///
/// Ends after our own DISCONNECT has been sent.
async fn drive_event_loop(
    mut eventloop: EventLoop,
    gate: ConnectionGate,
    reconnect_period: Duration,
    connect_timeout: Duration,
) {
    loop {
        let polled = if gate.is_connected() {
            eventloop.poll().await.map_err(|e| e.to_string())
        } else {
            match tokio::time::timeout(connect_timeout, eventloop.poll()).await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(_) => Err(format!(
                    "no connection within {}ms",
                    connect_timeout.as_millis()
                )),
            }
        };

        match polled {
            Ok(Event::Incoming(Packet::ConnAck(_))) => gate.apply(LifecycleEvent::Connected),
            Ok(Event::Incoming(Packet::Disconnect)) => gate.apply(LifecycleEvent::Offline),
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                gate.apply(LifecycleEvent::Closed);
                return;
            }
            Ok(_) => {}
            Err(detail) => {
                gate.apply(LifecycleEvent::Error(detail));
                if gate.is_connected() {
                    gate.apply(LifecycleEvent::Offline);
                }
                tokio::time::sleep(reconnect_period).await;
                gate.apply(LifecycleEvent::Reconnecting);
            }
        }
    }
}
