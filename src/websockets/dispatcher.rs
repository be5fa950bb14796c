use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::connection::ConnectionHandle;
use super::messages::{decode_inbound, InboundMessage, OutboundMessage};
use super::socket::MessageHandler;
use crate::presence::PresenceHub;

/// Routes decoded inbound messages to the presence hub
///
/// Malformed payloads and unknown message types are logged and dropped;
/// nothing a client sends can terminate its connection from here.
#[derive(Debug, Clone)]
pub struct MessageDispatcher {
    hub: PresenceHub,
}

impl MessageDispatcher {
    pub fn new(hub: PresenceHub) -> Self {
        Self { hub }
    }

    async fn handle_register(
        &self,
        connection: &ConnectionHandle,
        id: String,
        name: String,
        token: String,
    ) {
        info!(
            connection_id = %connection.id(),
            client_id = %id,
            "Registering client"
        );

        if let Err(e) = self
            .hub
            .register(&id, &name, &token, connection.clone())
            .await
        {
            warn!(
                connection_id = %connection.id(),
                client_id = %e.client_id(),
                error = %e,
                "Registration rejected"
            );
            connection.send(&OutboundMessage::RegistrationRejected {
                id,
                reason: e.to_string(),
            });
        }
    }

    async fn handle_pong(&self, connection: &ConnectionHandle, token: String, ping_id: String) {
        if let Err(e) = self.hub.record_pong(&token, &ping_id).await {
            debug!(
                connection_id = %connection.id(),
                ping_id = %ping_id,
                error = %e,
                "Discarding pong"
            );
        }
    }
}

#[async_trait]
impl MessageHandler for MessageDispatcher {
    async fn handle_message(&self, connection: &ConnectionHandle, message: String) {
        debug!(
            connection_id = %connection.id(),
            message = %message,
            "Received message"
        );

        match decode_inbound(&message) {
            Ok(InboundMessage::Register { id, name, token }) => {
                self.handle_register(connection, id, name, token).await;
            }
            Ok(InboundMessage::Pong { token, ping_id }) => {
                self.handle_pong(connection, token, ping_id).await;
            }
            Ok(InboundMessage::Unknown) => {
                debug!(
                    connection_id = %connection.id(),
                    message = %message,
                    "Unhandled message type"
                );
            }
            Err(e) => {
                warn!(
                    connection_id = %connection.id(),
                    error = %e,
                    "Failed to parse WebSocket message"
                );
            }
        }
    }

    async fn handle_disconnect(&self, connection: &ConnectionHandle) {
        // Identity survives the socket; heartbeat eviction reclaims it if the
        // client never comes back
        info!(connection_id = %connection.id(), "Connection closed");
    }
}
