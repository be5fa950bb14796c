use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::messages::OutboundMessage;

/// Handle used to push frames to a single live connection
///
/// The receiving half of the channel is drained by the gateway's connection loop.
/// Sends never block: a closed connection simply drops the frame.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: Uuid,
    sender: mpsc::UnboundedSender<String>,
}

impl ConnectionHandle {
    pub fn new(sender: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
        }
    }

    /// Creates a handle together with the receiver that observes its frames
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Serializes and queues a message; fire-and-forget
    pub fn send(&self, message: &OutboundMessage) {
        let frame = match serde_json::to_string(message) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(
                    connection_id = %self.id,
                    message_type = message.kind(),
                    error = %e,
                    "Failed to encode outbound message"
                );
                return;
            }
        };

        if self.sender.send(frame).is_err() {
            debug!(
                connection_id = %self.id,
                message_type = message.kind(),
                "Connection closed, dropping outbound message"
            );
        }
    }
}
