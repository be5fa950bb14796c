use tokio::sync::mpsc;

use shrimp::websockets::MessageHandler;
use shrimp::{ConnectionHandle, OutboundMessage};

use super::setup::TestSetup;

// ============================================================================
// Channel-backed test client
// ============================================================================

/// Plays the remote end of one connection
pub struct TestClient {
    pub id: String,
    pub name: String,
    pub token: String,
    pub connection: ConnectionHandle,
    receiver: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    pub fn new(id: &str, name: &str, token: &str) -> Self {
        let (connection, receiver) = ConnectionHandle::channel();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            token: token.to_string(),
            connection,
            receiver,
        }
    }

    /// Sends a raw text frame as if it arrived over the socket
    pub async fn send_raw(&self, setup: &TestSetup, payload: &str) {
        setup
            .dispatcher
            .handle_message(&self.connection, payload.to_string())
            .await;
    }

    pub async fn register(&self, setup: &TestSetup) {
        self.register_with_token(setup, &self.token).await;
    }

    pub async fn register_with_token(&self, setup: &TestSetup, token: &str) {
        let payload = serde_json::json!({
            "type": "register",
            "id": self.id,
            "name": self.name,
            "token": token,
        });
        self.send_raw(setup, &payload.to_string()).await;
    }

    #[allow(dead_code)]
    pub async fn pong(&self, setup: &TestSetup, ping_id: &str) {
        self.pong_with_token(setup, &self.token, ping_id).await;
    }

    #[allow(dead_code)]
    pub async fn pong_with_token(&self, setup: &TestSetup, token: &str, ping_id: &str) {
        let payload = serde_json::json!({
            "type": "pong",
            "token": token,
            "ping_id": ping_id,
        });
        self.send_raw(setup, &payload.to_string()).await;
    }

    /// Simulates the socket dropping and a fresh one being opened
    #[allow(dead_code)]
    pub fn new_connection(&mut self) {
        let (connection, receiver) = ConnectionHandle::channel();
        self.connection = connection;
        self.receiver = receiver;
    }

    pub fn next_message(&mut self) -> Option<OutboundMessage> {
        self.receiver
            .try_recv()
            .ok()
            .map(|frame| serde_json::from_str(&frame).unwrap())
    }

    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        let mut messages = vec![];
        while let Some(message) = self.next_message() {
            messages.push(message);
        }
        messages
    }

    /// Answers every pending ping; returns how many were answered
    #[allow(dead_code)]
    pub async fn answer_pings(&mut self, setup: &TestSetup) -> usize {
        let mut answered = 0;
        for message in self.drain() {
            if let OutboundMessage::Ping { id } = message {
                self.pong(setup, &id).await;
                answered += 1;
            }
        }
        answered
    }
}
