//! Test assertion helpers - fluent API for verifying what a client received
#![allow(dead_code)] // Test utilities may not all be used in every test

use shrimp::{MemberView, OutboundMessage};

use super::clients::TestClient;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    client: &'a mut TestClient,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion over the messages queued for one client
    pub fn for_client(client: &'a mut TestClient) -> Self {
        Self { client }
    }

    fn next(&mut self) -> OutboundMessage {
        let id = self.client.id.clone();
        self.client
            .next_message()
            .unwrap_or_else(|| panic!("{} should have received a message", id))
    }

    pub fn received_registered(mut self) -> Self {
        let expected = OutboundMessage::Registered {
            id: self.client.id.clone(),
        };
        let message = self.next();
        assert_eq!(message, expected, "{} expected registered", self.client.id);
        self
    }

    pub fn received_rejected(mut self) -> Self {
        let message = self.next();
        match message {
            OutboundMessage::RegistrationRejected { id, .. } => {
                assert_eq!(id, self.client.id, "rejection for wrong client")
            }
            other => panic!(
                "{} expected registration-rejected, got {:?}",
                self.client.id, other
            ),
        }
        self
    }

    /// Next message is `joined` for `room` with exactly `members` (ids, in order)
    pub fn received_joined(mut self, room: &str, members: &[&str]) -> Self {
        let message = self.next();
        match message {
            OutboundMessage::Joined {
                room: actual_room,
                members: actual,
            } => {
                assert_eq!(actual_room, room);
                assert_eq!(ids(&actual), members, "{} joined snapshot", self.client.id);
            }
            other => panic!("{} expected joined, got {:?}", self.client.id, other),
        }
        self
    }

    /// Next message is `member-update` for `room` with exactly `members` (ids, in order)
    pub fn received_member_update(mut self, room: &str, members: &[&str]) -> Self {
        let message = self.next();
        match message {
            OutboundMessage::MemberUpdate {
                room: actual_room,
                members: actual,
            } => {
                assert_eq!(actual_room, room);
                assert_eq!(ids(&actual), members, "{} member update", self.client.id);
            }
            other => panic!(
                "{} expected member-update, got {:?}",
                self.client.id, other
            ),
        }
        self
    }

    pub fn received_clients(mut self, clients: &[&str]) -> Self {
        let message = self.next();
        match message {
            OutboundMessage::Clients { clients: actual } => {
                assert_eq!(ids(&actual), clients, "{} client listing", self.client.id);
            }
            other => panic!("{} expected clients, got {:?}", self.client.id, other),
        }
        self
    }

    /// Next message is a ping; returns its id
    pub fn received_ping(mut self) -> String {
        match self.next() {
            OutboundMessage::Ping { id } => id,
            other => panic!("{} expected ping, got {:?}", self.client.id, other),
        }
    }

    pub fn received_no_messages(self) {
        let remaining = self.client.drain();
        assert!(
            remaining.is_empty(),
            "{} should not have received any messages, got {:?}",
            self.client.id,
            remaining
        );
    }
}

fn ids(members: &[MemberView]) -> Vec<&str> {
    members.iter().map(|m| m.id.as_str()).collect()
}
