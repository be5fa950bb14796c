use tracing::{debug, info};

use crate::client::{Client, ClientRegistry};
use crate::websockets::{MemberView, OutboundMessage};

/// A named group of clients that receive membership broadcasts
///
/// Members are stored as client ids in join order; the registry owns the clients.
#[derive(Debug, Clone)]
pub struct Room {
    id: String,
    member_ids: Vec<String>,
}

impl Room {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            member_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_member(&self, client_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == client_id)
    }

    pub fn member_count(&self) -> usize {
        self.member_ids.len()
    }

    /// Member snapshot resolved through the registry
    pub fn members(&self, registry: &ClientRegistry) -> Vec<MemberView> {
        self.member_ids
            .iter()
            .filter_map(|id| registry.get(id))
            .map(Client::view)
            .collect()
    }

    /// Adds a registered client. Returns false if it was already a member,
    /// in which case nothing is broadcast.
    pub fn join(&mut self, client: &Client, registry: &ClientRegistry) -> bool {
        if self.has_member(&client.id) {
            debug!(room_id = %self.id, client_id = %client.id, "Client already in room");
            return false;
        }

        self.member_ids.push(client.id.clone());
        let members = self.members(registry);

        info!(
            room_id = %self.id,
            client_id = %client.id,
            member_count = self.member_ids.len(),
            "Client joined room"
        );

        client.send(&OutboundMessage::Joined {
            room: self.id.clone(),
            members: members.clone(),
        });
        self.broadcast_update(registry, members, Some(&client.id));

        true
    }

    /// Removes a client. Returns false if it was not a member.
    pub fn leave(&mut self, client_id: &str, registry: &ClientRegistry) -> bool {
        if !self.has_member(client_id) {
            debug!(room_id = %self.id, client_id = %client_id, "Client not in room");
            return false;
        }

        self.member_ids.retain(|id| id != client_id);

        info!(
            room_id = %self.id,
            client_id = %client_id,
            member_count = self.member_ids.len(),
            "Client left room"
        );

        let members = self.members(registry);
        self.broadcast_update(registry, members, Some(client_id));

        true
    }

    /// Brings a reconnected member up to date: the new connection gets a
    /// `joined` snapshot, and the others are told if its name changed.
    pub fn resync(&self, client: &Client, registry: &ClientRegistry, renamed: bool) {
        if !self.has_member(&client.id) {
            return;
        }

        let members = self.members(registry);
        client.send(&OutboundMessage::Joined {
            room: self.id.clone(),
            members: members.clone(),
        });

        if renamed {
            info!(
                room_id = %self.id,
                client_id = %client.id,
                name = %client.name,
                "Member renamed on reconnect"
            );
            self.broadcast_update(registry, members, Some(&client.id));
        }
    }

    fn broadcast_update(
        &self,
        registry: &ClientRegistry,
        members: Vec<MemberView>,
        exclude: Option<&str>,
    ) {
        let message = OutboundMessage::MemberUpdate {
            room: self.id.clone(),
            members,
        };

        let recipients = self
            .member_ids
            .iter()
            .filter(|id| Some(id.as_str()) != exclude)
            .filter_map(|id| registry.get(id));

        let mut sent = 0;
        for client in recipients {
            client.send(&message);
            sent += 1;
        }

        debug!(room_id = %self.id, recipients = sent, "Broadcast member update");
    }
}
