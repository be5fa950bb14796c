use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

use crate::client::{AuthError, Client, ClientRegistry, ClientSummary, LookupError};
use crate::room::RoomDirectory;
use crate::websockets::{ConnectionHandle, MemberView, OutboundMessage};

/// All presence state, mutated only while holding the hub's lock
#[derive(Debug)]
pub struct PresenceState {
    pub registry: ClientRegistry,
    pub directory: RoomDirectory,
    /// Number of heartbeat ticks run so far
    pub ticks: u64,
}

impl PresenceState {
    pub fn new(default_room_id: impl Into<String>) -> Self {
        Self {
            registry: ClientRegistry::new(),
            directory: RoomDirectory::new(default_room_id),
            ticks: 0,
        }
    }

    /// Removes a client from the registry and from every room it belongs to
    pub fn remove_client(&mut self, client_id: &str) -> Option<Client> {
        let client = self.registry.remove(client_id)?;
        let rooms_left = self.directory.remove_from_all(client_id, &self.registry);

        info!(
            client_id = %client_id,
            rooms_left = ?rooms_left,
            "Client removed"
        );
        Some(client)
    }
}

/// Shared handle to the single in-memory presence authority
///
/// Inbound message handling and heartbeat ticks both go through this lock,
/// so a pong and an eviction for the same client are never interleaved.
#[derive(Debug, Clone)]
pub struct PresenceHub {
    state: Arc<Mutex<PresenceState>>,
}

impl PresenceHub {
    pub fn new(default_room_id: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(PresenceState::new(default_room_id))),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, PresenceState> {
        self.state.lock().await
    }

    /// Registers or reconnects a client, acknowledges it, joins it to the
    /// default room and sends it the client directory.
    ///
    /// A reconnecting client gets a fresh `joined` snapshot for every room it
    /// is in; the other members only hear about it if its name changed.
    /// On failure nothing is sent; the caller decides how to reject.
    #[instrument(skip(self, token, connection))]
    pub async fn register(
        &self,
        id: &str,
        name: &str,
        token: &str,
        connection: ConnectionHandle,
    ) -> Result<(), AuthError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let previous_name = state.registry.get(id).map(|client| client.name.clone());
        let registration = state
            .registry
            .register_or_reconnect(id, name, token, connection)?;
        let reconnected = registration.reconnected;
        registration.client.send(&OutboundMessage::Registered { id: id.to_string() });

        let registry = &state.registry;
        let Some(client) = registry.get(id) else {
            return Ok(());
        };

        if reconnected {
            let renamed = previous_name.as_deref() != Some(name);
            let room_ids = state.directory.rooms_of(id);
            debug!(
                client_id = %id,
                renamed = renamed,
                rooms = ?room_ids,
                "Resyncing reconnected client"
            );
            for room_id in &room_ids {
                if let Some(room) = state.directory.get(room_id) {
                    room.resync(client, registry, renamed);
                }
            }
        }

        // No-op for a reconnected client that is already a member
        state.directory.default_room_mut().join(client, registry);

        client.send(&OutboundMessage::Clients {
            clients: registry.views(),
        });

        Ok(())
    }

    /// Clears an outstanding ping for the client owning `token`
    ///
    /// Returns whether the ping id was outstanding; duplicates and stale ids are
    /// accepted and ignored.
    #[instrument(skip(self, token))]
    pub async fn record_pong(&self, token: &str, ping_id: &str) -> Result<bool, LookupError> {
        let mut state = self.state.lock().await;

        let Some(client) = state.registry.get_by_token_mut(token) else {
            warn!(ping_id = %ping_id, "Pong from unknown token");
            return Err(LookupError::UnknownToken);
        };

        let acknowledged = client.acknowledge_ping(ping_id);
        debug!(
            client_id = %client.id,
            acknowledged = acknowledged,
            outstanding = client.outstanding_pings(),
            "Pong recorded"
        );

        Ok(acknowledged)
    }

    /// Removes a client and updates every room it was in
    #[instrument(skip(self))]
    pub async fn disconnect(&self, client_id: &str) -> Option<Client> {
        let mut state = self.state.lock().await;
        state.remove_client(client_id)
    }

    pub async fn members(&self, room_id: &str) -> Option<Vec<MemberView>> {
        let state = self.state.lock().await;
        state
            .directory
            .get(room_id)
            .map(|room| room.members(&state.registry))
    }

    pub async fn clients(&self) -> Vec<ClientSummary> {
        let state = self.state.lock().await;
        let mut clients: Vec<ClientSummary> =
            state.registry.clients().map(Client::summary).collect();
        clients.sort_by(|a, b| a.id.cmp(&b.id));
        clients
    }

    pub async fn client_count(&self) -> usize {
        self.state.lock().await.registry.len()
    }
}
