use shrimp::{HeartbeatConfig, HeartbeatScheduler, MessageDispatcher, PresenceHub};

use super::clients::TestClient;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub hub: PresenceHub,
    pub dispatcher: MessageDispatcher,
    pub heartbeat: HeartbeatScheduler,
}

pub struct TestSetupBuilder {
    default_room: String,
    extra_rooms: Vec<String>,
    heartbeat: HeartbeatConfig,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            default_room: "default".to_string(),
            extra_rooms: vec![],
            heartbeat: HeartbeatConfig::default(),
        }
    }

    #[allow(dead_code)]
    pub fn with_room(mut self, room_id: &str) -> Self {
        self.extra_rooms.push(room_id.to_string());
        self
    }

    #[allow(dead_code)]
    pub fn with_heartbeat(mut self, heartbeat: HeartbeatConfig) -> Self {
        self.heartbeat = heartbeat;
        self
    }

    pub async fn build(self) -> TestSetup {
        let hub = PresenceHub::new(self.default_room);
        {
            let mut state = hub.lock().await;
            for room_id in &self.extra_rooms {
                state.directory.add_room(room_id);
            }
        }

        TestSetup {
            dispatcher: MessageDispatcher::new(hub.clone()),
            heartbeat: HeartbeatScheduler::new(hub.clone(), self.heartbeat),
            hub,
        }
    }
}

impl TestSetup {
    /// Opens a new connection for a client that has not registered yet
    pub fn connect(&self, id: &str, name: &str, token: &str) -> TestClient {
        TestClient::new(id, name, token)
    }

    /// Connects and registers a client, discarding its registration traffic
    #[allow(dead_code)]
    pub async fn registered_client(&self, id: &str, name: &str, token: &str) -> TestClient {
        let mut client = self.connect(id, name, token);
        client.register(self).await;
        client.drain();
        client
    }

    /// Joins a registered client to a non-default room
    #[allow(dead_code)]
    pub async fn join_room(&self, room_id: &str, client_id: &str) -> bool {
        let mut guard = self.hub.lock().await;
        let state = &mut *guard;
        let Some(client) = state.registry.get(client_id) else {
            return false;
        };
        state
            .directory
            .add_room(room_id)
            .join(client, &state.registry)
    }

    pub async fn member_ids(&self, room_id: &str) -> Vec<String> {
        self.hub
            .members(room_id)
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.id)
            .collect()
    }
}
