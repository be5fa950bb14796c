use std::collections::HashMap;
use tracing::{debug, info};

use super::models::Room;
use crate::client::ClientRegistry;

pub const DEFAULT_ROOM_ID: &str = "default";

/// Owns every room; the default room exists for the directory's whole lifetime
#[derive(Debug)]
pub struct RoomDirectory {
    rooms: HashMap<String, Room>,
    default_room_id: String,
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_ROOM_ID)
    }
}

impl RoomDirectory {
    pub fn new(default_room_id: impl Into<String>) -> Self {
        let default_room_id = default_room_id.into();
        let mut rooms = HashMap::new();
        rooms.insert(default_room_id.clone(), Room::new(default_room_id.clone()));

        info!(room_id = %default_room_id, "Created default room");

        Self {
            rooms,
            default_room_id,
        }
    }

    pub fn default_room_id(&self) -> &str {
        &self.default_room_id
    }

    pub fn default_room(&self) -> &Room {
        &self.rooms[&self.default_room_id]
    }

    pub fn default_room_mut(&mut self) -> &mut Room {
        self.rooms
            .entry(self.default_room_id.clone())
            .or_insert_with_key(|id| Room::new(id.clone()))
    }

    /// Adds a server-side room, or returns the existing one with that id
    pub fn add_room(&mut self, room_id: &str) -> &mut Room {
        self.rooms.entry(room_id.to_string()).or_insert_with(|| {
            info!(room_id = %room_id, "Created room");
            Room::new(room_id)
        })
    }

    pub fn get(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Ids of the rooms the client currently belongs to, sorted
    pub fn rooms_of(&self, client_id: &str) -> Vec<String> {
        let mut room_ids: Vec<String> = self
            .rooms
            .values()
            .filter(|room| room.has_member(client_id))
            .map(|room| room.id().to_string())
            .collect();
        room_ids.sort();
        room_ids
    }

    /// Leaves every room the client is in, broadcasting to the remaining members.
    /// Returns the ids of the rooms that were left.
    pub fn remove_from_all(&mut self, client_id: &str, registry: &ClientRegistry) -> Vec<String> {
        let room_ids = self.rooms_of(client_id);
        for room_id in &room_ids {
            if let Some(room) = self.rooms.get_mut(room_id) {
                room.leave(client_id, registry);
            }
        }

        debug!(
            client_id = %client_id,
            rooms_left = room_ids.len(),
            "Removed client from all rooms"
        );
        room_ids
    }
}
