// Public API - what other modules can use
pub use directory::{RoomDirectory, DEFAULT_ROOM_ID};
pub use handlers::{room_members, RoomMembersResponse};
pub use models::Room;

// Internal modules
mod directory;
mod handlers;
mod models;
