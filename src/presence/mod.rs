// Presence authority: serialized client/room state and the heartbeat that keeps it live

// Public API - what other modules can use
pub use heartbeat::{HeartbeatConfig, HeartbeatHandle, HeartbeatScheduler, TickReport};
pub use hub::{PresenceHub, PresenceState};

// Internal modules
mod heartbeat;
mod hub;
