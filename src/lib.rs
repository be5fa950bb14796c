// Library crate for the shrimp presence server
// This file exposes the public API for integration tests

pub mod client;
pub mod config;
pub mod presence;
pub mod room;
pub mod shared;
pub mod websockets;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use client::{AuthError, Client, ClientRegistry, LookupError};
pub use config::ServerConfig;
pub use presence::{HeartbeatConfig, HeartbeatHandle, HeartbeatScheduler, PresenceHub};
pub use room::{Room, RoomDirectory};
pub use shared::{AppError, AppState};
pub use websockets::{ConnectionHandle, MemberView, MessageDispatcher, OutboundMessage};

/// Builds the HTTP router: health check, WebSocket gateway and read-only presence views
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/ws", get(websockets::websocket_handler))
        .route("/clients", get(client::list_clients))
        .route("/rooms/:room_id/members", get(room::room_members))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
