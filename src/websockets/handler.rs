use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tracing::{info, warn};

use super::connection::ConnectionHandle;
use super::dispatcher::MessageDispatcher;
use super::socket::Connection;
use crate::shared::AppState;

/// WebSocket endpoint
/// GET /ws
///
/// Clients identify themselves after the upgrade with a `register` message.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    info!("WebSocket connection requested");
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    app_state: AppState,
) {
    // Create the outbound channel (app -> client)
    let (handle, outbound_receiver) = ConnectionHandle::channel();
    let connection_id = handle.id();

    info!(connection_id = %connection_id, "WebSocket connection established");

    let message_handler = Arc::new(MessageDispatcher::new(app_state.hub.clone()));
    let connection = Connection::new(
        handle,
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }
}
