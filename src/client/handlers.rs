use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::models::ClientSummary;
use crate::shared::AppState;

/// HTTP handler for listing registered clients
///
/// GET /clients
/// Returns every registered client without its token, sorted by id
#[instrument(name = "list_clients", skip(state))]
pub async fn list_clients(State(state): State<AppState>) -> Json<Vec<ClientSummary>> {
    let clients = state.hub.clients().await;

    info!(client_count = clients.len(), "Clients listed");

    Json(clients)
}
